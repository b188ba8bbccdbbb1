//! Human Design Chart Tool
//!
//! Loads the de440s kernel, optionally prints its layout, and prints the chart
//! for a birth date and time.
//!
//! Usage:
//!   cargo run --bin chart_info -- --date "1985-04-12 09:15" --utc-offset 3 --place Moscow
//!   cargo run --bin chart_info -- --segments path/to/de440s.bsp

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDateTime;
use clap::{ArgAction, Parser};
use hdgraph::data;
use hdgraph::jplephem::{calendar, names, DE440S_FILENAME};
use hdgraph::{Chart, ChartBuilder, EphemerisFile, GregorianDateTime, HdObjects, Loader};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Human Design Chart Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes a Human Design chart from the JPL DE440s ephemeris",
    long_about = None
)]
struct Args {
    /// Local birth date and time, "YYYY-MM-DD HH:MM[:SS]" (default: now, UTC)
    #[arg(long)]
    date: Option<String>,

    /// Local time minus UTC, in hours
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    utc_offset: f64,

    /// Birth place, carried into the chart unchanged
    #[arg(long, default_value = "")]
    place: String,

    /// Print the chart as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Print the kernel layout and segments
    #[arg(short, long, action = ArgAction::SetTrue)]
    segments: bool,

    /// Print the kernel comment area
    #[arg(short, long, action = ArgAction::SetTrue)]
    comments: bool,

    /// Display detailed debugging information
    #[arg(short, long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Kernel file (default: de440s.bsp in the cache directory)
    kernel: Option<String>,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{:<16}{}", format!("{}:", name), value);
}

fn parse_date(text: &str) -> Result<GregorianDateTime> {
    let parsed = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M"))
        .map_err(|e| format!("cannot parse date {:?}: {}", text, e))?;
    Ok(GregorianDateTime::from_naive(parsed))
}

/// Displays the file record and the summary chain
fn display_file_format(eph: &EphemerisFile) {
    let header = eph.header();
    print_section_header("File Format");
    print_named_value("ID Word", &header.locidw);
    print_named_value("Endian", format!("{:?}", header.endian));
    print_named_value("Internal name", header.locifn.trim());
    print_named_value("Summary shape", format!("ND={}, NI={}", header.nd, header.ni));
    print_named_value(
        "Record pointers",
        format!(
            "FWARD={}, BWARD={}, FREE={}",
            header.fward, header.bward, header.free
        ),
    );
    print_named_value("Summary chain", format!("{} records", eph.summary_records().len()));
}

/// Displays segments sorted by center, then target
fn display_segments(eph: &EphemerisFile, verbose: bool) {
    print_section_header(&format!("Segments ({} total)", eph.segments().len()));

    let mut sorted: Vec<_> = eph.segments().iter().collect();
    sorted.sort_by(|a, b| a.center.cmp(&b.center).then_with(|| a.target.cmp(&b.target)));
    for segment in sorted {
        println!("{}", segment.describe(verbose));
    }

    if let Some((start, end)) = eph.covered_span() {
        let (start_jd, end_jd) = (calendar::seconds_to_jd(start), calendar::seconds_to_jd(end));
        print_section_header("Overall Time Coverage");
        let start_date = calendar::format_date(start_jd);
        let end_date = calendar::format_date(end_jd);
        print_named_value("Start date", format!("{} (JD {:.1})", start_date, start_jd));
        print_named_value("End date", format!("{} (JD {:.1})", end_date, end_jd));
    }
}

fn display_snapshot(title: &str, objects: &HdObjects) {
    print_section_header(title);
    let time = &objects.time;
    if let Some(local) = &time.local {
        print_named_value("Local", format!("{} ({:+} s) {}", local, time.utc_offset, time.place));
    }
    print_named_value("UTC", time.utc);
    print_named_value("Ephemeris", format!("{} s (JD {:.5})", time.ephemeris_seconds, time.jd()));
    println!();

    for planet in &objects.planets {
        println!(
            "{:<11} {:>11.6}°  {:<22} {:<12} {}",
            planet.body.name(),
            planet.longitude,
            planet.zodiac.to_string(),
            planet.hd.to_string(),
            planet.fd.direction.code()
        );
    }
}

fn display_chart(chart: &Chart) {
    display_snapshot("Personality", &chart.personality);
    display_snapshot("Design", &chart.design);

    let c = &chart.classification;
    print_section_header("Bodygraph");
    print_named_value("Type", c.hd_type);
    print_named_value("Authority", c.authority);
    print_named_value("Definition", c.definition);
    print_named_value("Profile", c.profile);
    print_named_value("Cross", c.cross);

    let centers: Vec<_> = chart.bodygraph.defined_centers().map(|c| c.name()).collect();
    print_named_value("Centers", centers.join(", "));
    for channel in chart.bodygraph.defined_channels() {
        println!(
            "  {:>2}-{:<2} {} - {}",
            channel.gates.0, channel.gates.1, channel.centers.0, channel.centers.1
        );
    }
}

/// Prints the raw summary words of every segment
fn display_debug_info(eph: &EphemerisFile) {
    print_section_header("Debug Information");
    for (i, summary) in eph.daf.summaries.iter().enumerate() {
        println!("Summary {}: {:?}", i + 1, summary.name);
        println!("  doubles={:?} ints={:?}", summary.doubles, summary.ints);
        if let [target, center, ..] = summary.ints[..] {
            println!(
                "  Target: {} ({}), Center: {} ({})",
                target,
                names::target_name(target).unwrap_or("Unknown"),
                center,
                names::target_name(center).unwrap_or("Unknown")
            );
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loader = Loader::new();
    let path = match &args.kernel {
        Some(kernel) => PathBuf::from(kernel),
        None if !data::is_cached(DE440S_FILENAME) => {
            return Err(format!(
                "{} not found; place it in {} or pass its path",
                DE440S_FILENAME,
                data::get_cache_dir().display()
            )
            .into());
        }
        None => loader.kernel_path(),
    };

    let start_time = Instant::now();
    let eph = EphemerisFile::open(&path, &hdgraph::Integrity::de440s())?;
    if !args.json {
        println!("Loaded {} in {:.2?}", path.display(), start_time.elapsed());
    }

    if args.comments {
        print_section_header("File Comments");
        println!("{}", eph.comments());
    }
    if args.segments {
        display_file_format(&eph);
        display_segments(&eph, args.debug);
    }
    if args.debug {
        display_debug_info(&eph);
    }

    let ts = loader.timescale();
    let birth = match &args.date {
        Some(text) => {
            let offset = (args.utc_offset * 3600.0).round() as i32;
            ts.local(parse_date(text)?, offset, &args.place)?
        }
        None => ts.now()?,
    };

    let chart = ChartBuilder::new(&eph, &ts).assemble(&birth)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    } else {
        display_chart(&chart);
        println!("\nTotal time: {:.2?}", start_time.elapsed());
    }

    Ok(())
}

//! Spacecraft Planet Kernel (SPK) format handling
//!
//! This module turns the raw DAF summaries of the de440s kernel into segment
//! descriptors and evaluates Type 2 (Chebyshev position) segments.
//!
//! The SPK format is described in:
//! http://naif.jpl.nasa.gov/pub/naif/toolkit_docs/FORTRAN/req/spk.html

use std::collections::HashMap;
use std::path::Path;

use log::debug;
use nalgebra::Vector3;

use crate::coordinates::Position;
use crate::jplephem::calendar::{format_date, seconds_to_jd};
use crate::jplephem::chebyshev::{normalize_time, rescale_derivative, ChebyshevPolynomial};
use crate::jplephem::daf::{FileHeader, Integrity, KernelBytes, Summary, SummaryRecord, DAF};
use crate::jplephem::errors::{format_err, JplephemError, Result};
use crate::jplephem::names::{target_name, titlecase};

/// SPK data type for Chebyshev position-only segments
pub const CHEBYSHEV_POSITION: i32 = 2;

/// Longest center chain followed when composing barycentric states
const MAX_CENTER_CHAIN: usize = 8;

/// Directory stored in the last four words of a Type 2 segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayInfo {
    /// Start time of the first record (seconds past J2000)
    pub init: f64,
    /// Length of each record's window (seconds)
    pub intlen: f64,
    /// Size of each record in double-precision words
    pub rsize: usize,
    /// Number of records in the segment
    pub n_records: usize,
}

impl ArrayInfo {
    /// Coefficients per axis: `rsize = 2 + 3 * n_coeffs`
    pub fn n_coeffs(&self) -> usize {
        (self.rsize - 2) / 3
    }
}

/// A segment in the kernel holding position data for one body
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDescriptor {
    /// Source of the segment (e.g., "DE-0440LE-0440")
    pub source: String,
    /// Initial epoch in seconds since J2000
    pub start_second: f64,
    /// Final epoch in seconds since J2000
    pub end_second: f64,
    /// Target body ID
    pub target: i32,
    /// Center body ID
    pub center: i32,
    /// Reference frame ID
    pub frame: i32,
    /// Data type, always [`CHEBYSHEV_POSITION`]
    pub data_type: i32,
    /// First word address of the segment data (1-based)
    pub start_address: usize,
    /// Last word address of the segment data (1-based, inclusive)
    pub end_address: usize,
    /// Record directory
    pub array_info: ArrayInfo,
}

/// One Type 2 record: window midpoint/radius and x, y, z coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct ChebyshevRecord {
    /// Midpoint of the record window (seconds past J2000)
    pub mid: f64,
    /// Half-length of the record window (seconds)
    pub radius: f64,
    /// x coefficients followed by y and z
    pub coefficients: Vec<f64>,
    n_coeffs: usize,
}

impl ChebyshevRecord {
    /// Coefficient set for axis 0 (x), 1 (y) or 2 (z)
    pub fn axis(&self, axis: usize) -> &[f64] {
        &self.coefficients[axis * self.n_coeffs..(axis + 1) * self.n_coeffs]
    }
}

impl SegmentDescriptor {
    /// Build a descriptor from a raw summary and validate it against the file
    fn from_summary(summary: &Summary, daf: &DAF) -> Result<Self> {
        let (start_second, end_second) = (summary.doubles[0], summary.doubles[1]);
        let ints = &summary.ints;
        let (target, center, frame, data_type) = (ints[0], ints[1], ints[2], ints[3]);

        if !(start_second <= end_second) {
            return Err(format_err(format!(
                "segment for target {} has start {} after end {}",
                target, start_second, end_second
            )));
        }
        if data_type != CHEBYSHEV_POSITION {
            return Err(format_err(format!(
                "segment for target {} has data type {}, only type {} is supported",
                target, data_type, CHEBYSHEV_POSITION
            )));
        }
        if ints[4] < 1 || ints[5] < ints[4] || ints[5] as usize > daf.word_count() {
            return Err(format_err(format!(
                "segment for target {} has address range {}..{} outside file of {} words",
                target,
                ints[4],
                ints[5],
                daf.word_count()
            )));
        }
        let (start_address, end_address) = (ints[4] as usize, ints[5] as usize);
        if end_address - start_address + 1 < 4 {
            return Err(format_err(format!(
                "segment for target {} is too small for its directory",
                target
            )));
        }

        let directory = daf.read_array(end_address - 3, end_address)?;
        let (init, intlen) = (directory[0], directory[1]);
        let (rsize, n_records) = (directory[2], directory[3]);

        if !(intlen > 0.0) || !init.is_finite() {
            return Err(format_err(format!(
                "segment for target {} has invalid window init={} intlen={}",
                target, init, intlen
            )));
        }
        if rsize.fract() != 0.0 || n_records.fract() != 0.0 || rsize < 5.0 || n_records < 1.0 {
            return Err(format_err(format!(
                "segment for target {} has invalid directory rsize={} n={}",
                target, rsize, n_records
            )));
        }
        let array_info = ArrayInfo {
            init,
            intlen,
            rsize: rsize as usize,
            n_records: n_records as usize,
        };
        if (array_info.rsize - 2) % 3 != 0 {
            return Err(format_err(format!(
                "segment for target {} has record size {} not of the form 2 + 3n",
                target, array_info.rsize
            )));
        }
        let expected = array_info.n_records * array_info.rsize + 4;
        if expected != end_address - start_address + 1 {
            return Err(format_err(format!(
                "segment for target {}: directory implies {} words, address range holds {}",
                target,
                expected,
                end_address - start_address + 1
            )));
        }

        Ok(SegmentDescriptor {
            source: summary.name.clone(),
            start_second,
            end_second,
            target,
            center,
            frame,
            data_type,
            start_address,
            end_address,
            array_info,
        })
    }

    /// Whether the validity interval contains `seconds`
    pub fn covers(&self, seconds: f64) -> bool {
        self.start_second <= seconds && seconds <= self.end_second
    }

    /// Start Julian date
    pub fn start_jd(&self) -> f64 {
        seconds_to_jd(self.start_second)
    }

    /// End Julian date
    pub fn end_jd(&self) -> f64 {
        seconds_to_jd(self.end_second)
    }

    /// Index of the record whose window contains `seconds`
    ///
    /// Records are contiguous and of equal length, so the index is direct
    /// arithmetic. The closing edge of the last window belongs to the last record.
    pub fn record_index(&self, seconds: f64) -> usize {
        let info = &self.array_info;
        let index = ((seconds - info.init) / info.intlen).floor();
        if index <= 0.0 {
            0
        } else {
            (index as usize).min(info.n_records - 1)
        }
    }

    /// Read record `index` from the file
    pub fn record(&self, daf: &DAF, index: usize) -> Result<ChebyshevRecord> {
        let info = &self.array_info;
        if index >= info.n_records {
            return Err(format_err(format!(
                "record {} outside segment of {} records",
                index, info.n_records
            )));
        }

        let first = self.start_address + index * info.rsize;
        let mut coefficients = Vec::with_capacity(info.rsize - 2);
        daf.read_words_into(first + 2, first + info.rsize - 1, &mut coefficients)?;

        Ok(ChebyshevRecord {
            mid: daf.word(first),
            radius: daf.word(first + 1),
            coefficients,
            n_coeffs: info.n_coeffs(),
        })
    }

    /// Position and velocity relative to `center` at `seconds`
    pub fn evaluate(&self, daf: &DAF, seconds: f64) -> Result<Position> {
        if !self.covers(seconds) {
            return Err(JplephemError::OutOfRangeError {
                target: self.target,
                seconds,
                start: self.start_second,
                end: self.end_second,
            });
        }

        let index = self.record_index(seconds);
        let record = self.record(daf, index)?;
        let info = &self.array_info;
        let window_start = info.init + index as f64 * info.intlen;
        let s = normalize_time(seconds, window_start, info.intlen)?;

        let mut position = Vector3::zeros();
        let mut velocity = Vector3::zeros();
        for axis in 0..3 {
            let poly = ChebyshevPolynomial::new(record.axis(axis));
            position[axis] = poly.evaluate(s);
            velocity[axis] = rescale_derivative(poly.derivative(s), info.intlen);
        }

        Ok(Position::new(position, velocity))
    }

    /// Return a textual description of the segment
    pub fn describe(&self, verbose: bool) -> String {
        let center = target_name(self.center).map(titlecase);
        let target = target_name(self.target).map(titlecase);

        let mut text = format!(
            "{}..{}  Type {}  {} ({}) -> {} ({})",
            format_date(self.start_jd()),
            format_date(self.end_jd()),
            self.data_type,
            center.as_deref().unwrap_or("Unknown center"),
            self.center,
            target.as_deref().unwrap_or("Unknown target"),
            self.target
        );
        if verbose {
            text.push_str(&format!(
                "\n  frame={} source={} records={} x {} words",
                self.frame, self.source, self.array_info.n_records, self.array_info.rsize
            ));
        }
        text
    }
}

impl std::fmt::Display for SegmentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe(false))
    }
}

/// A validated, parsed planetary kernel
///
/// Immutable after loading; share it by reference across threads.
#[derive(Debug)]
pub struct EphemerisFile {
    /// The underlying DAF file
    pub daf: DAF,
    segments: Vec<SegmentDescriptor>,
    /// Segment indices per target, in file order
    by_target: HashMap<i32, Vec<usize>>,
}

impl EphemerisFile {
    /// Load `de440s.bsp` from memory, checking its pinned length and digest
    pub fn load(bytes: Vec<u8>) -> Result<Self> {
        Self::load_with(bytes, &Integrity::de440s())
    }

    /// Load a kernel of the same layout against a caller-supplied expectation
    pub fn load_with(bytes: Vec<u8>, integrity: &Integrity) -> Result<Self> {
        Self::from_daf(DAF::load(KernelBytes::Owned(bytes), integrity)?)
    }

    /// Memory-map a kernel file and load it
    pub fn open<P: AsRef<Path>>(path: P, integrity: &Integrity) -> Result<Self> {
        Self::from_daf(DAF::open(path, integrity)?)
    }

    fn from_daf(daf: DAF) -> Result<Self> {
        let mut segments = Vec::with_capacity(daf.summaries.len());
        let mut by_target: HashMap<i32, Vec<usize>> = HashMap::new();

        for summary in &daf.summaries {
            let segment = SegmentDescriptor::from_summary(summary, &daf)?;
            debug!("segment {}", segment.describe(true));
            by_target.entry(segment.target).or_default().push(segments.len());
            segments.push(segment);
        }

        Ok(EphemerisFile {
            daf,
            segments,
            by_target,
        })
    }

    /// Parsed file record
    pub fn header(&self) -> &FileHeader {
        &self.daf.header
    }

    /// Summary records in chain order
    pub fn summary_records(&self) -> &[SummaryRecord] {
        &self.daf.records
    }

    /// All segments in file order
    pub fn segments(&self) -> &[SegmentDescriptor] {
        &self.segments
    }

    /// Read the comment area
    pub fn comments(&self) -> String {
        self.daf.comments()
    }

    /// Earliest start and latest end over all segments
    pub fn covered_span(&self) -> Option<(f64, f64)> {
        let start = self.segments.iter().map(|s| s.start_second).reduce(f64::min)?;
        let end = self.segments.iter().map(|s| s.end_second).reduce(f64::max)?;
        Some((start, end))
    }

    /// Segment for `target` whose validity interval contains `seconds`
    pub fn segment_for(&self, target: i32, seconds: f64) -> Result<&SegmentDescriptor> {
        let indices = self
            .by_target
            .get(&target)
            .ok_or(JplephemError::BodyNotFound { target })?;

        let candidates = indices.iter().map(|&i| &self.segments[i]);
        if let Some(segment) = candidates.clone().find(|s| s.covers(seconds)) {
            return Ok(segment);
        }

        let start = candidates.clone().map(|s| s.start_second).fold(f64::INFINITY, f64::min);
        let end = candidates.map(|s| s.end_second).fold(f64::NEG_INFINITY, f64::max);
        Err(JplephemError::OutOfRangeError {
            target,
            seconds,
            start,
            end,
        })
    }

    /// State of `target` relative to its segment center at `seconds` past J2000
    pub fn evaluate(&self, target: i32, seconds: f64) -> Result<Position> {
        self.segment_for(target, seconds)?.evaluate(&self.daf, seconds)
    }

    /// State of `target` relative to the Solar System Barycenter
    ///
    /// Follows the segment centers (e.g. 399 → 3 → 0) and sums the states.
    pub fn state_from_ssb(&self, target: i32, seconds: f64) -> Result<Position> {
        let mut state = Position::zero();
        let mut body = target;

        for _ in 0..MAX_CENTER_CHAIN {
            if body == 0 {
                return Ok(state);
            }
            let segment = self.segment_for(body, seconds)?;
            state = state + segment.evaluate(&self.daf, seconds)?;
            body = segment.center;
        }

        Err(format_err(format!(
            "center chain from target {} does not reach the barycenter",
            target
        )))
    }
}

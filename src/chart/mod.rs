//! Chart assembly
//!
//! A chart combines two snapshots of the sky: the Personality at birth and
//! the Design roughly 88 days earlier, when the Sun stood 88° of arc behind
//! its birth position. Both snapshots activate gates in one bodygraph.

use log::debug;
use serde::Serialize;

use crate::bodygraph::classify::{classify, SunEarth};
use crate::bodygraph::{Bodygraph, Classification};
use crate::constants::{DESIGN_SOLAR_ARC, SUN_MEAN_RATE};
use crate::jplephem::EphemerisFile;
use crate::planetlib::{self, Body, Planet};
use crate::time::{TimeData, Timescale};
use crate::Result;

/// Seconds between the Design and Personality snapshots
///
/// The solar arc divided by the Sun's mean angular rate, rounded to whole seconds.
pub fn design_offset_seconds() -> i64 {
    (DESIGN_SOLAR_ARC / SUN_MEAN_RATE).round() as i64
}

/// One snapshot: when it was taken and where the bodies were
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HdObjects {
    pub time: TimeData,
    /// Bodies in [`Body::CHART_ORDER`]
    pub planets: Vec<Planet>,
}

impl HdObjects {
    pub fn planet(&self, body: Body) -> Option<&Planet> {
        self.planets.iter().find(|p| p.body == body)
    }

    /// Gates activated by this snapshot, one per body
    pub fn gates(&self) -> impl Iterator<Item = u8> + '_ {
        self.planets.iter().map(|p| p.hd.gate)
    }
}

/// A complete chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub personality: HdObjects,
    pub design: HdObjects,
    pub bodygraph: Bodygraph,
    pub classification: Classification,
}

/// Assembles charts against a loaded kernel
///
/// Holds only shared references, so one builder or many can be used from
/// several threads at once.
#[derive(Debug, Clone, Copy)]
pub struct ChartBuilder<'a> {
    ephemeris: &'a EphemerisFile,
    timescale: &'a Timescale,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(ephemeris: &'a EphemerisFile, timescale: &'a Timescale) -> Self {
        Self {
            ephemeris,
            timescale,
        }
    }

    /// Build the chart for a birth time
    pub fn assemble(&self, birth: &TimeData) -> Result<Chart> {
        let design_seconds = birth.ephemeris_seconds - design_offset_seconds();
        debug!(
            "assembling chart: personality {} s, design {} s",
            birth.ephemeris_seconds, design_seconds
        );

        let personality = HdObjects {
            time: birth.clone(),
            planets: planetlib::positions(self.ephemeris, birth.ephemeris_seconds)?,
        };
        let design = HdObjects {
            time: self.timescale.ephemeris(design_seconds)?,
            planets: planetlib::positions(self.ephemeris, design_seconds)?,
        };

        let bodygraph = Bodygraph::from_activations(personality.gates(), design.gates());
        let classification = classify(&bodygraph, sun_earth(&personality, &design)?);

        Ok(Chart {
            personality,
            design,
            bodygraph,
            classification,
        })
    }
}

fn sun_earth<'a>(personality: &'a HdObjects, design: &'a HdObjects) -> Result<SunEarth<'a>> {
    let hd = |objects: &'a HdObjects, body: Body| {
        objects
            .planet(body)
            .map(|p| &p.hd)
            .ok_or_else(|| crate::HdError::Missing(body.name().to_string()))
    };

    Ok(SunEarth {
        personality_sun: hd(personality, Body::Sun)?,
        personality_earth: hd(personality, Body::Earth)?,
        design_sun: hd(design, Body::Sun)?,
        design_earth: hd(design, Body::Earth)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jplephem::tests::{fixture_ephemeris, FIXTURE_START};
    use crate::time::{GregorianDateTime, TimeKind};
    use crate::HdError;
    use std::sync::Arc;

    fn birth(ts: &Timescale) -> TimeData {
        let local = GregorianDateTime::new(1985, 4, 12, 9, 15, 0).unwrap();
        ts.local(local, 3 * 3600, "Moscow").unwrap()
    }

    #[test]
    fn test_design_offset() {
        // 88° of mean solar motion is a little over 89 days
        let offset = design_offset_seconds();
        assert_eq!(offset, 7_713_915);
        assert!((offset as f64 / 86_400.0 - 89.28).abs() < 0.01);
    }

    #[test]
    fn test_assemble_fixture_chart() {
        let eph = fixture_ephemeris();
        let ts = Timescale::default();
        let birth = birth(&ts);

        let chart = ChartBuilder::new(&eph, &ts).assemble(&birth).unwrap();

        assert_eq!(chart.personality.time, birth);
        assert_eq!(chart.personality.planets.len(), 13);
        assert_eq!(chart.design.planets.len(), 13);

        let design_time = &chart.design.time;
        assert_eq!(design_time.kind, TimeKind::Ephemeris);
        assert_eq!(design_time.utc_offset, 0);
        assert!(design_time.place.is_empty());
        assert_eq!(
            birth.ephemeris_seconds - design_time.ephemeris_seconds,
            design_offset_seconds()
        );

        // Every activated gate is defined in the bodygraph
        for gate in chart.personality.gates().chain(chart.design.gates()) {
            assert!(chart.bodygraph.gate(gate).unwrap().defined);
        }
        let activations: u32 = chart
            .bodygraph
            .gates()
            .iter()
            .map(|g| g.personality + g.design)
            .sum();
        assert_eq!(activations, 26);

        let sun = chart.personality.planet(Body::Sun).unwrap();
        assert_eq!(chart.classification.profile.personality, sun.hd.line);
        assert_eq!(chart.classification.cross.gates[0], sun.hd.gate);
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let eph = fixture_ephemeris();
        let ts = Timescale::default();
        let builder = ChartBuilder::new(&eph, &ts);
        let birth = birth(&ts);

        let first = builder.assemble(&birth).unwrap();
        let second = builder.assemble(&birth).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_assembly_matches_serial() {
        let eph = Arc::new(fixture_ephemeris());
        let ts = Arc::new(Timescale::default());
        let births: Vec<TimeData> = (0..4)
            .map(|i| ts.ephemeris(i * 40_000_000).unwrap())
            .collect();

        let serial: Vec<Chart> = births
            .iter()
            .map(|b| ChartBuilder::new(&eph, &ts).assemble(b).unwrap())
            .collect();

        let handles: Vec<_> = births
            .into_iter()
            .map(|b| {
                let eph = Arc::clone(&eph);
                let ts = Arc::clone(&ts);
                std::thread::spawn(move || ChartBuilder::new(&eph, &ts).assemble(&b).unwrap())
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(serial) {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_design_before_coverage_fails() {
        let eph = fixture_ephemeris();
        let ts = Timescale::default();
        let birth = ts.ephemeris(FIXTURE_START as i64 + 1_000).unwrap();

        match ChartBuilder::new(&eph, &ts).assemble(&birth) {
            Err(HdError::Planet(e)) => assert!(e.to_string().contains("Sun")),
            other => panic!("expected planet error, got {:?}", other),
        }
    }
}

//! Time module for chart timestamps
//!
//! This module converts civil timestamps into ephemeris seconds from J2000.0
//! (JD 2451545.0) and back. Civil time is proleptic Gregorian; the difference
//! between uniform time and UT is taken from a year-keyed Delta-T table with
//! linear interpolation.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use lazy_static::lazy_static;
use log::debug;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::constants::{DAY_S, J2000};
use crate::jplephem::calendar::{calendar_to_j2000_seconds, j2000_seconds_to_calendar};

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Time out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid Delta-T table: {0}")]
    InvalidTable(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// Years past either end of the Delta-T table for which the boundary value is used
pub const DELTA_T_TOLERANCE_YEARS: f64 = 100.0;

/// Largest magnitude of ephemeris seconds accepted for calendar conversion
/// (about 30 000 years either side of J2000)
const MAX_ABS_SECONDS: i64 = 1_000_000_000_000;

/// Built-in Delta-T values (year, seconds), observed to 2024 and predicted after
const DELTA_T_TABLE: &[(i32, f64)] = &[
    (1800, 13.72),
    (1805, 12.54),
    (1810, 12.5),
    (1815, 12.63),
    (1820, 11.86),
    (1825, 10.0),
    (1830, 7.67),
    (1835, 5.92),
    (1840, 5.46),
    (1845, 6.17),
    (1850, 7.11),
    (1855, 7.25),
    (1860, 7.62),
    (1865, 6.03),
    (1870, 0.94),
    (1875, -3.09),
    (1880, -5.01),
    (1885, -5.65),
    (1890, -6.12),
    (1895, -6.19),
    (1900, -2.79),
    (1905, 3.83),
    (1910, 10.39),
    (1915, 17.09),
    (1920, 21.2),
    (1925, 23.78),
    (1930, 24.13),
    (1935, 23.82),
    (1940, 24.41),
    (1945, 26.88),
    (1950, 29.07),
    (1955, 31.05),
    (1960, 33.1),
    (1965, 35.79),
    (1970, 40.19),
    (1975, 45.45),
    (1980, 50.51),
    (1985, 54.34),
    (1990, 56.89),
    (1995, 60.8),
    (2000, 63.86),
    (2005, 64.69),
    (2006, 64.85),
    (2007, 65.15),
    (2008, 65.46),
    (2009, 65.78),
    (2010, 66.07),
    (2011, 66.32),
    (2012, 66.6),
    (2013, 66.91),
    (2014, 67.28),
    (2015, 67.64),
    (2016, 68.1),
    (2017, 68.59),
    (2018, 68.97),
    (2019, 69.22),
    (2020, 69.36),
    (2021, 69.36),
    (2022, 69.29),
    (2023, 69.2),
    (2024, 69.18),
    (2030, 72.93),
    (2035, 76.35),
    (2040, 80.06),
    (2045, 84.05),
    (2050, 88.31),
];

lazy_static! {
    static ref DEFAULT_DELTA_T: DeltaTTable = DeltaTTable {
        years: DELTA_T_TABLE.iter().map(|&(y, _)| y as f64).collect(),
        seconds: DELTA_T_TABLE.iter().map(|&(_, s)| s).collect(),
        tolerance: DELTA_T_TOLERANCE_YEARS,
    };
}

/// A proleptic Gregorian date and time to whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GregorianDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl GregorianDateTime {
    /// Build a validated date and time
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        let dt = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        dt.to_naive()?;
        Ok(dt)
    }

    /// Convert from a chrono date time, dropping sub-second precision
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    /// Convert to a chrono date time
    pub fn to_naive(&self) -> Result<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, self.minute, self.second))
            .ok_or_else(|| TimeError::InvalidDate(self.to_string()))
    }

    /// Year with the month midpoint as fraction, `year + (month - 0.5) / 12`
    pub fn decimal_year(&self) -> f64 {
        self.year as f64 + (self.month as f64 - 0.5) / 12.0
    }

    /// Seconds since midnight
    pub fn second_of_day(&self) -> i64 {
        self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64
    }

    /// Whole seconds from J2000.0 reading this value on a uniform scale
    fn j2000_seconds(&self) -> i64 {
        calendar_to_j2000_seconds(self.year, self.month, self.day, self.second_of_day())
    }

    fn from_j2000_seconds(seconds: i64) -> Self {
        let ((year, month, day), second_of_day) = j2000_seconds_to_calendar(seconds);
        Self {
            year,
            month,
            day,
            hour: (second_of_day / 3600) as u32,
            minute: (second_of_day % 3600 / 60) as u32,
            second: (second_of_day % 60) as u32,
        }
    }
}

impl fmt::Display for GregorianDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Original source of a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeKind {
    /// Given directly as ephemeris seconds (always the case for Design)
    Ephemeris,
    /// Given as UTC
    Utc,
    /// Given as local civil time with an offset and place
    Local,
}

/// A chart timestamp with its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeData {
    pub kind: TimeKind,
    /// Local civil time, only for [`TimeKind::Local`]
    pub local: Option<GregorianDateTime>,
    pub utc: GregorianDateTime,
    /// Local time minus UTC, in seconds
    pub utc_offset: i32,
    /// Seconds from J2000.0 on the ephemeris time scale
    pub ephemeris_seconds: i64,
    /// Birth place, empty unless the time was given as local time
    pub place: String,
}

impl TimeData {
    /// Julian date on the ephemeris scale
    pub fn jd(&self) -> f64 {
        J2000 + self.ephemeris_seconds as f64 / DAY_S
    }
}

/// Delta-T table keyed by year, interpolated linearly
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaTTable {
    years: Vec<f64>,
    seconds: Vec<f64>,
    tolerance: f64,
}

impl Default for DeltaTTable {
    fn default() -> Self {
        DEFAULT_DELTA_T.clone()
    }
}

impl DeltaTTable {
    /// Build a table from (year, seconds) rows
    ///
    /// Years must be strictly increasing and there must be at least two rows.
    pub fn new(entries: &[(i32, f64)]) -> Result<Self> {
        if entries.len() < 2 {
            return Err(TimeError::InvalidTable(format!(
                "need at least two rows, got {}",
                entries.len()
            )));
        }
        if let Some(w) = entries.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(TimeError::InvalidTable(format!(
                "years not strictly increasing at {} -> {}",
                w[0].0, w[1].0
            )));
        }
        if let Some(&(year, value)) = entries.iter().find(|(_, s)| !s.is_finite()) {
            return Err(TimeError::InvalidTable(format!("value {} for year {}", value, year)));
        }

        Ok(Self {
            years: entries.iter().map(|&(y, _)| y as f64).collect(),
            seconds: entries.iter().map(|&(_, s)| s).collect(),
            tolerance: DELTA_T_TOLERANCE_YEARS,
        })
    }

    /// Replace the number of years past either end for which the boundary value is used
    pub fn with_tolerance(mut self, years: f64) -> Self {
        self.tolerance = years.max(0.0);
        self
    }

    /// First tabulated year
    pub fn first_year(&self) -> f64 {
        self.years[0]
    }

    /// Last tabulated year
    pub fn last_year(&self) -> f64 {
        self.years[self.years.len() - 1]
    }

    /// Delta-T in seconds for a decimal year
    pub fn delta_t(&self, year: f64) -> Result<f64> {
        let (first, last) = (self.first_year(), self.last_year());
        if !year.is_finite() || year < first - self.tolerance || year > last + self.tolerance {
            return Err(TimeError::OutOfRange(format!(
                "year {:.3} outside Delta-T table {}..{} (tolerance {} years)",
                year, first, last, self.tolerance
            )));
        }

        Ok(interpolate(year, &self.years, &self.seconds))
    }
}

/// Linear interpolation, holding the boundary values outside the table
fn interpolate(x: f64, x_values: &[f64], y_values: &[f64]) -> f64 {
    match x_values.binary_search_by(|val| val.total_cmp(&x)) {
        Ok(i) => y_values[i],
        Err(0) => y_values[0],
        Err(i) if i >= x_values.len() => y_values[y_values.len() - 1],
        Err(i) => {
            let (x0, x1) = (x_values[i - 1], x_values[i]);
            let (y0, y1) = (y_values[i - 1], y_values[i]);
            y0 + (x - x0) / (x1 - x0) * (y1 - y0)
        }
    }
}

/// Converts between civil time and ephemeris seconds
#[derive(Debug, Clone, Default)]
pub struct Timescale {
    delta_t_table: DeltaTTable,
}

impl Timescale {
    /// Create a timescale over a custom Delta-T table
    pub fn new(delta_t_table: DeltaTTable) -> Self {
        Self { delta_t_table }
    }

    /// The Delta-T table in use
    pub fn delta_t_table(&self) -> &DeltaTTable {
        &self.delta_t_table
    }

    /// Delta-T in seconds for a UTC date
    pub fn delta_t(&self, utc: &GregorianDateTime) -> Result<f64> {
        self.delta_t_table.delta_t(utc.decimal_year())
    }

    /// Local civil time with `utc_offset` seconds east of UTC to ephemeris seconds
    pub fn to_ephemeris_seconds(&self, local: &GregorianDateTime, utc_offset: i32) -> Result<i64> {
        let utc = to_utc(local, utc_offset)?;
        let delta_t = self.delta_t(&utc)?;
        Ok(utc.j2000_seconds() + delta_t.round() as i64)
    }

    /// Ephemeris seconds to UTC
    ///
    /// Delta-T depends on the UTC date being solved for, so the estimate is
    /// refined once from the first guess.
    pub fn to_gregorian(&self, seconds: i64) -> Result<GregorianDateTime> {
        if seconds.abs() > MAX_ABS_SECONDS {
            return Err(TimeError::OutOfRange(format!(
                "{} s from J2000 cannot be placed on the calendar",
                seconds
            )));
        }

        let shift = |utc: &GregorianDateTime| -> Result<GregorianDateTime> {
            let delta_t = self.delta_t(utc)?.round() as i64;
            Ok(GregorianDateTime::from_j2000_seconds(seconds - delta_t))
        };

        let guess = GregorianDateTime::from_j2000_seconds(seconds);
        shift(&shift(&guess)?)
    }

    /// Timestamp given as local civil time at a place
    pub fn local(
        &self,
        local: GregorianDateTime,
        utc_offset: i32,
        place: &str,
    ) -> Result<TimeData> {
        let utc = to_utc(&local, utc_offset)?;
        let ephemeris_seconds = self.to_ephemeris_seconds(&local, utc_offset)?;
        debug!("local {} ({:+} s) -> {} s", local, utc_offset, ephemeris_seconds);

        Ok(TimeData {
            kind: TimeKind::Local,
            local: Some(local),
            utc,
            utc_offset,
            ephemeris_seconds,
            place: place.to_string(),
        })
    }

    /// Timestamp given as UTC
    pub fn utc(&self, utc: GregorianDateTime) -> Result<TimeData> {
        let ephemeris_seconds = self.to_ephemeris_seconds(&utc, 0)?;
        Ok(TimeData {
            kind: TimeKind::Utc,
            local: None,
            utc,
            utc_offset: 0,
            ephemeris_seconds,
            place: String::new(),
        })
    }

    /// Timestamp given as ephemeris seconds, with zero offset and no place
    pub fn ephemeris(&self, seconds: i64) -> Result<TimeData> {
        Ok(TimeData {
            kind: TimeKind::Ephemeris,
            local: None,
            utc: self.to_gregorian(seconds)?,
            utc_offset: 0,
            ephemeris_seconds: seconds,
            place: String::new(),
        })
    }

    /// The current time as UTC
    pub fn now(&self) -> Result<TimeData> {
        self.utc(GregorianDateTime::from_naive(Utc::now().naive_utc()))
    }
}

/// Shift local time to UTC
fn to_utc(local: &GregorianDateTime, utc_offset: i32) -> Result<GregorianDateTime> {
    let naive = local.to_naive()?;
    naive
        .checked_sub_signed(Duration::seconds(utc_offset as i64))
        .map(GregorianDateTime::from_naive)
        .ok_or_else(|| TimeError::OutOfRange(format!("{} shifted by {} s", local, utc_offset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn date(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> GregorianDateTime {
        GregorianDateTime::new(year, month, day, hour, min, sec).unwrap()
    }

    #[test]
    fn test_validated_construction() {
        assert!(GregorianDateTime::new(2024, 2, 29, 0, 0, 0).is_ok());
        assert!(matches!(
            GregorianDateTime::new(2023, 2, 29, 0, 0, 0),
            Err(TimeError::InvalidDate(_))
        ));
        assert!(GregorianDateTime::new(2023, 13, 1, 0, 0, 0).is_err());
        assert!(GregorianDateTime::new(2023, 1, 1, 24, 0, 0).is_err());
        assert_eq!(date(1984, 7, 9, 5, 3, 1).to_string(), "1984-07-09 05:03:01");
    }

    #[test]
    fn test_decimal_year() {
        assert_relative_eq!(date(2000, 1, 15, 0, 0, 0).decimal_year(), 2000.0 + 0.5 / 12.0);
        assert_relative_eq!(date(1999, 12, 31, 0, 0, 0).decimal_year(), 1999.0 + 11.5 / 12.0);
    }

    #[rstest]
    #[case(2000.0, 63.86)]
    #[case(2002.5, (63.86 + 64.69) / 2.0)]
    #[case(1870.0, 0.94)]
    #[case(2050.0, 88.31)]
    #[case(1750.0, 13.72)]
    #[case(2149.0, 88.31)]
    fn test_delta_t_table(#[case] year: f64, #[case] expected: f64) {
        let table = DeltaTTable::default();
        assert_relative_eq!(table.delta_t(year).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_delta_t_past_tolerance() {
        let table = DeltaTTable::default();
        assert!(matches!(table.delta_t(1699.0), Err(TimeError::OutOfRange(_))));
        assert!(matches!(table.delta_t(2150.5), Err(TimeError::OutOfRange(_))));
        assert!(table.delta_t(f64::NAN).is_err());

        let strict = DeltaTTable::default().with_tolerance(0.0);
        assert!(strict.delta_t(1799.9).is_err());
        assert!(strict.delta_t(1800.0).is_ok());
    }

    #[test]
    fn test_custom_table_validation() {
        assert!(matches!(DeltaTTable::new(&[(2000, 64.0)]), Err(TimeError::InvalidTable(_))));
        assert!(matches!(
            DeltaTTable::new(&[(2000, 64.0), (2000, 65.0)]),
            Err(TimeError::InvalidTable(_))
        ));
        assert!(DeltaTTable::new(&[(2000, 64.0), (2010, f64::NAN)]).is_err());

        let table = DeltaTTable::new(&[(2000, 60.0), (2010, 70.0)]).unwrap();
        assert_relative_eq!(table.delta_t(2005.0).unwrap(), 65.0);
        assert_eq!((table.first_year(), table.last_year()), (2000.0, 2010.0));
    }

    #[test]
    fn test_j2000_epoch() {
        let ts = Timescale::default();
        // Delta-T at 2000.0417 is 63.867 s
        let s = ts.to_ephemeris_seconds(&date(2000, 1, 1, 12, 0, 0), 0).unwrap();
        assert_eq!(s, 64);

        // The same instant given as local time three hours east of UTC
        let local = ts.to_ephemeris_seconds(&date(2000, 1, 1, 15, 0, 0), 3 * 3600).unwrap();
        assert_eq!(local, s);

        // Offsets can move the UTC date back across midnight and year end
        let west = ts.to_ephemeris_seconds(&date(2000, 1, 1, 2, 0, 0), 5 * 3600).unwrap();
        assert_eq!(west, s - 15 * 3600);
    }

    #[test]
    fn test_round_trip_within_one_second() {
        let ts = Timescale::default();
        let mut s = -3_155_000_000_i64;
        while s < 3_155_000_000 {
            let utc = ts.to_gregorian(s).unwrap();
            let back = ts.to_ephemeris_seconds(&utc, 0).unwrap();
            assert!((back - s).abs() <= 1, "{} -> {} -> {}", s, utc, back);
            s += 7_777_777;
        }
    }

    #[test]
    fn test_gregorian_out_of_range() {
        let ts = Timescale::default();
        assert!(matches!(ts.to_gregorian(i64::MAX), Err(TimeError::OutOfRange(_))));
        // Year 1500 is past the tolerance below the table
        let early = calendar_to_j2000_seconds(1500, 1, 1, 0);
        assert!(matches!(ts.to_gregorian(early), Err(TimeError::OutOfRange(_))));
    }

    #[test]
    fn test_time_data_provenance() {
        let ts = Timescale::default();

        let local = ts.local(date(1990, 6, 1, 10, 30, 0), 7200, "Berlin").unwrap();
        assert_eq!(local.kind, TimeKind::Local);
        assert_eq!(local.local, Some(date(1990, 6, 1, 10, 30, 0)));
        assert_eq!(local.utc, date(1990, 6, 1, 8, 30, 0));
        assert_eq!(local.place, "Berlin");

        let utc = ts.utc(date(1990, 6, 1, 8, 30, 0)).unwrap();
        assert_eq!(utc.kind, TimeKind::Utc);
        assert_eq!(utc.ephemeris_seconds, local.ephemeris_seconds);

        let design = ts.ephemeris(local.ephemeris_seconds - 7_700_000).unwrap();
        assert_eq!(design.kind, TimeKind::Ephemeris);
        assert_eq!(design.utc_offset, 0);
        assert!(design.place.is_empty());
        assert!(design.local.is_none());
        assert_eq!(design.utc.year, 1990);
        assert_eq!(design.utc.month, 3);
    }

    #[test]
    fn test_time_data_jd() {
        let ts = Timescale::default();
        let t = ts.ephemeris(0).unwrap();
        assert_eq!(t.jd(), J2000);
        assert_eq!(t.utc, date(2000, 1, 1, 11, 58, 56));
    }
}

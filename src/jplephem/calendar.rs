//! Calendar date and Julian date conversion functions
//!
//! This module converts between proleptic Gregorian calendar dates, Julian day
//! numbers and seconds past the J2000.0 epoch (JD 2451545.0, 2000-01-01 12:00).

use crate::constants::{DAY_S, DAY_S_I64, J2000, J2000_JDN};

/// Half a day in seconds; Julian days start at noon
const HALF_DAY_S: i64 = DAY_S_I64 / 2;

/// Convert seconds since J2000 to Julian date
pub fn seconds_to_jd(seconds: f64) -> f64 {
    J2000 + seconds / DAY_S
}

/// Convert Julian date to seconds since J2000
pub fn jd_to_seconds(jd: f64) -> f64 {
    (jd - J2000) * DAY_S
}

/// Convert a Julian day number to a proleptic Gregorian (year, month, day)
///
/// See the Explanatory Supplement to the Astronomical Almanac 15.11.
pub fn compute_calendar_date(jdn: i64) -> (i32, u32, u32) {
    let f = jdn + 1401 + (4 * jdn + 274_277) / 146_097 * 3 / 4 - 38;
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;

    (year as i32, month as u32, day as u32)
}

/// Convert a proleptic Gregorian (year, month, day) to a Julian day number
pub fn compute_julian_day(year: i32, month: u32, day: u32) -> i64 {
    let (year, month, day) = (year as i64, month as i64, day as i64);
    let janfeb = if month < 3 { 1 } else { 0 };

    1461 * (year + 4800 - janfeb) / 4 + 367 * (month - 2 + 12 * janfeb) / 12
        - 3 * ((year + 4900 - janfeb) / 100) / 4
        - 32075
        + day
}

/// Convert (year, month, day) to a Julian date, `day` may carry a fraction
pub fn compute_julian_date(year: i32, month: u32, day: f64) -> f64 {
    compute_julian_day(year, month, day.floor() as u32) as f64 - 0.5 + day.fract()
}

/// Whole seconds from J2000.0 for a calendar date and a second of the day
///
/// Exact integer arithmetic; `second_of_day` is counted from midnight.
pub fn calendar_to_j2000_seconds(year: i32, month: u32, day: u32, second_of_day: i64) -> i64 {
    (compute_julian_day(year, month, day) - J2000_JDN) * DAY_S_I64 - HALF_DAY_S + second_of_day
}

/// Split whole seconds from J2000.0 into a calendar date and a second of the day
pub fn j2000_seconds_to_calendar(seconds: i64) -> ((i32, u32, u32), i64) {
    let from_midnight = seconds + HALF_DAY_S;
    let days = from_midnight.div_euclid(DAY_S_I64);
    let second_of_day = from_midnight.rem_euclid(DAY_S_I64);

    (compute_calendar_date(J2000_JDN + days), second_of_day)
}

/// Format a Julian date as a calendar date string (YYYY-MM-DD)
pub fn format_date(jd: f64) -> String {
    let (year, month, day) = compute_calendar_date((jd + 0.5).floor() as i64);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_julian_day_conversion() {
        assert_eq!(compute_julian_day(2000, 1, 1), 2451545);
        assert_eq!(compute_julian_day(2020, 1, 1), 2458850);
        assert_eq!(compute_julian_day(1969, 7, 20), 2440423);
        assert_eq!(compute_julian_day(1900, 1, 1), 2415021);
    }

    #[test]
    fn test_calendar_date_conversion() {
        assert_eq!(compute_calendar_date(2451545), (2000, 1, 1));
        assert_eq!(compute_calendar_date(2458850), (2020, 1, 1));
        assert_eq!(compute_calendar_date(2440423), (1969, 7, 20));
        assert_eq!(compute_calendar_date(2415021), (1900, 1, 1));
        assert_eq!(compute_calendar_date(2451604), (2000, 2, 29));
    }

    #[test]
    fn test_julian_date_conversion() {
        assert_eq!(compute_julian_date(2000, 1, 1.0), 2451544.5);
        assert_eq!(compute_julian_date(2000, 1, 1.5), 2451545.0);
        assert_eq!(compute_julian_date(1969, 7, 20.0), 2440422.5);
    }

    #[test]
    fn test_j2000_seconds() {
        // J2000.0 itself is 2000-01-01 12:00:00
        assert_eq!(calendar_to_j2000_seconds(2000, 1, 1, 12 * 3600), 0);
        assert_eq!(calendar_to_j2000_seconds(2000, 1, 1, 0), -43_200);
        assert_eq!(calendar_to_j2000_seconds(2000, 1, 2, 12 * 3600), 86_400);

        assert_eq!(j2000_seconds_to_calendar(0), ((2000, 1, 1), 43_200));
        assert_eq!(j2000_seconds_to_calendar(-43_201), ((1999, 12, 31), 86_399));
    }

    #[test]
    fn test_seconds_round_trip_over_dates() {
        let dates = [(1850, 3, 1), (1900, 2, 28), (1984, 12, 31), (2024, 2, 29), (2149, 6, 15)];
        for &(y, m, d) in &dates {
            let s = calendar_to_j2000_seconds(y, m, d, 3_723);
            assert_eq!(j2000_seconds_to_calendar(s), ((y, m, d), 3_723));
        }
    }

    #[test]
    fn test_jd_seconds_helpers() {
        assert_eq!(seconds_to_jd(0.0), J2000);
        assert_eq!(jd_to_seconds(J2000 + 1.0), DAY_S);
        assert_eq!(format_date(2451545.0), "2000-01-01");
    }
}

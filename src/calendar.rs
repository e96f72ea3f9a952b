//! calendar.rs
//!
//! Proleptic Gregorian calendar dates and the arithmetic the age calculation
//! is built on: leap years, month lengths, Julian Day Numbers and weekdays.
//!
//! A `CalendarDate` can only be obtained through a validating constructor
//! (or from a chrono date), so everything past construction is total.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Month lengths for a common year, January first.
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Sakamoto's per-month weekday offsets.
const WEEKDAY_OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

/// Returned when a (day, month, year) triple does not name a calendar day.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid calendar date: day {day}, month {month}, year {year}")]
pub struct InvalidDate {
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

/// Gregorian leap-year rule:
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`. `month` must be in 1..=12.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[(month - 1) as usize]
    }
}

/// Day of the week, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated date. Field order gives the (year, month, day) ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Builds a date from raw day, month and year values.
    pub fn new(day: i32, month: i32, year: i32) -> Result<Self, InvalidDate> {
        if !Self::is_valid(day, month, year) {
            return Err(InvalidDate { day, month, year });
        }
        Ok(Self {
            year,
            month: month as u32,
            day: day as u32,
        })
    }

    /// True iff the triple names a day on the calendar, with year 1 as the
    /// earliest accepted year.
    pub fn is_valid(day: i32, month: i32, year: i32) -> bool {
        if year < 1 || !(1..=12).contains(&month) || day < 1 {
            return false;
        }
        day as u32 <= days_in_month(month as u32, year)
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Day of week via Sakamoto's method: 0 = Sunday .. 6 = Saturday.
    pub fn day_of_week(&self) -> u32 {
        let m = self.month as usize;
        let year = i64::from(self.year);
        let y = if m < 3 { year - 1 } else { year };
        let w = y + y / 4 - y / 100 + y / 400 + WEEKDAY_OFFSETS[m - 1] + i64::from(self.day);
        w.rem_euclid(7) as u32
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::ALL[self.day_of_week() as usize]
    }

    pub fn day_name(&self) -> &'static str {
        self.weekday().name()
    }

    /// Julian Day Number of this date (2000-01-01 is 2451545).
    pub fn to_julian_day_number(&self) -> i64 {
        let day = i64::from(self.day);
        let month = i64::from(self.month);
        let a = (14 - month) / 12;
        let y = i64::from(self.year) + 4800 - a;
        let m = month + 12 * a - 3;

        day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
            + y.div_euclid(400)
            - 32045
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(d: i32, m: i32, y: i32) -> CalendarDate {
        CalendarDate::new(d, m, y).unwrap()
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 2023), 28);
        assert_eq!(days_in_month(2, 1900), 28);
        assert_eq!(days_in_month(4, 2023), 30);
        assert_eq!(days_in_month(12, 2023), 31);
        let lengths: Vec<u32> = (1..=12).map(|m| days_in_month(m, 2023)).collect();
        assert_eq!(lengths, DAYS_IN_MONTH);
    }

    #[test]
    fn test_is_valid_rejects_out_of_range() {
        assert!(!CalendarDate::is_valid(31, 4, 2023));
        assert!(!CalendarDate::is_valid(1, 0, 2023));
        assert!(!CalendarDate::is_valid(1, 13, 2023));
        assert!(!CalendarDate::is_valid(0, 1, 2023));
        assert!(!CalendarDate::is_valid(1, 1, 0));
        assert!(!CalendarDate::is_valid(29, 2, 2023));
        assert!(CalendarDate::is_valid(29, 2, 2024));
        assert!(CalendarDate::is_valid(1, 1, 1));
    }

    #[test]
    fn test_new_reports_raw_triple() {
        let err = CalendarDate::new(31, 4, 2023).unwrap_err();
        assert_eq!(
            err,
            InvalidDate {
                day: 31,
                month: 4,
                year: 2023
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid calendar date: day 31, month 4, year 2023"
        );
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(date(7, 2, 2005).to_string(), "07-02-2005");
        assert_eq!(date(1, 1, 33).to_string(), "01-01-0033");
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(date(1, 1, 2000).day_of_week(), 6);
        assert_eq!(date(1, 1, 2000).day_name(), "Saturday");
        assert_eq!(date(1, 1, 2024).day_of_week(), 1);
        assert_eq!(date(1, 1, 2024).weekday(), Weekday::Monday);
        assert_eq!(date(7, 2, 2005).day_name(), "Monday");
    }

    #[test]
    fn test_day_of_week_at_largest_year() {
        for d in [date(1, 1, i32::MAX), date(28, 2, i32::MAX), date(31, 12, i32::MAX)] {
            let from_jdn = (d.to_julian_day_number() + 1).rem_euclid(7) as u32;
            assert_eq!(d.day_of_week(), from_jdn, "date = {d}");
        }
        assert_eq!(date(31, 12, i32::MAX).day_name(), date(31, 12, i32::MAX).weekday().name());
    }

    #[test]
    fn test_weekday_names() {
        let names: Vec<&str> = Weekday::ALL.iter().map(|w| w.name()).collect();
        assert_eq!(
            names,
            ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
        );
    }

    #[test]
    fn test_julian_day_number() {
        assert_eq!(date(1, 1, 2000).to_julian_day_number(), 2_451_545);
        assert_eq!(date(1, 1, 1).to_julian_day_number(), 1_721_426);
        assert_eq!(
            date(1, 3, 2024).to_julian_day_number() - date(28, 2, 2024).to_julian_day_number(),
            2
        );
    }

    #[test]
    fn test_ordering_is_year_month_day() {
        assert!(date(31, 12, 1999) < date(1, 1, 2000));
        assert!(date(30, 1, 2000) < date(1, 2, 2000));
        assert!(date(1, 2, 2000) <= date(1, 2, 2000));
        assert!(date(2, 2, 2000) > date(1, 2, 2000));
    }

    #[test]
    fn test_from_naive_date() {
        let naive = NaiveDate::from_ymd_opt(2025, 2, 7).unwrap();
        assert_eq!(CalendarDate::from(naive), date(7, 2, 2025));
    }

    #[test]
    fn test_serializes_as_display_string() {
        let json = serde_json::to_string(&date(7, 2, 2005)).unwrap();
        assert_eq!(json, "\"07-02-2005\"");
    }

    proptest! {
        #[test]
        fn leap_rule_holds(year in 1i32..100_000) {
            prop_assert_eq!(
                is_leap_year(year),
                (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
            );
            prop_assert_eq!(days_in_month(2, year) == 29, is_leap_year(year));
        }

        #[test]
        fn validity_matches_chrono(year in 1i32..=9999, month in 0i32..=13, day in 0i32..=32) {
            let chrono_ok = u32::try_from(month)
                .ok()
                .zip(u32::try_from(day).ok())
                .and_then(|(m, d)| NaiveDate::from_ymd_opt(year, m, d))
                .is_some();
            prop_assert_eq!(CalendarDate::is_valid(day, month, year), chrono_ok);
        }

        #[test]
        fn weekday_and_jdn_match_chrono(days in 0i64..3_652_059) {
            let naive = NaiveDate::from_ymd_opt(1, 1, 1).unwrap() + chrono::Duration::days(days);
            let ours = CalendarDate::from(naive);
            prop_assert_eq!(ours.day_of_week(), naive.weekday().num_days_from_sunday());
            prop_assert_eq!(
                ours.to_julian_day_number(),
                i64::from(naive.num_days_from_ce()) + 1_721_425
            );
        }

        #[test]
        fn weekday_agrees_with_jdn_for_any_year(
            year in 1i32..=i32::MAX,
            month in 1i32..=12,
            day in 1i32..=28,
        ) {
            let d = CalendarDate::new(day, month, year).unwrap();
            prop_assert_eq!(
                i64::from(d.day_of_week()),
                (d.to_julian_day_number() + 1).rem_euclid(7)
            );
        }

        #[test]
        fn jdn_advances_by_one_per_day(days in 0i64..3_652_058) {
            let naive = NaiveDate::from_ymd_opt(1, 1, 1).unwrap() + chrono::Duration::days(days);
            let next = naive.succ_opt().unwrap();
            prop_assert_eq!(
                CalendarDate::from(next).to_julian_day_number(),
                CalendarDate::from(naive).to_julian_day_number() + 1
            );
        }
    }
}

//! Where "today" comes from.
//!
//! The run reads the clock once; everything downstream takes the resulting
//! `CalendarDate` by value.

use chrono::Local;
#[cfg(test)]
use mockall::automock;

use crate::calendar::CalendarDate;

#[cfg_attr(test, automock)]
pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// Host clock, local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        Local::now().date_naive().into()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_pinned_date() {
        let date = CalendarDate::new(7, 2, 2025).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[test]
    fn test_system_clock_matches_chrono() {
        let before = CalendarDate::from(Local::now().date_naive());
        let today = SystemClock.today();
        let after = CalendarDate::from(Local::now().date_naive());
        assert!(before <= today && today <= after);
    }
}

//! age.rs
//!
//! This module provides a human-readable age calculation in the format:
//!     "X years, Y months, Z days"
//! together with the total number of elapsed days and a life-stage bucket.
//!
//! The breakdown follows calendar-aware borrowing rather than dividing a day
//! count, which is how people state their age:
//!   • day underflow borrows the length of the month before `today`
//!   • month underflow then borrows from years
//!
//! The day borrow must come first: it decides which month length is used.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::calendar::{CalendarDate, days_in_month};

/// Age breakdown between a date of birth and today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Age {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub total_days: i64,
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years, {} months, {} days",
            self.years, self.months, self.days
        )
    }
}

/// Computes the age of someone born on `dob` as of `today`.
///
/// Callers are expected to pass `dob <= today`; otherwise the result is
/// clamped to zero rather than going negative.
pub fn compute(dob: CalendarDate, today: CalendarDate) -> Age {
    let total_days = (today.to_julian_day_number() - dob.to_julian_day_number()).max(0);

    let mut years = today.year() - dob.year();
    let mut months = today.month() as i32 - dob.month() as i32;
    let mut days = today.day() as i32 - dob.day() as i32;

    // Fix day underflow
    if days < 0 {
        months -= 1;

        // Determine the previous month relative to `today`.
        let (prev_year, prev_month) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };

        // Add days from the previous month (28–31 depending on month & leap year)
        days += days_in_month(prev_month, prev_year) as i32;
    }

    // Fix month underflow
    if months < 0 {
        years -= 1;
        months += 12;
    }

    if years < 0 {
        debug!(%dob, %today, "date of birth after today, clamping age to zero");
        years = 0;
        months = 0;
        days = 0;
    }

    let age = Age {
        years,
        months,
        days,
        total_days,
    };
    debug!(%dob, %today, %age, total_days, "computed age");
    age
}

/// Coarse life-stage bucket derived from completed years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LifeStage {
    Baby,
    Child,
    Teen,
    Adult,
    Senior,
}

impl LifeStage {
    pub fn label(self) -> &'static str {
        match self {
            LifeStage::Baby => "Baby",
            LifeStage::Child => "Child",
            LifeStage::Teen => "Teen",
            LifeStage::Adult => "Adult",
            LifeStage::Senior => "Senior",
        }
    }

    /// Years covered by the bucket, for display.
    pub fn range(self) -> &'static str {
        match self {
            LifeStage::Baby => "0-2",
            LifeStage::Child => "3-12",
            LifeStage::Teen => "13-19",
            LifeStage::Adult => "20-59",
            LifeStage::Senior => "60+",
        }
    }
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.range())
    }
}

/// First matching inclusive upper bound wins.
pub fn classify(years: i32) -> LifeStage {
    match years {
        ..=2 => LifeStage::Baby,
        ..=12 => LifeStage::Child,
        ..=19 => LifeStage::Teen,
        ..=59 => LifeStage::Adult,
        _ => LifeStage::Senior,
    }
}

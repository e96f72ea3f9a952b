//! Date-of-birth entry: parsing free text and applying the acceptance rules.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use thiserror::Error;
use tracing::debug;

use crate::calendar::CalendarDate;

pub const DEFAULT_MAX_AGE_YEARS: i32 = 130;

const PROMPT: &str = "Enter your Date of Birth (DD-MM-YYYY or DD/MM/YYYY or DD MM YYYY): ";

/// Why an entered date of birth was not accepted.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DobError {
    #[error("Please type something.")]
    Empty,

    #[error("Invalid format. Example: 07 02 2005 or 07-02-2005")]
    Format,

    #[error("That date is not valid on the calendar.")]
    Invalid,

    #[error("Date of birth cannot be in the future.")]
    Future,

    #[error("Unrealistic age (>{max_age} years). Please re-enter.")]
    Unrealistic { max_age: i32 },
}

/// Splits `text` on `-`, `/`, `.` or whitespace and reads day, month and
/// year from the first three fields. Day and month must be whole integers;
/// the year is read up to its first non-digit, and anything after that is
/// ignored.
pub fn parse_date(text: &str) -> Result<(i32, i32, i32), DobError> {
    if text.is_empty() {
        return Err(DobError::Empty);
    }

    let mut fields = text
        .split(|c: char| c == '-' || c == '/' || c == '.' || c.is_whitespace())
        .filter(|s| !s.is_empty());

    let mut next = |parse: fn(&str) -> Option<i32>| {
        fields.next().and_then(parse).ok_or(DobError::Format)
    };
    let day = next(|s| s.parse().ok())?;
    let month = next(|s| s.parse().ok())?;
    let year = next(leading_integer)?;
    Ok((day, month, year))
}

/// Reads an optionally signed integer from the start of `field`.
fn leading_integer(field: &str) -> Option<i32> {
    let sign = usize::from(field.starts_with(['+', '-']));
    let digits = field[sign..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(field.len(), |end| sign + end);
    if digits == sign {
        return None;
    }
    field[..digits].parse().ok()
}

/// Applies the acceptance rules in order: calendar validity, not in the
/// future, and no older than `max_age` years.
pub fn check_dob(
    day: i32,
    month: i32,
    year: i32,
    today: CalendarDate,
    max_age: i32,
) -> Result<CalendarDate, DobError> {
    let dob = CalendarDate::new(day, month, year).map_err(|_| DobError::Invalid)?;
    if dob > today {
        return Err(DobError::Future);
    }
    if today.year() - year > max_age {
        return Err(DobError::Unrealistic { max_age });
    }
    Ok(dob)
}

/// Parses and checks a single entry.
pub fn accept_dob(text: &str, today: CalendarDate, max_age: i32) -> Result<CalendarDate, DobError> {
    let (day, month, year) = parse_date(text)?;
    check_dob(day, month, year, today, max_age)
}

/// Prompts on `output` until a line read from `input` is an acceptable date
/// of birth. Fails only on I/O errors or when `input` is exhausted.
pub fn read_dob<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    today: CalendarDate,
    max_age: i32,
) -> Result<CalendarDate> {
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .context("Failed to read date of birth")?;
        if read == 0 {
            bail!("Input closed before a valid date of birth was entered");
        }

        let entry = line.trim_end_matches(['\r', '\n']);
        match accept_dob(entry, today, max_age) {
            Ok(dob) => return Ok(dob),
            Err(e) => {
                debug!(entry, reason = ?e, "rejected date of birth");
                writeln!(output, "{e}")?;
            }
        }
    }
}

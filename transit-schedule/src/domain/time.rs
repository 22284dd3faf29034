//! Clock times printed in schedule cells.
//!
//! Schedule cells hold display text. Most cells are clock times such as
//! `"8:05"`, `"8:05A"` or `"12:30 PM"`, but cells can also hold markers that
//! aren't times at all. This module turns the former into [`NaiveTime`]s and
//! reports the latter as errors.

use chrono::NaiveTime;

/// Error returned when a cell's text is not a clock time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Parse a stop time as printed in a schedule cell.
///
/// Accepts `H:MM` or `HH:MM`, optionally followed (with or without a space)
/// by an `A`/`P`/`AM`/`PM` marker in either case. Without a marker the hour
/// is read on a 24-hour clock.
///
/// # Examples
///
/// ```
/// use transit_schedule::domain::parse_stop_time;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// assert_eq!(parse_stop_time("8:05").unwrap(), t(8, 5));
/// assert_eq!(parse_stop_time("8:05p").unwrap(), t(20, 5));
/// assert_eq!(parse_stop_time("12:30 AM").unwrap(), t(0, 30));
/// assert!(parse_stop_time("--").is_err());
/// ```
pub fn parse_stop_time(s: &str) -> Result<NaiveTime, TimeError> {
    let s = s.trim();
    let (clock, meridiem) = split_meridiem(s)?;

    let (hours, minutes) = clock
        .split_once(':')
        .ok_or_else(|| TimeError::new("expected H:MM format"))?;

    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(TimeError::new("expected H:MM format"));
    }

    let hour = parse_digits(hours).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    let minute = parse_digits(minutes).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    let hour = match meridiem {
        None if hour > 23 => return Err(TimeError::new("hour must be 0-23")),
        None => hour,
        Some(_) if hour == 0 || hour > 12 => {
            return Err(TimeError::new("hour must be 1-12 with AM/PM"));
        }
        Some(Meridiem::Am) => hour % 12,
        Some(Meridiem::Pm) => hour % 12 + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// Split a trailing AM/PM marker off the clock digits.
fn split_meridiem(s: &str) -> Result<(&str, Option<Meridiem>), TimeError> {
    let end = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map(|(i, _)| i);

    let Some(end) = end else {
        return Ok((s, None));
    };

    let meridiem = match s[end..].to_ascii_uppercase().as_str() {
        "A" | "AM" => Meridiem::Am,
        "P" | "PM" => Meridiem::Pm,
        _ => return Err(TimeError::new("unknown AM/PM marker")),
    };

    Ok((s[..end].trim_end(), Some(meridiem)))
}

fn parse_digits(s: &str) -> Option<u32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

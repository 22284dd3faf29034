//! Service day types and the operator holiday calendar.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Error returned for an unknown numeric service type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid service type: {0}")]
pub struct InvalidServiceDay(pub u8);

/// Which timetable a day runs on.
///
/// The discriminants are the operator's `serviceType` request values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceDay {
    Saturday = 1,
    SundayHoliday = 2,
    Weekday = 3,
}

impl ServiceDay {
    /// Parse a day name as used in schedule source names.
    ///
    /// `Sunday` and `Holiday` share a timetable. Unknown names fall back to
    /// the weekday timetable.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_schedule::domain::ServiceDay;
    ///
    /// assert_eq!(ServiceDay::from_name("Holiday"), ServiceDay::SundayHoliday);
    /// assert_eq!(ServiceDay::from_name("Someday"), ServiceDay::Weekday);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name {
            "Saturday" => ServiceDay::Saturday,
            "Sunday" | "Holiday" => ServiceDay::SundayHoliday,
            _ => ServiceDay::Weekday,
        }
    }

    /// The timetable running on a calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat => ServiceDay::Saturday,
            Weekday::Sun => ServiceDay::SundayHoliday,
            _ if is_holiday(date) => ServiceDay::SundayHoliday,
            _ => ServiceDay::Weekday,
        }
    }

    /// The numeric `serviceType` value.
    pub fn service_type(self) -> u8 {
        self as u8
    }

    /// Name used in source names and cache keys.
    pub fn name(self) -> &'static str {
        match self {
            ServiceDay::Saturday => "Saturday",
            ServiceDay::SundayHoliday => "Sunday",
            ServiceDay::Weekday => "Weekday",
        }
    }
}

impl TryFrom<u8> for ServiceDay {
    type Error = InvalidServiceDay;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ServiceDay::Saturday),
            2 => Ok(ServiceDay::SundayHoliday),
            3 => Ok(ServiceDay::Weekday),
            other => Err(InvalidServiceDay(other)),
        }
    }
}

impl fmt::Display for ServiceDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the operator runs its Sunday/holiday timetable on this date
/// because of a public holiday.
pub fn is_holiday(date: NaiveDate) -> bool {
    let day = date.day();
    let weekday = date.weekday();

    match date.month() {
        // New Year's Day
        1 => day == 1,
        // Memorial Day: last Monday in May
        5 => weekday == Weekday::Mon && day > 24,
        // Independence Day
        7 => day == 4,
        // Labor Day: first Monday in September
        9 => weekday == Weekday::Mon && day < 8,
        // Thanksgiving: 4th Thursday in November
        11 => weekday == Weekday::Thu && (22..=28).contains(&day),
        // Christmas Day
        12 => day == 25,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fixed_holidays() {
        assert!(is_holiday(date(2024, 1, 1)));
        assert!(is_holiday(date(2024, 7, 4)));
        assert!(is_holiday(date(2024, 12, 25)));
        assert!(!is_holiday(date(2024, 6, 4)));
        assert!(!is_holiday(date(2024, 12, 24)));
    }

    #[test]
    fn floating_holidays_2024() {
        // Memorial Day
        assert!(is_holiday(date(2024, 5, 27)));
        assert!(!is_holiday(date(2024, 5, 20)));
        // Labor Day
        assert!(is_holiday(date(2024, 9, 2)));
        assert!(!is_holiday(date(2024, 9, 9)));
        // Thanksgiving
        assert!(is_holiday(date(2024, 11, 28)));
        assert!(!is_holiday(date(2024, 11, 21)));
    }

    #[test]
    fn for_date_by_weekday() {
        assert_eq!(ServiceDay::for_date(date(2024, 3, 16)), ServiceDay::Saturday);
        assert_eq!(
            ServiceDay::for_date(date(2024, 3, 17)),
            ServiceDay::SundayHoliday
        );
        assert_eq!(ServiceDay::for_date(date(2024, 3, 15)), ServiceDay::Weekday);
    }

    #[test]
    fn weekday_holiday_uses_sunday_timetable() {
        // Thursday, July 4th 2024
        assert_eq!(
            ServiceDay::for_date(date(2024, 7, 4)),
            ServiceDay::SundayHoliday
        );
    }

    #[test]
    fn saturday_holiday_stays_saturday() {
        // Saturday, January 1st 2022
        assert_eq!(ServiceDay::for_date(date(2022, 1, 1)), ServiceDay::Saturday);
    }

    #[test]
    fn service_type_roundtrip() {
        for day in [
            ServiceDay::Saturday,
            ServiceDay::SundayHoliday,
            ServiceDay::Weekday,
        ] {
            assert_eq!(ServiceDay::try_from(day.service_type()), Ok(day));
        }
        assert_eq!(ServiceDay::try_from(0), Err(InvalidServiceDay(0)));
    }

    #[test]
    fn from_name() {
        assert_eq!(ServiceDay::from_name("Weekday"), ServiceDay::Weekday);
        assert_eq!(ServiceDay::from_name("Saturday"), ServiceDay::Saturday);
        assert_eq!(ServiceDay::from_name("Sunday"), ServiceDay::SundayHoliday);
    }
}

pub mod gregorian;
pub mod grid;
pub mod islamic;
pub mod jalali;

pub use grid::MonthGrid;

use crate::error::InvalidDateError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum CalendarSystem {
    Jalali,
    Gregorian,
    Islamic,
}

impl CalendarSystem {
    pub fn name(self) -> &'static str {
        match self {
            Self::Jalali => "jalali",
            Self::Gregorian => "gregorian",
            Self::Islamic => "islamic",
        }
    }

    pub fn year_range(self) -> (i32, i32) {
        match self {
            Self::Jalali => (jalali::MIN_YEAR, jalali::MAX_YEAR),
            Self::Gregorian => (gregorian::MIN_YEAR, gregorian::MAX_YEAR),
            Self::Islamic => (islamic::MIN_YEAR, islamic::MAX_YEAR),
        }
    }

    pub fn is_leap_year(self, year: i32) -> bool {
        match self {
            Self::Jalali => jalali::is_leap_year(year),
            Self::Gregorian => gregorian::is_leap_year(year),
            Self::Islamic => islamic::is_leap_year(year),
        }
    }

    /// Length of `month`, or 0 when the month does not exist.
    pub fn days_in_month(self, year: i32, month: u8) -> u8 {
        match self {
            Self::Jalali => jalali::days_in_month(year, month),
            Self::Gregorian => gregorian::days_in_month(year, month),
            Self::Islamic => islamic::days_in_month(year, month),
        }
    }

    /// First day of the week as conventionally printed for this calendar.
    pub fn week_start(self) -> Weekday {
        match self {
            Self::Jalali | Self::Islamic => Weekday::SAT,
            Self::Gregorian => Weekday::SUN,
        }
    }

    pub fn validate(self, year: i32, month: u8, day: u8) -> Result<(), InvalidDateError> {
        let (min, max) = self.year_range();
        if year < min || year > max {
            return Err(InvalidDateError::YearOutOfRange {
                calendar: self,
                year,
            });
        }
        if !(1..=12).contains(&month) {
            return Err(InvalidDateError::Month { month });
        }
        let max_day = self.days_in_month(year, month);
        if day < 1 || day > max_day {
            return Err(InvalidDateError::Day {
                calendar: self,
                year,
                month,
                day,
                max_day,
            });
        }
        Ok(())
    }

    /// Days since 1970-01-01. Fields must already be valid.
    pub fn to_days(self, year: i32, month: u8, day: u8) -> i64 {
        match self {
            Self::Jalali => jalali::to_days(year, month, day),
            Self::Gregorian => gregorian::to_days(year, month, day),
            Self::Islamic => islamic::to_days(year, month, day),
        }
    }

    pub fn from_days(self, days: i64) -> (i32, u8, u8) {
        match self {
            Self::Jalali => jalali::from_days(days),
            Self::Gregorian => gregorian::from_days(days),
            Self::Islamic => islamic::from_days(days),
        }
    }
}

impl std::fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Weekday(pub u8);

impl Weekday {
    pub const MON: Self = Self(0);
    pub const TUE: Self = Self(1);
    pub const WED: Self = Self(2);
    pub const THU: Self = Self(3);
    pub const FRI: Self = Self(4);
    pub const SAT: Self = Self(5);
    pub const SUN: Self = Self(6);

    pub fn short_name(self) -> &'static str {
        ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"][self.0 as usize % 7]
    }

    /// Column of this weekday in a grid whose first column is `week_start`.
    pub fn offset_from(self, week_start: Weekday) -> u8 {
        (self.0 + 7 - week_start.0 % 7) % 7
    }
}

pub fn weekday_of_days(days: i64) -> Weekday {
    Weekday(gregorian::weekday(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_of_known_dates() {
        assert_eq!(weekday_of_days(0), Weekday::THU);
        assert_eq!(weekday_of_days(gregorian::to_days(2020, 8, 22)), Weekday::SAT);
        assert_eq!(weekday_of_days(jalali::to_days(1399, 6, 1)), Weekday::SAT);
        assert_eq!(weekday_of_days(-1), Weekday::WED);
    }

    #[test]
    fn offset_from_week_start() {
        assert_eq!(Weekday::SAT.offset_from(Weekday::SAT), 0);
        assert_eq!(Weekday::SUN.offset_from(Weekday::SAT), 1);
        assert_eq!(Weekday::FRI.offset_from(Weekday::SAT), 6);
        assert_eq!(Weekday::MON.offset_from(Weekday::SUN), 1);
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        assert!(CalendarSystem::Jalali.validate(1399, 12, 30).is_ok());
        assert!(matches!(
            CalendarSystem::Jalali.validate(1400, 12, 30),
            Err(InvalidDateError::Day { max_day: 29, .. })
        ));
        assert!(matches!(
            CalendarSystem::Gregorian.validate(2020, 13, 1),
            Err(InvalidDateError::Month { month: 13 })
        ));
        assert!(matches!(
            CalendarSystem::Jalali.validate(4000, 1, 1),
            Err(InvalidDateError::YearOutOfRange { .. })
        ));
    }
}

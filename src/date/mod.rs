//! Calendar-aware date/time values.
//!
//! A [`CalendarDate`] is an instant (day number plus time of day) together
//! with the calendar its fields are expressed in. Values are immutable; every
//! transformation returns a new value.

mod format;
mod parse;
mod pattern;

pub use parse::normalize_digits;
pub use pattern::{Field, FieldSpec, Pattern, PatternToken};

use crate::calendar::{self, CalendarSystem, Weekday};
use crate::error::{InvalidDateError, ParseError};
use chrono::{Local, NaiveDateTime, Timelike};
use std::cmp::Ordering;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    calendar: CalendarSystem,
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    days: i64,
}

impl CalendarDate {
    pub fn new(calendar: CalendarSystem, year: i32, month: u8, day: u8) -> Result<Self, InvalidDateError> {
        calendar.validate(year, month, day)?;
        Ok(Self {
            calendar,
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            days: calendar.to_days(year, month, day),
        })
    }

    /// Builds a value from `[year, month, day, hour, minute, second]`;
    /// trailing fields may be omitted.
    pub fn from_fields(calendar: CalendarSystem, fields: &[i64]) -> Result<Self, InvalidDateError> {
        let get = |idx: usize, default: i64| fields.get(idx).copied().unwrap_or(default);
        let year = get(0, 1970);
        let year = i32::try_from(year).map_err(|_| InvalidDateError::YearOutOfRange {
            calendar,
            year: if year < 0 { i32::MIN } else { i32::MAX },
        })?;
        let month = u8::try_from(get(1, 1)).unwrap_or(0);
        let day = u8::try_from(get(2, 1)).unwrap_or(0);
        let hour = u8::try_from(get(3, 0)).unwrap_or(u8::MAX);
        let minute = u8::try_from(get(4, 0)).unwrap_or(u8::MAX);
        let second = u8::try_from(get(5, 0)).unwrap_or(u8::MAX);
        Self::new(calendar, year, month, day)?.with_time(hour, minute, second)
    }

    pub fn from_days(calendar: CalendarSystem, days: i64) -> Result<Self, InvalidDateError> {
        let (year, month, day) = calendar.from_days(days);
        Self::new(calendar, year, month, day)
    }

    pub fn from_unix_seconds(calendar: CalendarSystem, seconds: i64) -> Result<Self, InvalidDateError> {
        let days = seconds.div_euclid(SECONDS_PER_DAY);
        let tod = seconds.rem_euclid(SECONDS_PER_DAY);
        Self::from_days(calendar, days)?.with_time(
            (tod / 3600) as u8,
            (tod / 60 % 60) as u8,
            (tod % 60) as u8,
        )
    }

    /// Builds a value from a wall-clock date and time.
    pub fn from_naive(calendar: CalendarSystem, value: NaiveDateTime) -> Result<Self, InvalidDateError> {
        Self::from_days(calendar, calendar::gregorian::days_of(&value.date()))?.with_time(
            value.hour() as u8,
            value.minute() as u8,
            value.second() as u8,
        )
    }

    /// Current local wall-clock time. Falls back to the epoch if the clock
    /// is outside the calendar's supported years.
    pub fn now(calendar: CalendarSystem) -> Self {
        Self::from_naive(calendar, Local::now().naive_local())
            .or_else(|_| Self::from_days(calendar, 0))
            .unwrap_or(Self {
                calendar,
                year: 1970,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0,
                days: 0,
            })
    }

    pub fn parse(input: &str, pattern: &str) -> Result<Self, ParseError> {
        let pattern = Pattern::compile(pattern);
        let base = Self::now(parse::date_calendar(&pattern)?.unwrap_or(CalendarSystem::Gregorian));
        parse::parse(input, &pattern, &base)
    }

    /// Parses `input`; fields missing from the pattern are taken from `base`.
    pub fn parse_with_base(input: &str, pattern: &Pattern, base: &CalendarDate) -> Result<Self, ParseError> {
        parse::parse(input, pattern, base)
    }

    pub fn with_time(self, hour: u8, minute: u8, second: u8) -> Result<Self, InvalidDateError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(InvalidDateError::Time {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
            ..self
        })
    }

    /// This date with the time of day taken from `other`.
    pub fn with_time_of(self, other: &CalendarDate) -> Self {
        Self {
            hour: other.hour,
            minute: other.minute,
            second: other.second,
            ..self
        }
    }

    pub fn to_calendar(self, calendar: CalendarSystem) -> Result<Self, InvalidDateError> {
        if calendar == self.calendar {
            return Ok(self);
        }
        Ok(Self::from_days(calendar, self.days)?.with_time_of(&self))
    }

    pub fn calendar(&self) -> CalendarSystem {
        self.calendar
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// Days since 1970-01-01.
    pub fn to_days(&self) -> i64 {
        self.days
    }

    pub fn seconds_of_day(&self) -> i64 {
        self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64
    }

    pub fn unix_seconds(&self) -> i64 {
        self.days * SECONDS_PER_DAY + self.seconds_of_day()
    }

    /// `(year, month, day)` of this instant in another calendar.
    pub fn fields_in(&self, calendar: CalendarSystem) -> (i32, u8, u8) {
        if calendar == self.calendar {
            (self.year, self.month, self.day)
        } else {
            calendar.from_days(self.days)
        }
    }

    pub fn weekday(&self) -> Weekday {
        calendar::weekday_of_days(self.days)
    }

    pub fn days_in_month(&self) -> u8 {
        self.calendar.days_in_month(self.year, self.month)
    }

    pub fn is_leap_year(&self) -> bool {
        self.calendar.is_leap_year(self.year)
    }

    pub fn format(&self, pattern: &Pattern) -> String {
        format::format(self, pattern)
    }

    pub fn format_str(&self, pattern: &str) -> String {
        format::format(self, &Pattern::compile(pattern))
    }

    pub fn add_days(self, delta: i64) -> Result<Self, InvalidDateError> {
        Ok(Self::from_days(self.calendar, self.days + delta)?.with_time_of(&self))
    }

    pub fn add_weeks(self, delta: i64) -> Result<Self, InvalidDateError> {
        self.add_days(delta * 7)
    }

    /// Moves by whole months, clamping the day to the target month's length.
    pub fn add_months(self, delta: i64) -> Result<Self, InvalidDateError> {
        let total = self.month as i64 - 1 + delta;
        let year = self.year as i64 + total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u8;
        let year = i32::try_from(year).map_err(|_| InvalidDateError::YearOutOfRange {
            calendar: self.calendar,
            year: self.year,
        })?;
        let (min, max) = self.calendar.year_range();
        if year < min || year > max {
            return Err(InvalidDateError::YearOutOfRange {
                calendar: self.calendar,
                year,
            });
        }
        let day = self.day.min(self.calendar.days_in_month(year, month));
        Ok(Self::new(self.calendar, year, month, day)?.with_time_of(&self))
    }

    pub fn add_years(self, delta: i64) -> Result<Self, InvalidDateError> {
        self.add_months(delta * 12)
    }

    pub fn add_seconds(self, delta: i64) -> Result<Self, InvalidDateError> {
        Self::from_unix_seconds(self.calendar, self.unix_seconds() + delta)
    }

    pub fn add_minutes(self, delta: i64) -> Result<Self, InvalidDateError> {
        self.add_seconds(delta * 60)
    }

    pub fn add_hours(self, delta: i64) -> Result<Self, InvalidDateError> {
        self.add_seconds(delta * 3600)
    }

    /// First instant of the period containing this value.
    pub fn start_of(self, unit: Unit) -> Self {
        let midnight = Self {
            hour: 0,
            minute: 0,
            second: 0,
            ..self
        };
        match unit {
            Unit::Year => Self {
                month: 1,
                day: 1,
                days: self.calendar.to_days(self.year, 1, 1),
                ..midnight
            },
            Unit::Month => Self {
                day: 1,
                days: self.calendar.to_days(self.year, self.month, 1),
                ..midnight
            },
            Unit::Week => {
                let back = self.weekday().offset_from(self.calendar.week_start()) as i64;
                midnight.add_days(-back).unwrap_or(midnight)
            }
            Unit::Day => midnight,
            Unit::Hour => Self {
                minute: 0,
                second: 0,
                ..self
            },
            Unit::Minute => Self { second: 0, ..self },
        }
    }

    /// Last second of the period containing this value.
    pub fn end_of(self, unit: Unit) -> Self {
        let last_second = Self {
            hour: 23,
            minute: 59,
            second: 59,
            ..self
        };
        match unit {
            Unit::Year => {
                let day = self.calendar.days_in_month(self.year, 12);
                Self {
                    month: 12,
                    day,
                    days: self.calendar.to_days(self.year, 12, day),
                    ..last_second
                }
            }
            Unit::Month => {
                let day = self.days_in_month();
                Self {
                    day,
                    days: self.calendar.to_days(self.year, self.month, day),
                    ..last_second
                }
            }
            Unit::Week => {
                let start = self.start_of(Unit::Week);
                start
                    .add_days(6)
                    .map(|d| d.end_of(Unit::Day))
                    .unwrap_or(last_second)
            }
            Unit::Day => last_second,
            Unit::Hour => Self {
                minute: 59,
                second: 59,
                ..self
            },
            Unit::Minute => Self {
                second: 59,
                ..self
            },
        }
    }

    /// Whether both values fall in the same period, read in this value's calendar.
    pub fn is_same(&self, other: &CalendarDate, unit: Unit) -> bool {
        match other.to_calendar(self.calendar) {
            Ok(other) => self.start_of(unit) == other.start_of(unit),
            Err(_) => false,
        }
    }

    fn sort_key(&self) -> (i64, i64) {
        (self.days, self.seconds_of_day())
    }

    fn native_pattern(&self) -> &'static str {
        match self.calendar {
            CalendarSystem::Jalali => "jYYYY/jMM/jDD HH:mm:ss",
            CalendarSystem::Gregorian => "YYYY-MM-DD HH:mm:ss",
            CalendarSystem::Islamic => "iYYYY/iMM/iDD HH:mm:ss",
        }
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then(self.calendar.cmp(&other.calendar))
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_str(self.native_pattern()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jalali(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(CalendarSystem::Jalali, y, m, d).expect("valid jalali date")
    }

    #[test]
    fn array_construction_defaults_missing_fields() {
        let date = CalendarDate::from_fields(CalendarSystem::Gregorian, &[2025, 1, 1, 14, 30])
            .expect("valid fields");
        assert_eq!(date.to_string(), "2025-01-01 14:30:00");
        assert_eq!(
            date.to_calendar(CalendarSystem::Jalali).map(|d| d.to_string()),
            Ok("1403/10/12 14:30:00".to_string())
        );

        let year_only = CalendarDate::from_fields(CalendarSystem::Jalali, &[1399]).expect("year");
        assert_eq!(year_only.to_string(), "1399/01/01 00:00:00");
        assert!(CalendarDate::from_fields(CalendarSystem::Jalali, &[1399, 6, 32]).is_err());
        assert!(CalendarDate::from_fields(CalendarSystem::Jalali, &[1399, 6, 1, 24]).is_err());
    }

    #[test]
    fn end_of_day_after_parse() {
        let date = CalendarDate::parse("1399/6/1 10:10", "jYYYY/jM/jD HH:mm").expect("parse");
        assert_eq!(date.end_of(Unit::Day).to_string(), "1399/06/01 23:59:59");
        assert_eq!(date.start_of(Unit::Hour).to_string(), "1399/06/01 10:00:00");
    }

    #[test]
    fn add_days_crosses_month_and_year() {
        assert_eq!(jalali(1399, 6, 31).add_days(1), Ok(jalali(1399, 7, 1)));
        assert_eq!(jalali(1399, 12, 30).add_days(1), Ok(jalali(1400, 1, 1)));
        assert_eq!(jalali(1400, 1, 1).add_days(-1), Ok(jalali(1399, 12, 30)));
        assert_eq!(jalali(1399, 6, 1).add_weeks(2), Ok(jalali(1399, 6, 15)));
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(jalali(1399, 6, 31).add_months(1), Ok(jalali(1399, 7, 30)));
        assert_eq!(jalali(1399, 12, 30).add_years(1), Ok(jalali(1400, 12, 29)));
        assert_eq!(jalali(1399, 1, 15).add_months(-2), Ok(jalali(1398, 11, 15)));
    }

    #[test]
    fn add_time_units_roll_over_days() {
        let late = jalali(1399, 6, 31).with_time(23, 30, 0).expect("time");
        let next = late.add_minutes(45).expect("in range");
        assert_eq!(next.to_string(), "1399/07/01 00:15:00");
        assert_eq!(next.add_hours(-1).map(|d| d.to_string()), Ok("1399/06/31 23:15:00".into()));
    }

    #[test]
    fn period_bounds() {
        let date = jalali(1399, 12, 14).with_time(8, 0, 0).expect("time");
        assert_eq!(date.start_of(Unit::Year), jalali(1399, 1, 1));
        assert_eq!(date.end_of(Unit::Year).to_string(), "1399/12/30 23:59:59");
        assert_eq!(date.start_of(Unit::Month), jalali(1399, 12, 1));
        assert_eq!(date.end_of(Unit::Month).to_string(), "1399/12/30 23:59:59");
        // 1399/12/14 is a Thursday; Jalali weeks start on Saturday.
        assert_eq!(date.start_of(Unit::Week), jalali(1399, 12, 9));
        assert_eq!(date.end_of(Unit::Week).to_string(), "1399/12/15 23:59:59");
    }

    #[test]
    fn ordering_follows_the_instant() {
        let a = jalali(1399, 6, 10);
        let b = jalali(1399, 6, 10).with_time(0, 0, 1).expect("time");
        let c = jalali(1399, 6, 11);
        assert!(a < b && b < c);

        let same_day = a.to_calendar(CalendarSystem::Gregorian).expect("convert");
        assert!(a.is_same(&same_day, Unit::Day));
        assert!(!a.is_same(&c, Unit::Day));
        assert!(a.is_same(&c, Unit::Month));
    }

    #[test]
    fn format_then_parse_round_trips() {
        let patterns = [
            "jYYYY/jMM/jDD HH:mm:ss",
            "YYYY-MM-DD HH:mm:ss",
            "iYYYY/iMM/iDD H:m:s",
            "jYYYY/jM/jD HH:mm:ss",
        ];
        let start = jalali(1399, 1, 1).with_time(7, 8, 9).expect("time");
        for step in (0..2600).step_by(37) {
            let date = start.add_days(step).expect("in range");
            for source in patterns {
                let pattern = Pattern::compile(source);
                let text = date.format(&pattern);
                let parsed = CalendarDate::parse_with_base(&text, &pattern, &date).expect(&text);
                // Fields are read in the pattern's calendar.
                assert_eq!(
                    parsed.to_calendar(date.calendar()),
                    Ok(date),
                    "{source}: {text}"
                );
                if source.starts_with('j') {
                    assert_eq!(parsed, date, "{source}: {text}");
                }
            }
        }
    }

    #[test]
    fn plain_tokens_parse_as_gregorian() {
        let date = jalali(1399, 6, 10);
        let pattern = Pattern::compile("YYYY-MM-DD");
        let parsed = CalendarDate::parse_with_base(&date.format(&pattern), &pattern, &date)
            .expect("parse");
        assert_eq!(parsed.calendar(), CalendarSystem::Gregorian);
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2020, 8, 31));
        assert_eq!(parsed.to_calendar(CalendarSystem::Jalali), Ok(date));
    }

    #[test]
    fn negative_years_round_trip() {
        let pattern = Pattern::compile("jYYYY/jMM/jDD");
        let date = jalali(-61, 1, 1);
        let text = date.format(&pattern);
        assert_eq!(text, "-0061/01/01");
        assert_eq!(CalendarDate::parse_with_base(&text, &pattern, &date), Ok(date));
        let later = jalali(-1, 12, 1);
        assert_eq!(
            CalendarDate::parse_with_base(&later.format(&pattern), &pattern, &date),
            Ok(later)
        );
    }

    #[test]
    fn naive_wall_clock_keeps_local_date() {
        // 01:00 on Nowruz in Tehran is still the previous day in UTC.
        let local = chrono::NaiveDate::from_ymd_opt(2021, 3, 21)
            .and_then(|d| d.and_hms_opt(1, 0, 0))
            .expect("valid");
        let date = CalendarDate::from_naive(CalendarSystem::Jalali, local).expect("in range");
        assert_eq!(date.to_string(), "1400/01/01 01:00:00");
    }

    #[test]
    fn now_reads_the_local_clock() {
        let before = Local::now().date_naive();
        let now = CalendarDate::now(CalendarSystem::Gregorian);
        let after = Local::now().date_naive();
        let today = chrono::NaiveDate::from_ymd_opt(now.year(), now.month() as u32, now.day() as u32)
            .expect("valid");
        assert!(today == before || today == after);
    }
}

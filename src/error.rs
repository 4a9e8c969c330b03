use crate::calendar::CalendarSystem;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDateError {
    #[error("year {year} is outside the supported {calendar} range")]
    YearOutOfRange { calendar: CalendarSystem, year: i32 },
    #[error("invalid month: {month}")]
    Month { month: u8 },
    #[error("invalid day {day} for {year}/{month} in the {calendar} calendar (max {max_day})")]
    Day {
        calendar: CalendarSystem,
        year: i32,
        month: u8,
        day: u8,
        max_day: u8,
    },
    #[error("invalid time {hour:02}:{minute:02}:{second:02}")]
    Time { hour: u8, minute: u8, second: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} at position {position} of {input:?}")]
    Mismatch {
        input: String,
        position: usize,
        expected: String,
    },
    #[error("unexpected trailing input {rest:?}")]
    TrailingInput { rest: String },
    #[error("pattern {pattern:?} mixes {first} and {second} date fields")]
    MixedCalendars {
        pattern: String,
        first: CalendarSystem,
        second: CalendarSystem,
    },
    #[error("empty input")]
    Empty,
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown locale {0:?}")]
    UnknownLocale(String),
    #[error("invalid `{field}` value {value:?}: {source}")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("`from` ({from}) is after `to` ({to})")]
    InvertedBoundary { from: String, to: String },
    #[error("invalid disable pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

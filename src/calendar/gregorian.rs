use chrono::{Datelike, NaiveDate};

pub const MIN_YEAR: i32 = -9999;
pub const MAX_YEAR: i32 = 9999;

/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_CE: i64 = 719_163;

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month as u32, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month as u32 + 1, 1)
    };
    next.map_or(31, |next| (next - first).num_days() as u8)
}

/// Days since 1970-01-01 for a proleptic Gregorian date. Fields must
/// already be valid.
pub fn to_days(year: i32, month: u8, day: u8) -> i64 {
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .map_or(0, |date| days_of(&date))
}

pub fn from_days(days: i64) -> (i32, u8, u8) {
    match date_of(days) {
        Some(date) => (date.year(), date.month() as u8, date.day() as u8),
        // Outside chrono's range; the year fails validation downstream.
        None => (if days < 0 { i32::MIN } else { i32::MAX }, 1, 1),
    }
}

pub fn days_of(date: &NaiveDate) -> i64 {
    date.num_days_from_ce() as i64 - UNIX_EPOCH_CE
}

pub fn date_of(days: i64) -> Option<NaiveDate> {
    let ce = i32::try_from(days + UNIX_EPOCH_CE).ok()?;
    NaiveDate::from_num_days_from_ce_opt(ce)
}

/// Weekday of a day number, Monday = 0.
pub fn weekday(days: i64) -> u8 {
    date_of(days).map_or_else(
        || (days + 3).rem_euclid(7) as u8,
        |date| date.weekday().num_days_from_monday() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_day_zero() {
        assert_eq!(to_days(1970, 1, 1), 0);
        assert_eq!(from_days(0), (1970, 1, 1));
    }

    #[test]
    fn converts_fixture_dates() {
        let days = to_days(2020, 8, 31);
        assert_eq!(days, 18505);
        assert_eq!(from_days(days), (2020, 8, 31));
        assert_eq!(from_days(to_days(1900, 2, 28) + 1), (1900, 3, 1));
        assert_eq!(from_days(to_days(2024, 2, 28) + 1), (2024, 2, 29));
        assert_eq!(from_days(-1), (1969, 12, 31));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2021, 9), 30);
        assert_eq!(days_in_month(2021, 12), 31);
        assert_eq!(days_in_month(2021, 13), 0);
        assert!(is_leap_year(2000) && !is_leap_year(1900));
    }

    #[test]
    fn weekday_follows_chrono() {
        assert_eq!(weekday(0), 3);
        assert_eq!(weekday(to_days(2020, 8, 31)), 0);
        assert_eq!(from_days(i64::MAX / 2).1, 1);
    }
}

//! Tabular Islamic calendar (civil epoch, 11 leap years per 30-year cycle).

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Julian day number of 1 Muharram 1 AH.
const EPOCH_JDN: i64 = 1_948_440;
const UNIX_EPOCH_JDN: i64 = 2_440_588;

pub fn is_leap_year(year: i32) -> bool {
    (14 + 11 * year as i64).rem_euclid(30) < 11
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        12 if is_leap_year(year) => 30,
        1..=12 if month % 2 == 1 => 30,
        1..=12 => 29,
        _ => 0,
    }
}

fn to_jdn(year: i32, month: u8, day: u8) -> i64 {
    let y = year as i64;
    let m = month as i64;
    day as i64 + (59 * (m - 1) + 1) / 2 + (y - 1) * 354 + (3 + 11 * y).div_euclid(30) + EPOCH_JDN
        - 1
}

pub fn to_days(year: i32, month: u8, day: u8) -> i64 {
    to_jdn(year, month, day) - UNIX_EPOCH_JDN
}

pub fn from_days(days: i64) -> (i32, u8, u8) {
    let jdn = days + UNIX_EPOCH_JDN;
    let year = (30 * (jdn - EPOCH_JDN) + 10646).div_euclid(10631) as i32;
    let since_new_year = jdn - (29 + to_jdn(year, 1, 1));
    let month = ((2 * since_new_year + 58).div_euclid(59) + 1).clamp(1, 12) as u8;
    let day = (jdn - to_jdn(year, month, 1) + 1) as u8;
    (year, month, day)
}

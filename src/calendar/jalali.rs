//! Jalali (Solar Hijri) arithmetic.
//!
//! Leap years follow the break table used by the Iranian calendar
//! authorities; the table is exact for Jalali years `-61..=3177`.

use super::gregorian;

pub const MIN_YEAR: i32 = -61;
pub const MAX_YEAR: i32 = 3177;

const BREAKS: [i64; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Offset between Julian day numbers and days since 1970-01-01.
const UNIX_EPOCH_JDN: i64 = 2_440_588;

struct YearInfo {
    /// Years since the last leap year (0 means `jy` is leap).
    leap: i64,
    gregorian_year: i64,
    /// Day of March on which Farvardin 1st falls.
    march: i64,
}

fn year_info(jy: i64) -> YearInfo {
    let gregorian_year = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + ((n % 33) + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    YearInfo {
        leap,
        gregorian_year,
        march,
    }
}

fn gregorian_to_jdn(gy: i64, gm: i64, gd: i64) -> i64 {
    let d = (gy + (gm - 8) / 6 + 100_100) * 1461 / 4 + (153 * ((gm + 9) % 12) + 2) / 5 + gd
        - 34_840_408;
    d - (gy + 100_100 + (gm - 8) / 6) / 100 * 3 / 4 + 752
}

pub fn is_valid_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

pub fn is_leap_year(year: i32) -> bool {
    is_valid_year(year) && year_info(year as i64).leap == 0
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        12 => {
            if is_leap_year(year) {
                30
            } else {
                29
            }
        }
        _ => 0,
    }
}

/// Days since 1970-01-01 for a Jalali date. The year must be in range.
pub fn to_days(year: i32, month: u8, day: u8) -> i64 {
    let info = year_info(year as i64);
    let jm = month as i64;
    let jdn = gregorian_to_jdn(info.gregorian_year, 3, info.march) + (jm - 1) * 31
        - jm / 7 * (jm - 7)
        + day as i64
        - 1;
    jdn - UNIX_EPOCH_JDN
}

pub fn from_days(days: i64) -> (i32, u8, u8) {
    let (gy, _, _) = gregorian::from_days(days);
    let mut jy = gy as i64 - 621;
    let info = year_info(jy);
    let first_day = gregorian_to_jdn(gy as i64, 3, info.march) - UNIX_EPOCH_JDN;

    let mut k = days - first_day;
    if k >= 0 {
        if k <= 185 {
            return (jy as i32, (1 + k / 31) as u8, (k % 31 + 1) as u8);
        }
        k -= 186;
    } else {
        jy -= 1;
        k += 179;
        if info.leap == 1 {
            k += 1;
        }
    }
    (jy as i32, (7 + k / 30) as u8, (k % 30 + 1) as u8)
}

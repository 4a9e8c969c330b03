use super::CalendarDate;
use super::pattern::{Field, Pattern, PatternToken};
use crate::calendar::CalendarSystem;
use crate::error::ParseError;

/// Rewrites Persian and Arabic-Indic digits as ASCII.
pub fn normalize_digits(input: &str) -> String {
    input
        .chars()
        .map(|ch| match ch {
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (ch as u32 - 0x06F0) as u8),
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (ch as u32 - 0x0660) as u8),
            _ => ch,
        })
        .collect()
}

/// Calendar the pattern's date fields are written in, if it has any.
pub fn date_calendar(pattern: &Pattern) -> Result<Option<CalendarSystem>, ParseError> {
    let mut found: Option<CalendarSystem> = None;
    for spec in pattern.fields().filter(|spec| spec.field.is_date()) {
        match found {
            None => found = Some(spec.calendar),
            Some(first) if first != spec.calendar => {
                return Err(ParseError::MixedCalendars {
                    pattern: pattern.as_str().to_string(),
                    first,
                    second: spec.calendar,
                });
            }
            Some(_) => {}
        }
    }
    Ok(found)
}

pub fn parse(input: &str, pattern: &Pattern, base: &CalendarDate) -> Result<CalendarDate, ParseError> {
    let input = normalize_digits(input.trim());
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let calendar = date_calendar(pattern)?.unwrap_or(base.calendar());
    let (base_year, base_month, base_day) = base.fields_in(calendar);
    let mut year = base_year as i64;
    let mut month = base_month as i64;
    let mut day = base_day as i64;
    let (mut hour, mut minute, mut second) = if pattern.has_time_fields() {
        (0, 0, 0)
    } else {
        (base.hour() as i64, base.minute() as i64, base.second() as i64)
    };

    let mut pos = 0usize;
    for token in pattern.tokens() {
        let rest = &input[pos..];
        match token {
            PatternToken::Literal(text) => {
                if !rest.starts_with(text.as_str()) {
                    return Err(ParseError::Mismatch {
                        input: input.clone(),
                        position: pos,
                        expected: format!("{text:?}"),
                    });
                }
                pos += text.len();
            }
            PatternToken::Field(spec) => {
                let negative = matches!(spec.field, Field::Year) && rest.starts_with('-');
                let sign = usize::from(negative);
                let rest = &rest[sign..];
                let width = rest
                    .bytes()
                    .take(spec.field.max_digits())
                    .take_while(u8::is_ascii_digit)
                    .count();
                if width == 0 {
                    return Err(ParseError::Mismatch {
                        input: input.clone(),
                        position: pos,
                        expected: spec.field.describe().to_string(),
                    });
                }
                let value: i64 = rest[..width].parse().unwrap_or_default();
                let value = if negative { -value } else { value };
                pos += sign + width;
                match spec.field {
                    Field::Year => year = value,
                    Field::YearShort => year = base_year as i64 - (base_year as i64).rem_euclid(100) + value,
                    Field::Month => month = value,
                    Field::Day => day = value,
                    Field::Hour => hour = value,
                    Field::Minute => minute = value,
                    Field::Second => second = value,
                }
            }
        }
    }

    if pos < input.len() {
        return Err(ParseError::TrailingInput {
            rest: input[pos..].to_string(),
        });
    }

    let date = CalendarDate::from_fields(calendar, &[year, month, day, hour, minute, second])?;
    Ok(date)
}

use super::CalendarDate;
use super::pattern::{Field, FieldSpec, Pattern, PatternToken};

pub fn format(date: &CalendarDate, pattern: &Pattern) -> String {
    let mut out = String::new();
    for token in pattern.tokens() {
        match token {
            PatternToken::Literal(text) => out.push_str(text),
            PatternToken::Field(spec) => write_field(&mut out, date, spec),
        }
    }
    out
}

fn write_field(out: &mut String, date: &CalendarDate, spec: &FieldSpec) {
    use std::fmt::Write;

    let (year, month, day) = date.fields_in(spec.calendar);
    let value = match spec.field {
        Field::Year => year as i64,
        Field::YearShort => (year as i64).rem_euclid(100),
        Field::Month => month as i64,
        Field::Day => day as i64,
        Field::Hour => date.hour() as i64,
        Field::Minute => date.minute() as i64,
        Field::Second => date.second() as i64,
    };
    let width = match (spec.field, spec.padded) {
        (_, false) => 1,
        (Field::Year, true) => 4,
        (_, true) => 2,
    };
    if value < 0 {
        out.push('-');
    }
    let _ = write!(out, "{:0width$}", value.unsigned_abs());
}

#[cfg(test)]
mod tests {
    use crate::calendar::CalendarSystem;
    use crate::date::{CalendarDate, Pattern};

    #[test]
    fn formats_same_instant_in_each_calendar() {
        let date = CalendarDate::new(CalendarSystem::Jalali, 1399, 6, 10)
            .and_then(|d| d.with_time(9, 5, 0))
            .expect("valid date");

        assert_eq!(date.format(&Pattern::compile("jYYYY/jMM/jDD")), "1399/06/10");
        assert_eq!(date.format(&Pattern::compile("YYYY-MM-DD")), "2020-08-31");
        assert_eq!(date.format(&Pattern::compile("iYYYY/iM/iD")), "1442/1/12");
        assert_eq!(date.format(&Pattern::compile("jYY/jM/jD H:mm:ss")), "99/6/10 9:05:00");
    }

    #[test]
    fn negative_years_keep_four_digits() {
        let date = CalendarDate::new(CalendarSystem::Jalali, -5, 1, 1).expect("valid date");
        assert_eq!(date.format(&Pattern::compile("jYYYY/jMM/jDD")), "-0005/01/01");
        assert_eq!(date.format(&Pattern::compile("jYY")), "95");
    }

    #[test]
    fn escaped_text_survives_formatting() {
        let date = CalendarDate::new(CalendarSystem::Gregorian, 2020, 9, 1).expect("valid date");
        assert_eq!(
            date.format(&Pattern::compile("[on] YYYY.MM.DD")),
            "on 2020.09.01"
        );
    }
}

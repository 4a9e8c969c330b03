use super::config::Mode;
use super::selection::Selection;
use crate::core::value::Value;
use crate::date::Pattern;

pub const RANGE_SEPARATOR: &str = " - ";
pub const LIST_SEPARATOR: &str = ", ";

/// Model value of a committed selection.
pub fn model_value(selection: &Selection, mode: Mode, pattern: &Pattern) -> Value {
    match selection {
        Selection::Empty => Value::None,
        Selection::Single(date) => Value::Text(date.format(pattern)),
        Selection::Range {
            start,
            end: Some(end),
        } => Value::List(vec![start.format(pattern), end.format(pattern)]),
        Selection::Range { end: None, .. } => Value::None,
        Selection::Multiple(dates) if dates.is_empty() => Value::None,
        Selection::Multiple(dates) => Value::List(dates.iter().map(|d| d.format(pattern)).collect()),
    }
    .normalized(mode)
}

/// Text shown in the input(s). Dual input yields `[start, end]`; otherwise a
/// single field, empty while a range is incomplete.
pub fn input_texts(selection: &Selection, dual_input: bool, pattern: &Pattern) -> Vec<String> {
    match selection {
        Selection::Range { start, end } if dual_input => vec![
            start.format(pattern),
            end.map(|d| d.format(pattern)).unwrap_or_default(),
        ],
        Selection::Empty if dual_input => vec![String::new(), String::new()],
        Selection::Empty => vec![String::new()],
        Selection::Single(date) => vec![date.format(pattern)],
        Selection::Range {
            start,
            end: Some(end),
        } => vec![format!(
            "{}{RANGE_SEPARATOR}{}",
            start.format(pattern),
            end.format(pattern)
        )],
        Selection::Range { end: None, .. } => vec![String::new()],
        Selection::Multiple(dates) => vec![
            dates
                .iter()
                .map(|d| d.format(pattern))
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
        ],
    }
}

impl Value {
    /// Empty range/multiple values are reported as an empty list rather than `None`.
    fn normalized(self, mode: Mode) -> Self {
        match (self, mode) {
            (Value::None, Mode::Range | Mode::Multiple) => Value::List(Vec::new()),
            (value, _) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarSystem;
    use crate::date::CalendarDate;

    fn day(d: u8) -> CalendarDate {
        CalendarDate::new(CalendarSystem::Jalali, 1399, 6, d).expect("valid")
    }

    fn fa() -> Pattern {
        Pattern::compile("jYYYY/jMM/jDD")
    }

    #[test]
    fn range_output_joins_endpoints() {
        let selection = Selection::Range {
            start: day(10),
            end: Some(day(15)),
        };
        assert_eq!(
            input_texts(&selection, false, &fa()),
            vec!["1399/06/10 - 1399/06/15".to_string()]
        );
        assert_eq!(
            model_value(&selection, Mode::Range, &fa()),
            Value::List(vec!["1399/06/10".into(), "1399/06/15".into()])
        );
    }

    #[test]
    fn incomplete_range_is_blank_unless_dual() {
        let selection = Selection::Range {
            start: day(3),
            end: None,
        };
        assert_eq!(input_texts(&selection, false, &fa()), vec![String::new()]);
        assert_eq!(
            input_texts(&selection, true, &fa()),
            vec!["1399/06/03".to_string(), String::new()]
        );
        assert_eq!(model_value(&selection, Mode::Range, &fa()), Value::List(vec![]));
    }

    #[test]
    fn single_and_multiple_outputs() {
        assert_eq!(
            model_value(&Selection::Single(day(6)), Mode::Single, &fa()),
            Value::Text("1399/06/06".into())
        );
        assert_eq!(model_value(&Selection::Empty, Mode::Single, &fa()), Value::None);

        let many = Selection::Multiple(vec![day(1), day(2)]);
        assert_eq!(
            input_texts(&many, false, &fa()),
            vec!["1399/06/01, 1399/06/02".to_string()]
        );
        assert_eq!(
            model_value(&many, Mode::Multiple, &fa()).as_list().map(<[String]>::len),
            Some(2)
        );
    }
}

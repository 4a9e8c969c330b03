use super::config::{DisableSpec, PickerType};
use crate::date::{CalendarDate, Pattern, Unit};
use crate::error::{ConfigError, ParseError};
use regex::Regex;
use std::sync::Arc;

pub type DatePredicate = Arc<dyn Fn(&CalendarDate) -> bool + Send + Sync>;

/// Everything a rule needs besides the candidate date.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub kind: PickerType,
    /// Pattern dates are rendered in before a regex rule is matched. This
    /// is the model pattern, so it does not change with the active locale.
    pub pattern: &'a Pattern,
}

/// A date read from config. `whole_day` is set when the text carried no
/// time of day, so it stands for every minute of that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDate {
    pub date: CalendarDate,
    pub whole_day: bool,
}

impl ConfigDate {
    pub fn exact(date: CalendarDate) -> Self {
        Self {
            date,
            whole_day: false,
        }
    }

    pub fn day(date: CalendarDate) -> Self {
        Self {
            date: date.start_of(Unit::Day),
            whole_day: true,
        }
    }

    /// Earliest instant covered, for a `from` limit.
    pub fn first(&self) -> CalendarDate {
        self.date
    }

    /// Latest instant covered, for a `to` limit.
    pub fn last(&self) -> CalendarDate {
        if self.whole_day {
            self.date.end_of(Unit::Day)
        } else {
            self.date
        }
    }
}

#[derive(Clone)]
pub enum DisableRule {
    /// Matched at the picker type's granularity.
    Dates(Vec<CalendarDate>),
    /// Matched by calendar day, whatever the time of day.
    Days(Vec<CalendarDate>),
    Predicate(DatePredicate),
    Pattern(Regex),
    Any(Vec<DisableRule>),
}

impl DisableRule {
    pub fn predicate(f: impl Fn(&CalendarDate) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    /// Builds a rule from config; `parse` reads the listed date strings.
    pub fn from_spec(
        spec: &DisableSpec,
        mut parse: impl FnMut(&str) -> Result<ConfigDate, ParseError>,
    ) -> Result<Self, ConfigError> {
        let values = match spec {
            DisableSpec::Date(value) => std::slice::from_ref(value),
            DisableSpec::Dates(values) => values.as_slice(),
            DisableSpec::Pattern { pattern } => return Ok(Self::Pattern(Regex::new(pattern)?)),
        };
        let mut exact = Vec::new();
        let mut days = Vec::new();
        for value in values {
            let read = parse(value).map_err(|source| ConfigError::InvalidDate {
                field: "disable",
                value: value.to_string(),
                source,
            })?;
            if read.whole_day {
                days.push(read.date);
            } else {
                exact.push(read.date);
            }
        }
        Ok(match (exact.is_empty(), days.is_empty()) {
            (false, false) => Self::Any(vec![Self::Dates(exact), Self::Days(days)]),
            (false, true) => Self::Dates(exact),
            _ => Self::Days(days),
        })
    }

    pub fn is_disabled(&self, date: &CalendarDate, ctx: &RuleContext<'_>) -> bool {
        match self {
            Self::Dates(dates) => dates.iter().any(|d| ctx.kind.same_slot(d, date)),
            Self::Days(days) => days.iter().any(|d| d.to_days() == date.to_days()),
            Self::Predicate(f) => f(date),
            Self::Pattern(re) => re.is_match(&date.format(ctx.pattern)),
            Self::Any(rules) => rules.iter().any(|rule| rule.is_disabled(date, ctx)),
        }
    }

    /// Combines two optional rules.
    pub fn merge(first: Option<Self>, second: Option<Self>) -> Option<Self> {
        match (first, second) {
            (Some(Self::Any(mut rules)), Some(other)) => {
                rules.push(other);
                Some(Self::Any(rules))
            }
            (Some(a), Some(b)) => Some(Self::Any(vec![a, b])),
            (a, b) => a.or(b),
        }
    }
}

impl std::fmt::Debug for DisableRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dates(dates) => f.debug_tuple("Dates").field(dates).finish(),
            Self::Days(days) => f.debug_tuple("Days").field(days).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Self::Any(rules) => f.debug_tuple("Any").field(rules).finish(),
        }
    }
}

/// Inclusive `from`/`to` limits on selectable values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boundary {
    pub from: Option<CalendarDate>,
    pub to: Option<CalendarDate>,
}

impl Boundary {
    pub fn new(
        from: Option<CalendarDate>,
        to: Option<CalendarDate>,
        kind: PickerType,
    ) -> Result<Self, ConfigError> {
        if let (Some(from), Some(to)) = (&from, &to)
            && kind.slot_key(from) > kind.slot_key(to)
        {
            return Err(ConfigError::InvertedBoundary {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: &CalendarDate, kind: PickerType) -> bool {
        let key = kind.slot_key(date);
        self.from.as_ref().is_none_or(|from| kind.slot_key(from) <= key)
            && self.to.as_ref().is_none_or(|to| key <= kind.slot_key(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarSystem, Weekday};

    fn jalali(day: u8) -> CalendarDate {
        CalendarDate::new(CalendarSystem::Jalali, 1399, 6, day).expect("valid")
    }

    fn ctx(pattern: &Pattern) -> RuleContext<'_> {
        RuleContext {
            kind: PickerType::Date,
            pattern,
        }
    }

    #[test]
    fn explicit_dates_match_whole_day() {
        let pattern = Pattern::compile("jYYYY/jMM/jDD");
        let rule = DisableRule::Dates(vec![jalali(5)]);
        let later_same_day = jalali(5).with_time(13, 0, 0).expect("time");
        assert!(rule.is_disabled(&later_same_day, &ctx(&pattern)));
        assert!(!rule.is_disabled(&jalali(6), &ctx(&pattern)));
    }

    #[test]
    fn predicate_disables_fridays() {
        let pattern = Pattern::compile("jYYYY/jMM/jDD");
        let rule = DisableRule::predicate(|d| d.weekday() == Weekday::FRI);
        // 1399/06/07 is a Friday.
        assert!(rule.is_disabled(&jalali(7), &ctx(&pattern)));
        assert!(!rule.is_disabled(&jalali(8), &ctx(&pattern)));
    }

    #[test]
    fn pattern_matches_formatted_text() {
        let pattern = Pattern::compile("jYYYY/jMM/jDD");
        let spec = DisableSpec::Pattern {
            pattern: r"/0[5-6]$".into(),
        };
        let rule = DisableRule::from_spec(&spec, |_| Err(ParseError::Empty)).expect("regex");
        assert!(rule.is_disabled(&jalali(5), &ctx(&pattern)));
        assert!(rule.is_disabled(&jalali(6), &ctx(&pattern)));
        assert!(!rule.is_disabled(&jalali(7), &ctx(&pattern)));
    }

    #[test]
    fn from_spec_reports_bad_dates_and_regex() {
        let bad_date = DisableRule::from_spec(&DisableSpec::Date("nope".into()), |_| {
            Err(ParseError::Empty)
        });
        assert!(matches!(
            bad_date,
            Err(ConfigError::InvalidDate { field: "disable", .. })
        ));
        let bad_regex = DisableRule::from_spec(
            &DisableSpec::Pattern {
                pattern: "(".into(),
            },
            |_| Err(ParseError::Empty),
        );
        assert!(matches!(bad_regex, Err(ConfigError::Pattern(_))));
    }

    #[test]
    fn whole_day_dates_ignore_time_of_day() {
        let pattern = Pattern::compile("jYYYY/jMM/jDD HH:mm");
        let spec = DisableSpec::Dates(vec!["day".into(), "minute".into()]);
        let rule = DisableRule::from_spec(&spec, |value| {
            Ok(match value {
                "day" => ConfigDate::day(jalali(5).with_time(9, 0, 0).expect("time")),
                _ => ConfigDate::exact(jalali(6).with_time(10, 0, 0).expect("time")),
            })
        })
        .expect("dates");
        let at = |day: u8, hour: u8| jalali(day).with_time(hour, 15, 0).expect("time");
        let ctx = RuleContext {
            kind: PickerType::DateTime,
            pattern: &pattern,
        };
        assert!(rule.is_disabled(&at(5, 0), &ctx));
        assert!(rule.is_disabled(&at(5, 23), &ctx));
        assert!(!rule.is_disabled(&at(6, 10), &ctx));
        let ten = jalali(6).with_time(10, 0, 0).expect("time");
        assert!(rule.is_disabled(&ten, &ctx));
    }

    #[test]
    fn config_date_bounds_cover_the_day() {
        let day = ConfigDate::day(jalali(5).with_time(12, 0, 0).expect("time"));
        assert_eq!(day.first().to_string(), "1399/06/05 00:00:00");
        assert_eq!(day.last().to_string(), "1399/06/05 23:59:59");
        let exact = ConfigDate::exact(jalali(5));
        assert_eq!(exact.first(), exact.last());
    }

    #[test]
    fn merge_flattens_into_any() {
        let pattern = Pattern::compile("jYYYY/jMM/jDD");
        let merged = DisableRule::merge(
            Some(DisableRule::Dates(vec![jalali(1)])),
            Some(DisableRule::predicate(|d| d.day() == 2)),
        )
        .expect("merged");
        assert!(merged.is_disabled(&jalali(1), &ctx(&pattern)));
        assert!(merged.is_disabled(&jalali(2), &ctx(&pattern)));
        assert!(!merged.is_disabled(&jalali(3), &ctx(&pattern)));
        assert!(DisableRule::merge(None, None).is_none());
    }

    #[test]
    fn boundary_is_inclusive_and_ordered() {
        let boundary =
            Boundary::new(Some(jalali(3)), Some(jalali(20)), PickerType::Date).expect("ordered");
        assert!(boundary.contains(&jalali(3), PickerType::Date));
        assert!(boundary.contains(&jalali(20), PickerType::Date));
        assert!(!boundary.contains(&jalali(21), PickerType::Date));
        assert!(!boundary.contains(&jalali(2), PickerType::Date));

        assert!(matches!(
            Boundary::new(Some(jalali(20)), Some(jalali(3)), PickerType::Date),
            Err(ConfigError::InvertedBoundary { .. })
        ));
    }
}

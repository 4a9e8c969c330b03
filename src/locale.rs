use crate::calendar::{CalendarSystem, Weekday};
use crate::error::ConfigError;
use crate::picker::PickerType;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub code: &'static str,
    pub calendar: CalendarSystem,
    pub direction: Direction,
    pub week_start: Weekday,
    pub month_names: [&'static str; 12],
    /// Short weekday names, Monday first.
    pub weekday_names: [&'static str; 7],
    pub date_pattern: &'static str,
    pub time_pattern: &'static str,
    pub datetime_pattern: &'static str,
}

impl Locale {
    pub fn builtin(code: &str) -> Option<Locale> {
        match code.trim() {
            "fa" => Some(Self::persian()),
            "en" => Some(Self::english()),
            "ar" => Some(Self::arabic()),
            _ => None,
        }
    }

    /// Built-in locale whose native calendar is `calendar`.
    pub fn for_system(calendar: CalendarSystem) -> Locale {
        match calendar {
            CalendarSystem::Jalali => Self::persian(),
            CalendarSystem::Gregorian => Self::english(),
            CalendarSystem::Islamic => Self::arabic(),
        }
    }

    pub fn persian() -> Self {
        Self {
            code: "fa",
            calendar: CalendarSystem::Jalali,
            direction: Direction::Rtl,
            week_start: Weekday::SAT,
            month_names: [
                "فروردین",
                "اردیبهشت",
                "خرداد",
                "تیر",
                "مرداد",
                "شهریور",
                "مهر",
                "آبان",
                "آذر",
                "دی",
                "بهمن",
                "اسفند",
            ],
            weekday_names: ["د", "س", "چ", "پ", "ج", "ش", "ی"],
            date_pattern: "jYYYY/jMM/jDD",
            time_pattern: "HH:mm",
            datetime_pattern: "jYYYY/jMM/jDD HH:mm",
        }
    }

    pub fn english() -> Self {
        Self {
            code: "en",
            calendar: CalendarSystem::Gregorian,
            direction: Direction::Ltr,
            week_start: Weekday::SUN,
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            weekday_names: ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
            date_pattern: "YYYY-MM-DD",
            time_pattern: "HH:mm",
            datetime_pattern: "YYYY-MM-DD HH:mm",
        }
    }

    pub fn arabic() -> Self {
        Self {
            code: "ar",
            calendar: CalendarSystem::Islamic,
            direction: Direction::Rtl,
            week_start: Weekday::SAT,
            month_names: [
                "محرم",
                "صفر",
                "ربيع الأول",
                "ربيع الآخر",
                "جمادى الأولى",
                "جمادى الآخرة",
                "رجب",
                "شعبان",
                "رمضان",
                "شوال",
                "ذو القعدة",
                "ذو الحجة",
            ],
            weekday_names: ["ن", "ث", "ر", "خ", "ج", "س", "ح"],
            date_pattern: "iYYYY/iMM/iDD",
            time_pattern: "HH:mm",
            datetime_pattern: "iYYYY/iMM/iDD HH:mm",
        }
    }

    pub fn pattern_for(&self, kind: PickerType) -> &'static str {
        match kind {
            PickerType::Date => self.date_pattern,
            PickerType::Time => self.time_pattern,
            PickerType::DateTime => self.datetime_pattern,
        }
    }

    pub fn month_name(&self, month: u8) -> &'static str {
        self.month_names[(month as usize).saturating_sub(1) % 12]
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &'static str {
        self.weekday_names[weekday.0 as usize % 7]
    }

    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }
}

/// Ordered set of locales built from a combined string such as `"fa,en"`.
/// The first locale is the primary one and starts out active.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    locales: IndexMap<&'static str, Locale>,
    active: usize,
}

impl LocaleSet {
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let mut locales = IndexMap::new();
        for code in spec.split(',').map(str::trim).filter(|code| !code.is_empty()) {
            let locale =
                Locale::builtin(code).ok_or_else(|| ConfigError::UnknownLocale(code.to_string()))?;
            locales.entry(locale.code).or_insert(locale);
        }
        if locales.is_empty() {
            return Err(ConfigError::UnknownLocale(spec.to_string()));
        }
        Ok(Self { locales, active: 0 })
    }

    pub fn primary(&self) -> &Locale {
        &self.locales[0]
    }

    pub fn active(&self) -> &Locale {
        &self.locales[self.active]
    }

    /// Whether more than one locale is configured.
    pub fn is_combined(&self) -> bool {
        self.locales.len() > 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.values()
    }

    /// Makes the next locale active, wrapping around, and returns it.
    pub fn switch_next(&mut self) -> &Locale {
        self.active = (self.active + 1) % self.locales.len();
        self.active()
    }

    pub fn for_calendar(&self, calendar: CalendarSystem) -> Option<&Locale> {
        self.locales.values().find(|locale| locale.calendar == calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_locale_keeps_order_and_dedups() {
        let set = LocaleSet::parse("fa, en,fa").expect("known locales");
        let codes: Vec<_> = set.iter().map(|l| l.code).collect();
        assert_eq!(codes, vec!["fa", "en"]);
        assert_eq!(set.active().calendar, CalendarSystem::Jalali);
        assert!(set.is_combined());
        assert!(!LocaleSet::parse("en").expect("known locale").is_combined());
    }

    #[test]
    fn switch_cycles_through_locales() {
        let mut set = LocaleSet::parse("fa,en").expect("known locales");
        assert_eq!(set.switch_next().code, "en");
        assert_eq!(set.switch_next().code, "fa");
        assert_eq!(set.primary().code, "fa");
    }

    #[test]
    fn rejects_unknown_locale() {
        assert!(matches!(
            LocaleSet::parse("fa,de"),
            Err(ConfigError::UnknownLocale(code)) if code == "de"
        ));
        assert!(LocaleSet::parse(" , ").is_err());
    }

    #[test]
    fn locale_lookups() {
        let fa = Locale::persian();
        assert_eq!(fa.month_name(6), "شهریور");
        assert_eq!(fa.weekday_name(Weekday::SAT), "ش");
        assert_eq!(fa.pattern_for(PickerType::DateTime), "jYYYY/jMM/jDD HH:mm");
        assert!(fa.is_rtl());
        assert!(!Locale::english().is_rtl());
    }
}

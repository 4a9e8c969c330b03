use crate::calendar::CalendarSystem;
use crate::date::CalendarDate;
use crate::error::ConfigError;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Single,
    Range,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PickerType {
    #[default]
    Date,
    Time,
    DateTime,
}

impl PickerType {
    /// Key two values are compared by: whole days for `date`, minutes for
    /// `datetime`, minutes of the day for `time`.
    pub fn slot_key(self, date: &CalendarDate) -> (i64, i64) {
        let minutes = date.seconds_of_day() / 60;
        match self {
            PickerType::Date => (date.to_days(), 0),
            PickerType::DateTime => (date.to_days(), minutes),
            PickerType::Time => (0, minutes),
        }
    }

    pub fn same_slot(self, a: &CalendarDate, b: &CalendarDate) -> bool {
        self.slot_key(a) == self.slot_key(b)
    }

    pub fn has_calendar(self) -> bool {
        self != PickerType::Time
    }
}

/// Calendar typed input is read in. `auto` follows the active locale and
/// falls back to the other configured locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InputCalendar {
    #[default]
    Auto,
    Jalali,
    Gregorian,
    Islamic,
}

impl InputCalendar {
    pub fn explicit(self) -> Option<CalendarSystem> {
        match self {
            InputCalendar::Auto => None,
            InputCalendar::Jalali => Some(CalendarSystem::Jalali),
            InputCalendar::Gregorian => Some(CalendarSystem::Gregorian),
            InputCalendar::Islamic => Some(CalendarSystem::Islamic),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum DisableSpec {
    Date(String),
    Dates(Vec<String>),
    Pattern { pattern: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    pub mode: Mode,
    #[serde(rename = "type")]
    pub kind: PickerType,
    /// One locale code or a comma separated list (`"fa,en"`).
    pub locale: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub disable: Option<DisableSpec>,
    pub dual_input: bool,
    pub auto_submit: bool,
    /// Pattern of the bound model value; defaults to the primary locale's input pattern.
    pub format: Option<String>,
    pub input_calendar: InputCalendar,
    pub clearable: bool,

    // Presentational options, stored for the renderer.
    pub color: Option<String>,
    pub modal: bool,
    pub styles: IndexMap<String, String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Single,
            kind: PickerType::Date,
            locale: "fa".to_string(),
            from: None,
            to: None,
            disable: None,
            dual_input: false,
            auto_submit: true,
            format: None,
            input_calendar: InputCalendar::Auto,
            clearable: false,
            color: None,
            modal: false,
            styles: IndexMap::new(),
        }
    }
}

impl PickerConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a config file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(PickerConfig)).unwrap_or_default()
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_disable(mut self, disable: DisableSpec) -> Self {
        self.disable = Some(disable);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_persian_picker() {
        let config = PickerConfig::from_yaml_str("{}").expect("empty config");
        assert_eq!(config.mode, Mode::Single);
        assert_eq!(config.kind, PickerType::Date);
        assert_eq!(config.locale, "fa");
        assert!(config.auto_submit);
        assert_eq!(config.input_calendar, InputCalendar::Auto);
    }

    #[test]
    fn parses_yaml_with_all_disable_shapes() {
        let config = PickerConfig::from_yaml_str(
            "mode: range\ntype: datetime\nlocale: fa,en\ndisable: 1399/06/05\ndual_input: true\n",
        )
        .expect("yaml");
        assert_eq!(config.mode, Mode::Range);
        assert_eq!(config.kind, PickerType::DateTime);
        assert_eq!(config.disable, Some(DisableSpec::Date("1399/06/05".into())));
        assert!(config.dual_input);

        let list = PickerConfig::from_yaml_str("disable: [1399/06/05, 1399/06/06]").expect("yaml");
        assert!(matches!(list.disable, Some(DisableSpec::Dates(ref d)) if d.len() == 2));

        let pattern =
            PickerConfig::from_yaml_str("disable:\n  pattern: '/0[5-6]$'").expect("yaml");
        assert!(matches!(pattern.disable, Some(DisableSpec::Pattern { .. })));
    }

    #[test]
    fn parses_json_and_rejects_unknown_fields() {
        let config = PickerConfig::from_json_str(
            r#"{"mode":"multiple","auto_submit":false,"input_calendar":"gregorian","styles":{"width":"200px"}}"#,
        )
        .expect("json");
        assert_eq!(config.mode, Mode::Multiple);
        assert!(!config.auto_submit);
        assert_eq!(config.input_calendar.explicit(), Some(CalendarSystem::Gregorian));
        assert_eq!(config.styles.get("width").map(String::as_str), Some("200px"));

        assert!(matches!(
            PickerConfig::from_json_str(r#"{"mdoe":"range"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn schema_lists_options() {
        let schema = PickerConfig::json_schema();
        let props = &schema["properties"];
        assert!(props.get("mode").is_some());
        assert!(props.get("type").is_some());
        assert!(props.get("input_calendar").is_some());
    }

    #[test]
    fn slot_keys_follow_type_granularity() {
        let a = CalendarDate::new(CalendarSystem::Jalali, 1399, 6, 10)
            .and_then(|d| d.with_time(8, 30, 10))
            .expect("valid");
        let b = a.with_time(8, 30, 59).expect("valid");
        let c = a.add_days(1).expect("valid");
        assert!(PickerType::Date.same_slot(&a, &b));
        assert!(PickerType::DateTime.same_slot(&a, &b));
        assert!(!PickerType::DateTime.same_slot(&a, &c));
        assert!(PickerType::Time.same_slot(&a, &c));
    }
}

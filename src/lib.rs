pub mod calendar;
pub mod core;
pub mod date;
pub mod error;
pub mod locale;
pub mod picker;
pub mod runtime;
pub mod terminal;

pub use crate::calendar::{CalendarSystem, MonthGrid, Weekday};
pub use crate::core::value::Value;
pub use crate::date::{CalendarDate, Pattern, Unit};
pub use crate::error::{ConfigError, InvalidDateError, ParseError};
pub use crate::locale::{Direction, Locale, LocaleSet};
pub use crate::picker::{Mode, Picker, PickerConfig, PickerType, Selection};
pub use crate::runtime::{InteractionResult, PickerAction, PickerCommand, RejectReason};

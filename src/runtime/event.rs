use crate::core::value::Value;
use crate::date::CalendarDate;
use crate::error::ParseError;
use crate::picker::PickOutcome;

/// Why an interaction left the selection untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Disabled(CalendarDate),
    OutOfBounds(CalendarDate),
    /// The range would span the given disabled date.
    CrossesDisabled(CalendarDate),
    Parse(ParseError),
    /// An end date without a start, or one before it.
    RangeOrder,
    /// Submit while a range still waits for its end.
    Incomplete,
    NotClearable,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Disabled(date) => write!(f, "{date} is disabled"),
            RejectReason::OutOfBounds(date) => write!(f, "{date} is outside the allowed range"),
            RejectReason::CrossesDisabled(date) => {
                write!(f, "range would include disabled date {date}")
            }
            RejectReason::Parse(err) => write!(f, "{err}"),
            RejectReason::RangeOrder => f.write_str("range end must follow its start"),
            RejectReason::Incomplete => f.write_str("selection is incomplete"),
            RejectReason::NotClearable => f.write_str("picker is not clearable"),
        }
    }
}

/// Actions emitted by the picker in `InteractionResult`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    /// The bound value was committed.
    ValueChanged(Value),
    Picked(PickOutcome),
    Rejected(RejectReason),
    Opened,
    Closed,
    LocaleSwitched(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<PickerAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: PickerAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            handled: true,
            request_render: false,
            actions: vec![PickerAction::Rejected(reason)],
        }
    }

    pub fn push(&mut self, action: PickerAction) {
        self.handled = true;
        self.request_render = true;
        self.actions.push(action);
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.actions.extend(other.actions);
        self
    }

    /// Last committed value carried by this result, if any.
    pub fn value_changed(&self) -> Option<&Value> {
        self.actions.iter().rev().find_map(|action| match action {
            PickerAction::ValueChanged(value) => Some(value),
            _ => None,
        })
    }

    pub fn rejection(&self) -> Option<&RejectReason> {
        self.actions.iter().find_map(|action| match action {
            PickerAction::Rejected(reason) => Some(reason),
            _ => None,
        })
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection().is_some()
    }
}

use super::config::Mode;
use crate::calendar::CalendarSystem;
use crate::date::CalendarDate;
use crate::error::InvalidDateError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Single(CalendarDate),
    Range {
        start: CalendarDate,
        end: Option<CalendarDate>,
    },
    /// Chronologically ordered, no duplicates.
    Multiple(Vec<CalendarDate>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    SinglePicked,
    RangeStartPicked,
    RangeComplete,
    MultiplePicked(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    Picked,
    RangeStarted,
    StartReplaced,
    RangeCompleted,
    RangeRestarted,
    Added,
    Removed,
}

impl Selection {
    pub fn state(&self) -> SelectionState {
        match self {
            Selection::Empty => SelectionState::Empty,
            Selection::Single(_) => SelectionState::SinglePicked,
            Selection::Range { end: None, .. } => SelectionState::RangeStartPicked,
            Selection::Range { end: Some(_), .. } => SelectionState::RangeComplete,
            Selection::Multiple(dates) if dates.is_empty() => SelectionState::Empty,
            Selection::Multiple(dates) => SelectionState::MultiplePicked(dates.len()),
        }
    }

    /// Whether the selection can be committed as a bound value.
    pub fn is_complete(&self) -> bool {
        !matches!(self, Selection::Range { end: None, .. })
    }

    pub fn dates(&self) -> Vec<CalendarDate> {
        match self {
            Selection::Empty => Vec::new(),
            Selection::Single(date) => vec![*date],
            Selection::Range { start, end } => std::iter::once(*start).chain(*end).collect(),
            Selection::Multiple(dates) => dates.clone(),
        }
    }

    /// Most recently relevant date, used to pick the month shown on open.
    pub fn anchor(&self) -> Option<CalendarDate> {
        match self {
            Selection::Empty => None,
            Selection::Single(date) => Some(*date),
            Selection::Range { start, .. } => Some(*start),
            Selection::Multiple(dates) => dates.last().copied(),
        }
    }

    /// Same selection with every date expressed in `calendar`.
    pub fn to_calendar(&self, calendar: CalendarSystem) -> Result<Selection, InvalidDateError> {
        Ok(match self {
            Selection::Empty => Selection::Empty,
            Selection::Single(date) => Selection::Single(date.to_calendar(calendar)?),
            Selection::Range { start, end } => Selection::Range {
                start: start.to_calendar(calendar)?,
                end: end.map(|d| d.to_calendar(calendar)).transpose()?,
            },
            Selection::Multiple(dates) => Selection::Multiple(
                dates
                    .iter()
                    .map(|d| d.to_calendar(calendar))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

/// Selection transitions for one picker mode.
#[derive(Debug, Clone)]
pub struct SelectionMachine {
    mode: Mode,
    selection: Selection,
}

impl SelectionMachine {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            selection: Selection::Empty,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> SelectionState {
        self.selection.state()
    }

    /// Changing the mode always starts over from an empty selection.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.selection = Selection::Empty;
    }

    pub fn reset(&mut self) {
        self.selection = Selection::Empty;
    }

    /// Replaces the selection wholesale. The caller is responsible for it
    /// matching the current mode.
    pub fn restore(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Start of a range that still waits for its end.
    pub fn pending_start(&self) -> Option<&CalendarDate> {
        match &self.selection {
            Selection::Range { start, end: None } => Some(start),
            _ => None,
        }
    }

    pub fn pick(&mut self, date: CalendarDate) -> PickOutcome {
        let (next, outcome) = match (self.mode, std::mem::take(&mut self.selection)) {
            (Mode::Single, _) => (Selection::Single(date), PickOutcome::Picked),
            (Mode::Range, Selection::Range { start, end: None }) => {
                if date < start {
                    (
                        Selection::Range { start: date, end: None },
                        PickOutcome::StartReplaced,
                    )
                } else {
                    (
                        Selection::Range {
                            start,
                            end: Some(date),
                        },
                        PickOutcome::RangeCompleted,
                    )
                }
            }
            (Mode::Range, Selection::Range { end: Some(_), .. }) => (
                Selection::Range { start: date, end: None },
                PickOutcome::RangeRestarted,
            ),
            (Mode::Range, _) => (
                Selection::Range { start: date, end: None },
                PickOutcome::RangeStarted,
            ),
            (Mode::Multiple, Selection::Multiple(mut dates)) => {
                let outcome = match dates.binary_search(&date) {
                    Ok(idx) => {
                        dates.remove(idx);
                        PickOutcome::Removed
                    }
                    Err(idx) => {
                        dates.insert(idx, date);
                        PickOutcome::Added
                    }
                };
                (Selection::Multiple(dates), outcome)
            }
            (Mode::Multiple, _) => (Selection::Multiple(vec![date]), PickOutcome::Added),
        };
        self.selection = next;
        outcome
    }

    /// Dual-input start: keeps an existing end only if it still follows the start.
    pub fn set_range_start(&mut self, date: CalendarDate) -> bool {
        if self.mode != Mode::Range {
            return false;
        }
        let end = match &self.selection {
            Selection::Range { end: Some(end), .. } if *end >= date => Some(*end),
            _ => None,
        };
        self.selection = Selection::Range { start: date, end };
        true
    }

    /// Dual-input end: needs a start that does not come after it.
    pub fn set_range_end(&mut self, date: CalendarDate) -> bool {
        match &self.selection {
            Selection::Range { start, .. } if self.mode == Mode::Range && *start <= date => {
                self.selection = Selection::Range {
                    start: *start,
                    end: Some(date),
                };
                true
            }
            _ => false,
        }
    }
}

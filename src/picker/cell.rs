use crate::calendar::Weekday;
use crate::date::CalendarDate;

/// Per-day state handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayCell {
    /// `None` for the padding cells before the 1st and after the last day.
    pub date: Option<CalendarDate>,
    pub disabled: bool,
    pub selected: bool,
    pub start_range: bool,
    pub end_range: bool,
    pub in_range: bool,
    pub focused: bool,
    pub today: bool,
}

impl DayCell {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none()
    }

    pub fn day(&self) -> Option<u8> {
        self.date.map(|d| d.day())
    }

    /// CSS-style class names of the cell.
    pub fn class_names(&self) -> Vec<&'static str> {
        let flags = [
            (self.is_empty(), "empty"),
            (self.disabled, "disabled"),
            (self.selected, "selected"),
            (self.start_range, "start-range"),
            (self.end_range, "end-range"),
            (self.in_range, "in-range"),
            (self.focused, "focused"),
            (self.today, "today"),
        ];
        flags
            .into_iter()
            .filter_map(|(on, name)| on.then_some(name))
            .collect()
    }
}

/// One displayed month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u8,
    pub title: String,
    pub weekdays: [Weekday; 7],
    pub weekday_names: [&'static str; 7],
    pub weeks: Vec<[DayCell; 7]>,
}

impl MonthView {
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }

    pub fn cell_for_day(&self, day: u8) -> Option<&DayCell> {
        self.cells().find(|cell| cell.day() == Some(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_follow_flags() {
        assert_eq!(DayCell::empty().class_names(), vec!["empty"]);
        let date = CalendarDate::new(crate::calendar::CalendarSystem::Jalali, 1399, 6, 3)
            .expect("valid");
        let cell = DayCell {
            date: Some(date),
            selected: true,
            start_range: true,
            ..DayCell::default()
        };
        assert_eq!(cell.class_names(), vec!["selected", "start-range"]);
        assert_eq!(cell.day(), Some(3));
    }
}

use super::{CalendarSystem, Weekday, weekday_of_days};

/// Six week rows of a month, aligned to a locale's first weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub calendar: CalendarSystem,
    pub year: i32,
    pub month: u8,
    pub week_start: Weekday,

    pub cells: [[Option<u8>; 7]; 6],
}

impl MonthGrid {
    pub fn new(calendar: CalendarSystem, year: i32, month: u8, week_start: Weekday) -> Self {
        let first = weekday_of_days(calendar.to_days(year, month, 1));
        let lead = first.offset_from(week_start) as usize;
        let days = calendar.days_in_month(year, month) as usize;
        let mut cells = [[None; 7]; 6];
        for day in 1..=days {
            let pos = lead + day - 1;
            cells[pos / 7][pos % 7] = Some(day as u8);
        }
        Self {
            calendar,
            year,
            month,
            week_start,
            cells,
        }
    }

    /// Rows that contain at least one day.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<u8>; 7]> {
        self.cells.iter().filter(|row| row.iter().any(Option::is_some))
    }

    /// Weekday printed in each column.
    pub fn header(&self) -> [Weekday; 7] {
        let mut header = [Weekday::MON; 7];
        for (col, slot) in header.iter_mut().enumerate() {
            *slot = Weekday((self.week_start.0 + col as u8) % 7);
        }
        header
    }
}

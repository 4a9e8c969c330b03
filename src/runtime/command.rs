use crate::locale::Direction;

/// Arrow direction as seen on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusMove {
    Left,
    Right,
    Up,
    Down,
}

impl FocusMove {
    /// Day offset of the move. Horizontal arrows follow reading direction,
    /// so Left moves forward in a right-to-left calendar.
    pub fn day_delta(self, direction: Direction) -> i64 {
        match (self, direction) {
            (FocusMove::Left, Direction::Ltr) | (FocusMove::Right, Direction::Rtl) => -1,
            (FocusMove::Right, Direction::Ltr) | (FocusMove::Left, Direction::Rtl) => 1,
            (FocusMove::Up, _) => -7,
            (FocusMove::Down, _) => 7,
        }
    }

    /// Minute offset of the move for a time-only picker.
    pub fn minute_delta(self, direction: Direction) -> i64 {
        match self {
            FocusMove::Left | FocusMove::Right => self.day_delta(direction),
            FocusMove::Up => 60,
            FocusMove::Down => -60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    Insert(char),
    Backspace,
    /// Removes the character after the cursor.
    Delete,
    DeleteWordLeft,
    Clear,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerCommand {
    Open,
    Close,
    MoveFocus(FocusMove),
    Enter,
    Submit,
    Clear,
    SwitchLocale,
    ShowMonth(i32),
    AdjustTime { hours: i64, minutes: i64 },
    NextInput,
    PrevInput,
    Text(TextAction),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_moves_mirror_in_rtl() {
        assert_eq!(FocusMove::Left.day_delta(Direction::Rtl), 1);
        assert_eq!(FocusMove::Left.day_delta(Direction::Ltr), -1);
        assert_eq!(FocusMove::Right.day_delta(Direction::Rtl), -1);
        assert_eq!(FocusMove::Down.day_delta(Direction::Rtl), 7);
        assert_eq!(FocusMove::Up.minute_delta(Direction::Ltr), 60);
        assert_eq!(FocusMove::Right.minute_delta(Direction::Ltr), 1);
    }
}

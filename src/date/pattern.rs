use crate::calendar::CalendarSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    YearShort,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Field {
    pub fn is_date(self) -> bool {
        matches!(
            self,
            Field::Year | Field::YearShort | Field::Month | Field::Day
        )
    }

    /// Widest run of digits the field accepts when parsing.
    pub(super) fn max_digits(self) -> usize {
        match self {
            Field::Year => 4,
            _ => 2,
        }
    }

    pub(super) fn describe(self) -> &'static str {
        match self {
            Field::Year | Field::YearShort => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Second => "second",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    /// Calendar whose fields a date token reads. Plain date tokens are
    /// Gregorian; `j` and `i` prefixes select Jalali and Islamic.
    pub calendar: CalendarSystem,
    pub padded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    Field(FieldSpec),
    Literal(String),
}

/// A compiled format pattern such as `jYYYY/jMM/jDD HH:mm`.
///
/// Unknown letters are kept as literals; `[...]` escapes a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<PatternToken>,
}

impl Pattern {
    pub fn compile(source: &str) -> Self {
        Self {
            source: source.to_string(),
            tokens: tokenize(source),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    pub fn has_date_fields(&self) -> bool {
        self.fields().any(|spec| spec.field.is_date())
    }

    pub fn has_time_fields(&self) -> bool {
        self.fields().any(|spec| !spec.field.is_date())
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.tokens.iter().filter_map(|token| match token {
            PatternToken::Field(spec) => Some(spec),
            PatternToken::Literal(_) => None,
        })
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn tokenize(source: &str) -> Vec<PatternToken> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut idx = 0usize;

    while idx < chars.len() {
        let ch = chars[idx];

        if ch == '[' {
            let end = chars[idx + 1..]
                .iter()
                .position(|c| *c == ']')
                .map(|offset| idx + 1 + offset);
            if let Some(end) = end {
                literal.extend(&chars[idx + 1..end]);
                idx = end + 1;
                continue;
            }
        }

        let (calendar, letter_idx) = match ch {
            'j' if is_field_letter(chars.get(idx + 1)) => (Some(CalendarSystem::Jalali), idx + 1),
            'i' if is_field_letter(chars.get(idx + 1)) => (Some(CalendarSystem::Islamic), idx + 1),
            _ => (None, idx),
        };

        let letter = chars[letter_idx];
        let run = chars[letter_idx..]
            .iter()
            .take_while(|c| **c == letter)
            .count();

        if let Some((field, padded)) = field_for(letter, run) {
            if !literal.is_empty() {
                tokens.push(PatternToken::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(PatternToken::Field(FieldSpec {
                field,
                calendar: calendar.unwrap_or(CalendarSystem::Gregorian),
                padded,
            }));
            idx = letter_idx + run;
            continue;
        }

        if is_field_letter(Some(&letter)) {
            literal.extend(&chars[idx..letter_idx + run]);
            idx = letter_idx + run;
        } else {
            literal.push(ch);
            idx += 1;
        }
    }

    if !literal.is_empty() {
        tokens.push(PatternToken::Literal(literal));
    }
    tokens
}

fn is_field_letter(ch: Option<&char>) -> bool {
    matches!(ch, Some('Y' | 'M' | 'D' | 'H' | 'm' | 's'))
}

fn field_for(letter: char, run: usize) -> Option<(Field, bool)> {
    match (letter, run) {
        ('Y', 4) => Some((Field::Year, true)),
        ('Y', 2) => Some((Field::YearShort, true)),
        ('M', 1 | 2) => Some((Field::Month, run == 2)),
        ('D', 1 | 2) => Some((Field::Day, run == 2)),
        ('H', 1 | 2) => Some((Field::Hour, run == 2)),
        ('m', 1 | 2) => Some((Field::Minute, run == 2)),
        ('s', 1 | 2) => Some((Field::Second, run == 2)),
        _ => None,
    }
}

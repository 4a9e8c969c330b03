//! Headless date picker.
//!
//! [`Picker`] owns the selection, the focused cursor, the displayed month and
//! the input text. Every interaction returns an [`InteractionResult`]; commits
//! to the bound value arrive as [`PickerAction::ValueChanged`] in it.

mod cell;
mod config;
mod disable;
mod output;
mod selection;
mod text;


pub use cell::{DayCell, MonthView};
pub use config::{DisableSpec, InputCalendar, Mode, PickerConfig, PickerType};
pub use disable::{Boundary, ConfigDate, DatePredicate, DisableRule, RuleContext};
pub use output::{LIST_SEPARATOR, RANGE_SEPARATOR, input_texts, model_value};
pub use selection::{PickOutcome, Selection, SelectionMachine, SelectionState};
pub use text::TextField;

use crate::calendar::{CalendarSystem, MonthGrid};
use crate::core::value::Value;
use crate::date::{CalendarDate, Pattern, Unit};
use crate::error::{ConfigError, InvalidDateError, ParseError};
use crate::locale::{Locale, LocaleSet};
use crate::runtime::{
    FocusMove, InteractionResult, KeyBindings, PickerAction, PickerCommand, RejectReason,
    TextAction,
};
use crate::terminal::KeyEvent;
use tracing::{debug, warn};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Which of the two inputs a dual-input range picker is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSlot {
    #[default]
    Start,
    End,
}

impl InputSlot {
    fn index(self) -> usize {
        match self {
            InputSlot::Start => 0,
            InputSlot::End => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Picker {
    config: PickerConfig,
    locales: LocaleSet,
    /// Pattern of the bound value. Fixed for the picker's lifetime.
    model_pattern: Pattern,
    /// Pattern of the input text; follows the active locale.
    input_pattern: Pattern,
    disable: Option<DisableRule>,
    boundary: Boundary,
    machine: SelectionMachine,
    committed: Selection,
    now: CalendarDate,
    view_year: i32,
    view_month: u8,
    focused: Option<CalendarDate>,
    /// Hour and minute applied to picked days of a `datetime` picker.
    time: (u8, u8),
    inputs: [TextField; 2],
    slot: InputSlot,
    open: bool,
    bindings: KeyBindings,
}

impl Picker {
    pub fn new(config: PickerConfig) -> Result<Self, ConfigError> {
        Self::with_now(config, CalendarDate::now(CalendarSystem::Gregorian))
    }

    /// Builds a picker whose notion of "today" is pinned to `now`.
    pub fn with_now(config: PickerConfig, now: CalendarDate) -> Result<Self, ConfigError> {
        let locales = LocaleSet::parse(&config.locale)?;
        let primary = locales.primary();
        let model_pattern = Pattern::compile(
            config
                .format
                .as_deref()
                .unwrap_or_else(|| primary.pattern_for(config.kind)),
        );
        let now = now
            .to_calendar(locales.active().calendar)
            .map_err(|err| ConfigError::InvalidDate {
                field: "now",
                value: now.to_string(),
                source: ParseError::InvalidDate(err),
            })?;

        let mut picker = Self {
            machine: SelectionMachine::new(config.mode),
            input_pattern: model_pattern.clone(),
            model_pattern,
            locales,
            disable: None,
            boundary: Boundary::default(),
            committed: Selection::Empty,
            now,
            view_year: now.year(),
            view_month: now.month(),
            focused: None,
            time: (now.hour(), now.minute()),
            inputs: Default::default(),
            slot: InputSlot::Start,
            open: false,
            bindings: KeyBindings::new(),
            config,
        };
        picker.input_pattern = picker.current_input_pattern();

        let from = picker.config_date("from", picker.config.from.clone())?;
        let to = picker.config_date("to", picker.config.to.clone())?;
        picker.boundary = Boundary::new(
            from.map(|from| from.first()),
            to.map(|to| to.last()),
            picker.config.kind,
        )?;
        if let Some(spec) = picker.config.disable.clone() {
            let rule = DisableRule::from_spec(&spec, |value| picker.parse_config_text(value))?;
            picker.disable = Some(rule);
        }
        debug!(
            mode = ?picker.config.mode,
            kind = ?picker.config.kind,
            locale = picker.locales.active().code,
            "picker created"
        );
        Ok(picker)
    }

    /// Adds a rule on top of the configured `disable` option.
    pub fn with_disable_rule(mut self, rule: DisableRule) -> Self {
        self.disable = DisableRule::merge(self.disable.take(), Some(rule));
        self
    }

    pub fn with_disable_predicate(
        self,
        f: impl Fn(&CalendarDate) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.with_disable_rule(DisableRule::predicate(f))
    }

    pub fn with_key_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    fn config_date(
        &self,
        field: &'static str,
        value: Option<String>,
    ) -> Result<Option<ConfigDate>, ConfigError> {
        value
            .map(|value| {
                self.parse_config_text(&value)
                    .map_err(|source| ConfigError::InvalidDate {
                        field,
                        value,
                        source,
                    })
            })
            .transpose()
    }

    // ---- accessors ------------------------------------------------------

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }

    pub fn kind(&self) -> PickerType {
        self.config.kind
    }

    pub fn locale(&self) -> &Locale {
        self.locales.active()
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    pub fn calendar(&self) -> CalendarSystem {
        self.locales.active().calendar
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn now(&self) -> CalendarDate {
        self.now
    }

    /// Working selection, including uncommitted picks.
    pub fn selection(&self) -> &Selection {
        self.machine.selection()
    }

    pub fn state(&self) -> SelectionState {
        self.machine.state()
    }

    pub fn committed(&self) -> &Selection {
        &self.committed
    }

    pub fn focused(&self) -> Option<CalendarDate> {
        self.focused
    }

    pub fn view(&self) -> (i32, u8) {
        (self.view_year, self.view_month)
    }

    pub fn time(&self) -> (u8, u8) {
        self.time
    }

    pub fn active_slot(&self) -> InputSlot {
        self.slot
    }

    pub fn input(&self, slot: InputSlot) -> &TextField {
        &self.inputs[slot.index()]
    }

    pub fn model_pattern(&self) -> &Pattern {
        &self.model_pattern
    }

    pub fn input_pattern(&self) -> &Pattern {
        &self.input_pattern
    }

    /// Bound value of the committed selection.
    pub fn value(&self) -> Value {
        model_value(&self.committed, self.mode(), &self.model_pattern)
    }

    /// Current input text: one entry, or two with `dual_input`.
    pub fn input_texts(&self) -> Vec<String> {
        let count = if self.config.dual_input { 2 } else { 1 };
        self.inputs[..count]
            .iter()
            .map(|field| field.value().to_string())
            .collect()
    }

    // ---- rules ----------------------------------------------------------

    pub fn is_disabled(&self, date: &CalendarDate) -> bool {
        self.is_disabled_as(date, self.config.kind)
    }

    fn is_disabled_as(&self, date: &CalendarDate, kind: PickerType) -> bool {
        let ctx = RuleContext {
            kind,
            pattern: &self.model_pattern,
        };
        self.disable
            .as_ref()
            .is_some_and(|rule| rule.is_disabled(date, &ctx))
    }

    /// Whether `date` may be picked at all.
    pub fn is_selectable(&self, date: &CalendarDate) -> bool {
        self.check(date).is_ok()
    }

    fn check(&self, date: &CalendarDate) -> Result<(), RejectReason> {
        if !self.boundary.contains(date, self.config.kind) {
            return Err(RejectReason::OutOfBounds(*date));
        }
        if self.is_disabled(date) {
            return Err(RejectReason::Disabled(*date));
        }
        Ok(())
    }

    /// First disabled day strictly between two range endpoints.
    fn first_disabled_between(
        &self,
        start: &CalendarDate,
        end: &CalendarDate,
    ) -> Option<CalendarDate> {
        if self.disable.is_none() || !self.config.kind.has_calendar() {
            return None;
        }
        ((start.to_days() + 1)..end.to_days()).find_map(|days| {
            let day = CalendarDate::from_days(self.calendar(), days).ok()?;
            self.is_disabled_as(&day, PickerType::Date).then_some(day)
        })
    }

    fn check_range(&self, start: &CalendarDate, end: &CalendarDate) -> Result<(), RejectReason> {
        if end < start {
            return Err(RejectReason::RangeOrder);
        }
        match self.first_disabled_between(start, end) {
            Some(blocked) => Err(RejectReason::CrossesDisabled(blocked)),
            None => Ok(()),
        }
    }

    // ---- text -----------------------------------------------------------

    fn current_input_pattern(&self) -> Pattern {
        let locale = match self.config.input_calendar.explicit() {
            Some(calendar) => self
                .locales
                .for_calendar(calendar)
                .cloned()
                .unwrap_or_else(|| Locale::for_system(calendar)),
            None => self.locales.active().clone(),
        };
        Pattern::compile(locale.pattern_for(self.config.kind))
    }

    /// Patterns typed text is tried against, most specific first.
    fn text_patterns(&self) -> Vec<Pattern> {
        let mut patterns = vec![self.input_pattern.clone()];
        if self.config.input_calendar.explicit().is_none() {
            let kind = self.config.kind;
            let others = self
                .locales
                .iter()
                .map(|locale| Pattern::compile(locale.pattern_for(kind)))
                .chain(std::iter::once(self.model_pattern.clone()));
            for pattern in others {
                if !patterns.iter().any(|p| p.as_str() == pattern.as_str()) {
                    patterns.push(pattern);
                }
            }
        }
        patterns
    }

    /// Reads one date as typed into an input.
    pub fn parse_text(&self, text: &str) -> Result<CalendarDate, ParseError> {
        self.parse_first(text, self.text_patterns())
            .map(|(date, _)| date)
    }

    /// Dates in the config may be written in the model pattern or any
    /// configured locale's pattern, whatever the input calendar. A
    /// `datetime` picker also reads plain dates, which cover the whole day.
    fn parse_config_text(&self, text: &str) -> Result<ConfigDate, ParseError> {
        let kind = self.config.kind;
        let mut patterns: Vec<Pattern> = std::iter::once(self.model_pattern.clone())
            .chain(
                self.locales
                    .iter()
                    .map(|locale| Pattern::compile(locale.pattern_for(kind))),
            )
            .chain(std::iter::once(self.input_pattern.clone()))
            .collect();
        if kind == PickerType::DateTime {
            patterns.extend(
                self.locales
                    .iter()
                    .map(|locale| Pattern::compile(locale.pattern_for(PickerType::Date))),
            );
        }
        let (date, pattern) = self.parse_first(text, patterns)?;
        Ok(if kind.has_calendar() && !pattern.has_time_fields() {
            ConfigDate::day(date)
        } else {
            ConfigDate::exact(date)
        })
    }

    /// Reads `text` with the first pattern that accepts it.
    fn parse_first(
        &self,
        text: &str,
        patterns: Vec<Pattern>,
    ) -> Result<(CalendarDate, Pattern), ParseError> {
        let mut first_error = None;
        for pattern in patterns {
            match CalendarDate::parse_with_base(text, &pattern, &self.now) {
                Ok(date) => {
                    let date = self.normalize(date).map_err(ParseError::InvalidDate)?;
                    return Ok((date, pattern));
                }
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        Err(first_error.unwrap_or(ParseError::Empty))
    }

    fn normalize(&self, date: CalendarDate) -> Result<CalendarDate, InvalidDateError> {
        let date = date.to_calendar(self.calendar())?;
        Ok(match self.config.kind {
            PickerType::Date => date.start_of(Unit::Day),
            PickerType::DateTime | PickerType::Time => date.start_of(Unit::Minute),
        })
    }

    fn sync_inputs(&mut self) {
        let texts = input_texts(
            self.machine.selection(),
            self.config.dual_input,
            &self.input_pattern,
        );
        for (field, text) in self.inputs.iter_mut().zip(texts) {
            field.sync(text);
        }
    }

    // ---- operations -----------------------------------------------------

    pub fn open(&mut self) -> InteractionResult {
        if self.open {
            return InteractionResult::ignored();
        }
        self.open = true;
        let anchor = self.committed.anchor().unwrap_or(self.now);
        if let Ok(anchor) = anchor.to_calendar(self.calendar()) {
            self.show(&anchor);
        }
        debug!("picker opened");
        InteractionResult::with_action(PickerAction::Opened)
    }

    /// Closes the picker, dropping picks that were never committed.
    pub fn close(&mut self) -> InteractionResult {
        let was_open = std::mem::replace(&mut self.open, false);
        self.machine.restore(self.committed.clone());
        self.focused = None;
        self.slot = InputSlot::Start;
        self.sync_inputs();
        if was_open {
            debug!("picker closed");
            InteractionResult::with_action(PickerAction::Closed)
        } else {
            InteractionResult::handled()
        }
    }

    /// Commits the working selection and closes.
    pub fn submit(&mut self) -> InteractionResult {
        if !self.machine.selection().is_complete() {
            warn!("submit rejected: range has no end");
            return InteractionResult::rejected(RejectReason::Incomplete);
        }
        let result = self.commit();
        result.merge(self.close())
    }

    pub fn clear(&mut self) -> InteractionResult {
        if !self.config.clearable {
            return InteractionResult::rejected(RejectReason::NotClearable);
        }
        self.machine.reset();
        self.focused = None;
        self.sync_inputs();
        self.commit()
    }

    /// Switches the selection mode; the selection starts over.
    pub fn set_mode(&mut self, mode: Mode) -> InteractionResult {
        self.config.mode = mode;
        self.machine.set_mode(mode);
        self.committed = Selection::Empty;
        self.sync_inputs();
        debug!(?mode, "mode changed");
        InteractionResult::with_action(PickerAction::ValueChanged(self.value()))
    }

    /// Makes the next configured locale active. Dates keep their instant and
    /// are re-expressed in the new locale's calendar.
    pub fn switch_locale(&mut self) -> InteractionResult {
        if !self.locales.is_combined() {
            return InteractionResult::ignored();
        }
        let view_first = CalendarDate::new(self.calendar(), self.view_year, self.view_month, 1);
        let calendar = self.locales.switch_next().calendar;
        let code = self.locales.active().code;

        if let Ok(selection) = self.machine.selection().to_calendar(calendar) {
            self.machine.restore(selection);
        }
        if let Ok(committed) = self.committed.to_calendar(calendar) {
            self.committed = committed;
        }
        self.focused = self.focused.and_then(|d| d.to_calendar(calendar).ok());
        if let Ok(now) = self.now.to_calendar(calendar) {
            self.now = now;
        }
        let anchor = self
            .focused
            .or_else(|| view_first.ok().and_then(|d| d.to_calendar(calendar).ok()));
        if let Some(anchor) = anchor {
            self.show(&anchor);
        }
        self.input_pattern = self.current_input_pattern();
        self.sync_inputs();
        debug!(locale = code, "locale switched");
        InteractionResult::with_action(PickerAction::LocaleSwitched(code))
    }

    /// Moves the displayed month by `delta` months.
    pub fn show_month(&mut self, delta: i32) -> InteractionResult {
        let (min_year, max_year) = self.calendar().year_range();
        let index = self.view_year as i64 * 12 + (self.view_month as i64 - 1) + delta as i64;
        let year = index.div_euclid(12);
        if year < min_year as i64 || year > max_year as i64 {
            return InteractionResult::ignored();
        }
        self.view_year = year as i32;
        self.view_month = index.rem_euclid(12) as u8 + 1;
        InteractionResult::handled()
    }

    fn show(&mut self, date: &CalendarDate) {
        self.view_year = date.year();
        self.view_month = date.month();
    }

    /// Shifts the pending time of day, wrapping around midnight. A single
    /// time-bearing selection follows the new time.
    pub fn adjust_time(&mut self, hours: i64, minutes: i64) -> InteractionResult {
        if self.config.kind == PickerType::Date {
            return InteractionResult::ignored();
        }
        let total = (self.time.0 as i64 * 60 + self.time.1 as i64 + hours * 60 + minutes)
            .rem_euclid(MINUTES_PER_DAY);
        self.time = ((total / 60) as u8, (total % 60) as u8);
        if let Some(focused) = self.focused {
            self.focused = focused.with_time(self.time.0, self.time.1, 0).ok();
        }
        match self.machine.selection().clone() {
            Selection::Single(date) => {
                let Ok(date) = date.with_time(self.time.0, self.time.1, 0) else {
                    return InteractionResult::handled();
                };
                if let Err(reason) = self.check(&date) {
                    warn!(%reason, "time adjustment rejected");
                    return InteractionResult::rejected(reason);
                }
                self.machine.restore(Selection::Single(date));
                self.selection_changed(false)
            }
            _ => InteractionResult::handled(),
        }
    }

    /// Click on a day cell (or a time slot).
    pub fn on_pick(&mut self, date: CalendarDate) -> InteractionResult {
        let date = match self.normalize(date) {
            Ok(date) if self.config.kind == PickerType::DateTime => date
                .with_time(self.time.0, self.time.1, 0)
                .unwrap_or(date),
            Ok(date) => date,
            Err(err) => return self.reject(RejectReason::Parse(ParseError::InvalidDate(err))),
        };
        if let Err(reason) = self.check(&date) {
            return self.reject(reason);
        }
        if let Some(start) = self.machine.pending_start().copied()
            && date >= start
            && let Err(reason) = self.check_range(&start, &date)
        {
            return self.reject(reason);
        }

        let outcome = self.machine.pick(date);
        debug!(?outcome, %date, "picked");
        self.focused = Some(date);
        self.show(&date);
        InteractionResult::with_action(PickerAction::Picked(outcome))
            .merge(self.selection_changed(false))
    }

    /// Arrow key: moves the focused cursor. Without a cursor the first move
    /// only places it on the 1st of the displayed month.
    pub fn on_focus_move(&mut self, step: FocusMove) -> InteractionResult {
        let direction = self.locales.active().direction;
        if self.config.kind == PickerType::Time {
            let base = match self.focused {
                Some(focused) => focused,
                None => {
                    self.focused = self.now.with_time(self.time.0, self.time.1, 0).ok();
                    return InteractionResult::handled();
                }
            };
            let minutes = (base.seconds_of_day() / 60 + step.minute_delta(direction))
                .rem_euclid(MINUTES_PER_DAY);
            self.focused = base.with_time((minutes / 60) as u8, (minutes % 60) as u8, 0).ok();
            return InteractionResult::handled();
        }

        let Some(current) = self.focused else {
            self.focused =
                CalendarDate::new(self.calendar(), self.view_year, self.view_month, 1).ok();
            return InteractionResult::handled();
        };
        match current.add_days(step.day_delta(direction)) {
            Ok(next) => {
                self.focused = Some(next);
                self.show(&next);
                InteractionResult::handled()
            }
            Err(_) => InteractionResult::ignored(),
        }
    }

    /// Enter: commits edited text if there is any, otherwise picks the
    /// focused date.
    pub fn on_enter(&mut self) -> InteractionResult {
        let slot = self.slot;
        let field = &self.inputs[slot.index()];
        if field.is_dirty() {
            let text = field.value().to_string();
            return self.on_text_commit_at(slot, &text);
        }
        match self.focused {
            Some(date) => self.on_pick(date),
            None if !self.config.auto_submit => self.submit(),
            None => InteractionResult::ignored(),
        }
    }

    pub fn on_text_commit(&mut self, text: &str) -> InteractionResult {
        self.on_text_commit_at(self.slot, text)
    }

    /// Commits typed text. Rejected text stays in the input.
    pub fn on_text_commit_at(&mut self, slot: InputSlot, text: &str) -> InteractionResult {
        let slot = if self.config.dual_input { slot } else { InputSlot::Start };
        self.inputs[slot.index()].sync(text);
        match self.apply_text(slot, text.trim()) {
            Ok(result) => result,
            Err(reason) => self.reject(reason),
        }
    }

    fn apply_text(&mut self, slot: InputSlot, text: &str) -> Result<InteractionResult, RejectReason> {
        if text.is_empty() {
            return if self.config.clearable {
                Ok(self.clear())
            } else {
                Err(RejectReason::Parse(ParseError::Empty))
            };
        }
        let read = |picker: &Self, text: &str| -> Result<CalendarDate, RejectReason> {
            let date = picker.parse_text(text).map_err(RejectReason::Parse)?;
            picker.check(&date)?;
            Ok(date)
        };

        let last = match self.machine.mode() {
            Mode::Range if self.config.dual_input => {
                let date = read(self, text)?;
                match slot {
                    InputSlot::Start => {
                        if let Some(end) = self.range_end() {
                            self.check_range(&date, &end).or_else(|reason| match reason {
                                RejectReason::RangeOrder => Ok(()),
                                other => Err(other),
                            })?;
                        }
                        self.machine.set_range_start(date);
                    }
                    InputSlot::End => {
                        let start = self.range_start().ok_or(RejectReason::RangeOrder)?;
                        self.check_range(&start, &date)?;
                        if !self.machine.set_range_end(date) {
                            return Err(RejectReason::RangeOrder);
                        }
                    }
                }
                date
            }
            Mode::Range => match text.split_once(RANGE_SEPARATOR) {
                Some((start, end)) => {
                    let start = read(self, start.trim())?;
                    let end = read(self, end.trim())?;
                    self.check_range(&start, &end)?;
                    self.machine.restore(Selection::Range {
                        start,
                        end: Some(end),
                    });
                    end
                }
                None => {
                    let date = read(self, text)?;
                    if let Some(start) = self.machine.pending_start().copied()
                        && date >= start
                    {
                        self.check_range(&start, &date)?;
                    }
                    self.machine.pick(date);
                    date
                }
            },
            Mode::Multiple => {
                let mut dates = text
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(|part| read(self, part))
                    .collect::<Result<Vec<_>, _>>()?;
                dates.sort();
                dates.dedup();
                let last = dates.last().copied().ok_or(RejectReason::Parse(ParseError::Empty))?;
                self.machine.restore(Selection::Multiple(dates));
                last
            }
            Mode::Single => {
                let date = read(self, text)?;
                self.machine.pick(date);
                date
            }
        };

        if self.config.kind == PickerType::DateTime {
            self.time = (last.hour(), last.minute());
        }
        self.focused = Some(last);
        self.show(&last);
        debug!(text, state = ?self.machine.state(), "text committed");
        Ok(self.selection_changed(true))
    }

    fn range_start(&self) -> Option<CalendarDate> {
        match self.machine.selection() {
            Selection::Range { start, .. } => Some(*start),
            _ => None,
        }
    }

    fn range_end(&self) -> Option<CalendarDate> {
        match self.machine.selection() {
            Selection::Range { end, .. } => *end,
            _ => None,
        }
    }

    fn reject(&mut self, reason: RejectReason) -> InteractionResult {
        warn!(%reason, "input rejected");
        self.inputs[self.slot.index()].mark_clean();
        InteractionResult::rejected(reason)
    }

    /// Refreshes the inputs after a selection change and applies the
    /// auto-submit policy.
    fn selection_changed(&mut self, keep_partial_text: bool) -> InteractionResult {
        let complete = self.machine.selection().is_complete();
        if complete || !keep_partial_text || self.config.dual_input {
            self.sync_inputs();
        } else {
            self.inputs[self.slot.index()].mark_clean();
        }
        if self.config.dual_input {
            self.slot = if self.machine.pending_start().is_some() {
                InputSlot::End
            } else {
                InputSlot::Start
            };
        }
        if !(self.config.auto_submit && complete) {
            return InteractionResult::handled();
        }
        let result = self.commit();
        if self.closes_on_commit() {
            result.merge(self.close())
        } else {
            result
        }
    }

    /// Auto-submit closes only when nothing is left to choose.
    fn closes_on_commit(&self) -> bool {
        self.config.kind == PickerType::Date && self.machine.mode() != Mode::Multiple
    }

    fn commit(&mut self) -> InteractionResult {
        self.committed = self.machine.selection().clone();
        let value = self.value();
        debug!(?value, "value committed");
        InteractionResult::with_action(PickerAction::ValueChanged(value))
    }

    // ---- keys -----------------------------------------------------------

    pub fn handle_key(&mut self, event: KeyEvent) -> InteractionResult {
        match self.bindings.resolve(event) {
            Some(command) => self.dispatch(command),
            None => InteractionResult::ignored(),
        }
    }

    pub fn dispatch(&mut self, command: PickerCommand) -> InteractionResult {
        match command {
            PickerCommand::Open => self.open(),
            PickerCommand::Close => self.close(),
            PickerCommand::MoveFocus(step) => {
                let opened = if self.open {
                    InteractionResult::ignored()
                } else {
                    self.open()
                };
                opened.merge(self.on_focus_move(step))
            }
            PickerCommand::Enter => self.on_enter(),
            PickerCommand::Submit => self.submit(),
            PickerCommand::Clear => self.clear(),
            PickerCommand::SwitchLocale => self.switch_locale(),
            PickerCommand::ShowMonth(delta) => self.show_month(delta),
            PickerCommand::AdjustTime { hours, minutes } => self.adjust_time(hours, minutes),
            PickerCommand::NextInput | PickerCommand::PrevInput if self.config.dual_input => {
                self.slot = match self.slot {
                    InputSlot::Start => InputSlot::End,
                    InputSlot::End => InputSlot::Start,
                };
                InteractionResult::handled()
            }
            PickerCommand::NextInput | PickerCommand::PrevInput => InteractionResult::ignored(),
            PickerCommand::Text(action) => {
                let field = &mut self.inputs[self.slot.index()];
                if field.apply(action) || matches!(action, TextAction::Home | TextAction::End) {
                    InteractionResult::handled()
                } else {
                    InteractionResult::ignored()
                }
            }
        }
    }

    // ---- rendering state ------------------------------------------------

    pub fn day_cell(&self, date: &CalendarDate) -> DayCell {
        let day = date.to_days();
        let same = |other: &CalendarDate| other.to_days() == day;
        let selection = self.machine.selection();
        let (start_range, end_range, in_range) = match selection {
            Selection::Range { start, end } => (
                same(start),
                end.as_ref().is_some_and(same),
                end.as_ref()
                    .is_some_and(|end| start.to_days() < day && day < end.to_days()),
            ),
            _ => (false, false, false),
        };
        let midnight = date.start_of(Unit::Day);
        DayCell {
            date: Some(*date),
            disabled: !self.boundary.contains(&midnight, PickerType::Date)
                || self.is_disabled_as(&midnight, PickerType::Date),
            selected: selection.dates().iter().any(same),
            start_range,
            end_range,
            in_range,
            focused: self.focused.as_ref().is_some_and(same),
            today: same(&self.now),
        }
    }

    /// Cells of the displayed month, laid out from the locale's first weekday.
    pub fn month_view(&self) -> MonthView {
        let locale = self.locales.active();
        let grid = MonthGrid::new(
            locale.calendar,
            self.view_year,
            self.view_month,
            locale.week_start,
        );
        let weekdays = grid.header();
        let weeks = grid
            .weeks()
            .map(|row| {
                row.map(|day| {
                    day.and_then(|day| {
                        CalendarDate::new(locale.calendar, self.view_year, self.view_month, day).ok()
                    })
                    .map(|date| self.day_cell(&date))
                    .unwrap_or_default()
                })
            })
            .collect();
        MonthView {
            year: self.view_year,
            month: self.view_month,
            title: format!("{} {}", locale.month_name(self.view_month), self.view_year),
            weekdays,
            weekday_names: weekdays.map(|weekday| locale.weekday_name(weekday)),
            weeks,
        }
    }
}

//! Date/time field with drill-down editing.
//!
//! The field moves between a whole-date or whole-time group and the single
//! components inside each group. Up/Down change whatever is focused. The
//! caller injects "today" so the widget never reads the wall clock.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::error::Result;
use crate::models::{format_due, parse_due, DUE_DATE_FORMAT};
use crate::tui::key::{Key, KeyOutcome};
use crate::tui::text::paint_line;
use crate::tui::theme::Theme;

/// Hours reachable when cycling the hour; minutes are kept.
pub const QUICK_HOURS: [u32; 11] = [0, 2, 6, 8, 10, 12, 14, 16, 18, 20, 22];

const MINUTE_STEP: u32 = 5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DateMode {
    #[default]
    Empty,
    View,
    DateEdit,
    TimeEdit,
    YearEdit,
    MonthEdit,
    DayEdit,
    HourEdit,
    MinuteEdit,
}

impl DateMode {
    /// The group a component belongs to; groups and View map to themselves.
    pub fn group(self) -> DateMode {
        match self {
            DateMode::YearEdit | DateMode::MonthEdit | DateMode::DayEdit => DateMode::DateEdit,
            DateMode::HourEdit | DateMode::MinuteEdit => DateMode::TimeEdit,
            other => other,
        }
    }

    pub fn is_editing(self) -> bool {
        !matches!(self, DateMode::Empty | DateMode::View)
    }

    fn parent(self) -> Option<DateMode> {
        match self {
            DateMode::Empty | DateMode::View => None,
            DateMode::DateEdit | DateMode::TimeEdit => Some(DateMode::View),
            component => Some(component.group()),
        }
    }

    fn component_left(self) -> DateMode {
        match self {
            DateMode::MonthEdit => DateMode::YearEdit,
            DateMode::DayEdit => DateMode::MonthEdit,
            DateMode::MinuteEdit => DateMode::HourEdit,
            other => other,
        }
    }

    fn component_right(self) -> DateMode {
        match self {
            DateMode::YearEdit => DateMode::MonthEdit,
            DateMode::MonthEdit => DateMode::DayEdit,
            DateMode::HourEdit => DateMode::MinuteEdit,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInput {
    value: NaiveDateTime,
    has_value: bool,
    mode: DateMode,
}

impl Default for DateInput {
    fn default() -> Self {
        Self::new()
    }
}

impl DateInput {
    pub fn new() -> Self {
        Self {
            value: NaiveDateTime::default(),
            has_value: false,
            mode: DateMode::Empty,
        }
    }

    pub fn with_value(value: Option<NaiveDateTime>) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    pub fn mode(&self) -> DateMode {
        self.mode
    }

    pub fn has_value(&self) -> bool {
        self.has_value
    }

    pub fn value(&self) -> Option<NaiveDateTime> {
        self.has_value.then_some(self.value)
    }

    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        match value {
            Some(value) => {
                self.value = value;
                self.has_value = true;
                if self.mode == DateMode::Empty {
                    self.mode = DateMode::View;
                }
            }
            None => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.has_value = false;
        self.mode = DateMode::Empty;
    }

    /// Parse `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`; blank input clears the
    /// field. On error the field keeps its previous state.
    pub fn set_value_from_string(&mut self, input: &str) -> Result<()> {
        let parsed = parse_due(input)?;
        self.set_value(parsed);
        Ok(())
    }

    fn set_mode(&mut self, mode: DateMode) {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "date field mode");
            self.mode = mode;
        }
    }

    /// Set the value to midnight today and show it.
    fn init_today(&mut self, today: NaiveDate) {
        self.value = today.and_time(NaiveTime::MIN);
        self.has_value = true;
        self.set_mode(DateMode::View);
    }

    pub fn handle_key(&mut self, key: Key, today: NaiveDate) -> KeyOutcome {
        if !self.has_value {
            return match key {
                Key::Space | Key::Enter | Key::Up | Key::Down | Key::Char('+') | Key::Char('-') => {
                    self.init_today(today);
                    KeyOutcome::Changed
                }
                _ => KeyOutcome::Ignored,
            };
        }

        match key {
            Key::Enter => self.enter(),
            Key::Esc => match self.mode.parent() {
                Some(parent) => {
                    self.set_mode(parent);
                    KeyOutcome::Handled
                }
                None => KeyOutcome::Ignored,
            },
            Key::Left => self.left(),
            Key::Right => self.right(),
            Key::Up | Key::Char('+') if self.mode.is_editing() => {
                self.increment(today);
                KeyOutcome::Changed
            }
            Key::Down | Key::Char('-') if self.mode.is_editing() => {
                self.decrement(today);
                KeyOutcome::Changed
            }
            Key::Backspace | Key::Delete if self.mode == DateMode::View => {
                self.clear();
                KeyOutcome::Changed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn enter(&mut self) -> KeyOutcome {
        let next = match self.mode {
            DateMode::Empty => return KeyOutcome::Ignored,
            DateMode::View => DateMode::DateEdit,
            DateMode::DateEdit => DateMode::YearEdit,
            DateMode::TimeEdit => DateMode::HourEdit,
            DateMode::YearEdit => DateMode::MonthEdit,
            DateMode::MonthEdit => DateMode::DayEdit,
            DateMode::DayEdit => DateMode::DateEdit,
            DateMode::HourEdit => DateMode::MinuteEdit,
            DateMode::MinuteEdit => DateMode::TimeEdit,
        };
        self.set_mode(next);
        KeyOutcome::Handled
    }

    fn left(&mut self) -> KeyOutcome {
        let next = match self.mode {
            DateMode::View | DateMode::TimeEdit => DateMode::DateEdit,
            DateMode::DateEdit => return KeyOutcome::Handled,
            DateMode::Empty => return KeyOutcome::Ignored,
            component => component.component_left(),
        };
        self.set_mode(next);
        KeyOutcome::Handled
    }

    fn right(&mut self) -> KeyOutcome {
        let next = match self.mode {
            DateMode::View | DateMode::DateEdit => DateMode::TimeEdit,
            DateMode::TimeEdit => return KeyOutcome::Handled,
            DateMode::Empty => return KeyOutcome::Ignored,
            component => component.component_right(),
        };
        self.set_mode(next);
        KeyOutcome::Handled
    }

    pub fn increment(&mut self, today: NaiveDate) {
        self.step(true, today);
    }

    pub fn decrement(&mut self, today: NaiveDate) {
        self.step(false, today);
    }

    fn step(&mut self, forward: bool, today: NaiveDate) {
        if !self.has_value {
            self.init_today(today);
            return;
        }
        let v = self.value;
        self.value = match self.mode {
            DateMode::Empty | DateMode::View => v,
            DateMode::DateEdit | DateMode::DayEdit => shift_days(v, forward),
            DateMode::TimeEdit | DateMode::HourEdit => {
                let hour = if forward {
                    next_quick_hour(v.hour())
                } else {
                    prev_quick_hour(v.hour())
                };
                v.with_hour(hour).unwrap_or(v)
            }
            DateMode::YearEdit => shift_years(v, forward),
            DateMode::MonthEdit => shift_month(v, forward),
            DateMode::MinuteEdit => {
                let minute = if forward {
                    next_minute(v.minute())
                } else {
                    prev_minute(v.minute())
                };
                v.with_minute(minute).unwrap_or(v)
            }
        };
    }

    pub fn value_string(&self) -> String {
        self.format_if_set(format_due)
    }

    pub fn date_string(&self) -> String {
        self.format_if_set(|v| v.format(DUE_DATE_FORMAT).to_string())
    }

    pub fn time_string(&self) -> String {
        self.format_if_set(|v| v.format("%H:%M").to_string())
    }

    pub fn year_string(&self) -> String {
        self.format_if_set(|v| format!("{:04}", v.year()))
    }

    pub fn month_string(&self) -> String {
        self.format_if_set(|v| format!("{:02}", v.month()))
    }

    pub fn day_string(&self) -> String {
        self.format_if_set(|v| format!("{:02}", v.day()))
    }

    pub fn hour_string(&self) -> String {
        self.format_if_set(|v| format!("{:02}", v.hour()))
    }

    pub fn minute_string(&self) -> String {
        self.format_if_set(|v| format!("{:02}", v.minute()))
    }

    fn format_if_set(&self, f: impl FnOnce(&NaiveDateTime) -> String) -> String {
        if self.has_value {
            f(&self.value)
        } else {
            String::new()
        }
    }

    /// Styled rendering with the focused part in brackets, e.g.
    /// `2025-[06]-01 14:30` while editing the month.
    pub fn line(&self, focused: bool, theme: &Theme) -> Line<'static> {
        if !self.has_value {
            let mut spans = vec![Span::styled("-- not set --", theme.muted)];
            if focused {
                spans.push(Span::styled("  (space to set)", theme.help_desc));
            }
            return Line::from(spans);
        }

        let (year, month, day) = (self.year_string(), self.month_string(), self.day_string());
        let (hour, minute) = (self.hour_string(), self.minute_string());
        let hi = theme.focused;
        let bracket = |text: String| Span::styled(format!("[{}]", text), hi);

        let spans = match self.mode {
            DateMode::Empty | DateMode::View => {
                let style = if focused { theme.info } else { Style::default() };
                vec![Span::styled(self.value_string(), style)]
            }
            DateMode::DateEdit => vec![
                bracket(self.date_string()),
                Span::raw(format!(" {}", self.time_string())),
            ],
            DateMode::TimeEdit => vec![
                Span::raw(format!("{} ", self.date_string())),
                bracket(self.time_string()),
            ],
            DateMode::YearEdit => vec![
                bracket(year),
                Span::raw(format!("-{}-{} {}:{}", month, day, hour, minute)),
            ],
            DateMode::MonthEdit => vec![
                Span::raw(format!("{}-", year)),
                bracket(month),
                Span::raw(format!("-{} {}:{}", day, hour, minute)),
            ],
            DateMode::DayEdit => vec![
                Span::raw(format!("{}-{}-", year, month)),
                bracket(day),
                Span::raw(format!(" {}:{}", hour, minute)),
            ],
            DateMode::HourEdit => vec![
                Span::raw(format!("{}-{}-{} ", year, month, day)),
                bracket(hour),
                Span::raw(format!(":{}", minute)),
            ],
            DateMode::MinuteEdit => vec![
                Span::raw(format!("{}-{}-{} {}:", year, month, day, hour)),
                bracket(minute),
            ],
        };
        Line::from(spans)
    }

    pub fn render(&self, focused: bool, theme: &Theme) -> String {
        paint_line(&self.line(focused, theme))
    }
}

fn shift_days(v: NaiveDateTime, forward: bool) -> NaiveDateTime {
    let delta = if forward { Duration::days(1) } else { Duration::days(-1) };
    v.checked_add_signed(delta).unwrap_or(v)
}

/// `checked_*_months` clamps Feb 29 to Feb 28 in non-leap years.
fn shift_years(v: NaiveDateTime, forward: bool) -> NaiveDateTime {
    let year = Months::new(12);
    let shifted = if forward {
        v.checked_add_months(year)
    } else {
        v.checked_sub_months(year)
    };
    shifted.unwrap_or(v)
}

/// Month step with explicit December/January wraparound. Only the month
/// changes; the year stays put and the day is clamped to the target month.
fn shift_month(v: NaiveDateTime, forward: bool) -> NaiveDateTime {
    let year = v.year();
    let month = match (forward, v.month()) {
        (true, 12) => 1,
        (true, m) => m + 1,
        (false, 1) => 12,
        (false, m) => m - 1,
    };
    let day = v.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(v.time()))
        .unwrap_or(v)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

fn next_quick_hour(hour: u32) -> u32 {
    QUICK_HOURS
        .iter()
        .copied()
        .find(|&h| h > hour)
        .unwrap_or(QUICK_HOURS[0])
}

fn prev_quick_hour(hour: u32) -> u32 {
    QUICK_HOURS
        .iter()
        .rev()
        .copied()
        .find(|&h| h < hour)
        .unwrap_or(QUICK_HOURS[QUICK_HOURS.len() - 1])
}

/// Next multiple of five, wrapping 55 → 0 without touching the hour.
fn next_minute(minute: u32) -> u32 {
    (minute / MINUTE_STEP * MINUTE_STEP + MINUTE_STEP) % 60
}

/// Previous multiple of five, wrapping 0 → 55.
fn prev_minute(minute: u32) -> u32 {
    if minute == 0 {
        60 - MINUTE_STEP
    } else {
        (minute - 1) / MINUTE_STEP * MINUTE_STEP
    }
}

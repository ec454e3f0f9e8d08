use std::fmt::Display;

use ratatui::text::{Line, Span};

use crate::tui::key::{Key, KeyOutcome};
use crate::tui::theme::Theme;

/// A value picked from a fixed option list by cycling left or right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleField<T> {
    options: Vec<T>,
    index: usize,
}

impl<T: Copy + PartialEq + Display> CycleField<T> {
    /// `selected` falls back to the first option when it is not in the list.
    pub fn new(options: impl Into<Vec<T>>, selected: T) -> Self {
        let options = options.into();
        let index = options.iter().position(|o| *o == selected).unwrap_or(0);
        Self { options, index }
    }

    pub fn value(&self) -> Option<T> {
        self.options.get(self.index).copied()
    }

    pub fn next(&mut self) {
        if !self.options.is_empty() {
            self.index = (self.index + 1) % self.options.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.options.is_empty() {
            self.index = (self.index + self.options.len() - 1) % self.options.len();
        }
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if self.options.len() < 2 {
            return KeyOutcome::Ignored;
        }
        match key {
            Key::Right | Key::Space | Key::Char('l') => self.next(),
            Key::Left | Key::Char('h') => self.prev(),
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Changed
    }

    pub fn line(&self, focused: bool, theme: &Theme) -> Line<'static> {
        let label = self.value().map(|v| v.to_string()).unwrap_or_default();
        if focused {
            Line::from(vec![
                Span::styled("◀ ", theme.muted),
                Span::styled(label, theme.focused),
                Span::styled(" ▶", theme.muted),
            ])
        } else {
            Line::from(Span::raw(label))
        }
    }
}

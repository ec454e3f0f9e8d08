use ratatui::text::{Line, Span};

use crate::tui::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub focused: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn span(&self, theme: &Theme) -> Span<'static> {
        let style = if self.focused {
            theme.button_focused
        } else {
            theme.button
        };
        Span::styled(format!("[ {} ]", self.label), style)
    }

    pub fn line(&self, theme: &Theme) -> Line<'static> {
        Line::from(self.span(theme))
    }
}

/// Lay buttons out on one row separated by two spaces.
pub fn button_row(buttons: &[Button], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(buttons.len() * 2);
    for (i, button) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(button.span(theme));
    }
    Line::from(spans)
}

use ratatui::style::{Color, Modifier, Style};

use crate::config::{Rgb, ThemeColors};
use crate::models::{Priority, Status};

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Named text styles handed to every render call.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub muted: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub urgent: Style,
    pub info: Style,
    pub pending: Style,
    pub selected: Style,
    pub border: Style,
    pub border_focused: Style,
    pub title: Style,
    pub header: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub label: Style,
    pub focused: Style,
    pub button: Style,
    pub button_focused: Style,
    pub completed_text: Style,
}

impl Theme {
    /// A theme without any styling; output is plain text.
    pub fn plain() -> Self {
        let none = Style::default();
        Self {
            muted: none,
            success: none,
            warning: none,
            error: none,
            urgent: none,
            info: none,
            pending: none,
            selected: none,
            border: none,
            border_focused: none,
            title: none,
            header: none,
            help_key: none,
            help_desc: none,
            label: none,
            focused: none,
            button: none,
            button_focused: none,
            completed_text: none,
        }
    }

    pub fn status_style(&self, status: Status) -> Style {
        match status {
            Status::Todo => self.pending,
            Status::InProgress => self.warning,
            Status::Done => self.success,
        }
    }

    pub fn priority_style(&self, priority: Priority) -> Style {
        match priority {
            Priority::Low => self.muted,
            Priority::Medium => self.warning,
            Priority::High => self.urgent,
        }
    }

    /// Title style for a task row, dimming finished work.
    pub fn task_title_style(&self, status: Status, priority: Priority) -> Style {
        if status.is_done() {
            self.completed_text
        } else if priority == Priority::High {
            self.urgent
        } else {
            Style::default()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from(&ThemeColors::default())
    }
}

impl From<&ThemeColors> for Theme {
    fn from(colors: &ThemeColors) -> Self {
        Self {
            muted: Style::default().fg(rgb(colors.muted)),
            success: Style::default().fg(rgb(colors.success)),
            warning: Style::default().fg(rgb(colors.warning)),
            error: Style::default().fg(rgb(colors.error)),
            urgent: Style::default()
                .fg(rgb(colors.error))
                .add_modifier(Modifier::BOLD),
            info: Style::default().fg(rgb(colors.info)),
            pending: Style::default().fg(rgb(colors.pending)),
            selected: Style::default()
                .bg(rgb(colors.highlight))
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            border_focused: Style::default().fg(rgb(colors.info)),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            header: Style::default()
                .fg(rgb(colors.info))
                .add_modifier(Modifier::BOLD),
            help_key: Style::default()
                .fg(rgb(colors.muted))
                .add_modifier(Modifier::BOLD),
            help_desc: Style::default().fg(rgb(colors.muted)),
            label: Style::default()
                .fg(rgb(colors.muted))
                .add_modifier(Modifier::BOLD),
            focused: Style::default()
                .fg(Color::Black)
                .bg(rgb(colors.info)),
            button: Style::default().fg(rgb(colors.muted)),
            button_focused: Style::default()
                .fg(Color::Black)
                .bg(rgb(colors.success))
                .add_modifier(Modifier::BOLD),
            completed_text: Style::default()
                .fg(Color::Rgb(140, 140, 160))
                .add_modifier(Modifier::CROSSED_OUT),
        }
    }
}

use ratatui::text::{Line, Span};

use crate::tui::text::fit_line;
use crate::tui::theme::Theme;
use crate::tui::ViewMode;

/// Which key set the bar should advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpContext {
    Browse(ViewMode),
    Form,
    DateEdit,
    Confirm,
    Help,
}

pub fn bindings(context: HelpContext) -> &'static [(&'static str, &'static str)] {
    match context {
        HelpContext::Browse(ViewMode::List) => &[
            ("↑↓", "Move"),
            ("n", "New"),
            ("e", "Edit"),
            ("d", "Delete"),
            ("space", "Toggle"),
            ("v", "Timeline"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        HelpContext::Browse(ViewMode::Timeline) => &[
            ("↑↓", "Move"),
            ("n", "New"),
            ("e", "Edit"),
            ("d", "Delete"),
            ("v", "List"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        HelpContext::Form => &[
            ("tab", "Next"),
            ("S-tab", "Prev"),
            ("←→", "Change"),
            ("enter", "Select"),
            ("esc", "Cancel"),
        ],
        HelpContext::DateEdit => &[
            ("←→", "Move"),
            ("↑↓", "Adjust"),
            ("enter", "Drill in"),
            ("esc", "Back"),
            ("bksp", "Clear"),
        ],
        HelpContext::Confirm => &[("y", "Confirm"), ("n", "Cancel")],
        HelpContext::Help => &[("esc", "Close")],
    }
}

/// One row of `[key] description` pairs fitted to `width`.
pub fn help_line(context: HelpContext, width: usize, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, desc)) in bindings(context).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!("[{}]", key), theme.help_key));
        spans.push(Span::styled(format!(" {}", desc), theme.help_desc));
    }
    fit_line(&Line::from(spans), width)
}

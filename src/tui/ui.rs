use chrono::NaiveDateTime;
use ratatui::text::{Line, Span};

use crate::config::Config;
use crate::models::{Task, TaskStats};

use super::text::{blank_line, center_line, fit_line, paint_lines};
use super::theme::Theme;
use super::widgets::button::button_row;
use super::widgets::help_bar::{bindings, help_line, HelpContext};
use super::widgets::task_list::visible_tasks;
use super::widgets::timeline_view::ordered_tasks;
use super::widgets::{Button, Modal, TaskDetail, TaskForm, TaskList, TimelineView};
use super::ViewMode;

pub const TOO_SMALL_MESSAGE: &str = "Window too small";

/// Share of the body width given to the list or timeline panel.
const MAIN_PANEL_PERCENT: u32 = 60;

#[derive(Debug, Clone)]
pub enum Popup {
    Help,
    Form(TaskForm),
    ConfirmDelete { id: u64, title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct Screen<'a> {
    pub tasks: &'a [Task],
    pub view: ViewMode,
    /// Index into the tasks in the order the current view shows them.
    pub selected: Option<usize>,
    pub now: NaiveDateTime,
    pub width: u16,
    pub height: u16,
    pub popup: Option<Popup>,
    pub status_message: Option<StatusMessage>,
}

impl<'a> Screen<'a> {
    pub fn new(tasks: &'a [Task], now: NaiveDateTime, width: u16, height: u16) -> Self {
        Self {
            tasks,
            view: ViewMode::default(),
            selected: None,
            now,
            width,
            height,
            popup: None,
            status_message: None,
        }
    }

    pub fn view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn popup(mut self, popup: Option<Popup>) -> Self {
        self.popup = popup;
        self
    }

    pub fn status_message(mut self, message: Option<StatusMessage>) -> Self {
        self.status_message = message;
        self
    }

    /// Tasks in the order the active view lists them.
    pub fn ordered_tasks(&self, config: &Config) -> Vec<&'a Task> {
        match self.view {
            ViewMode::List => visible_tasks(self.tasks, config),
            ViewMode::Timeline => ordered_tasks(self.tasks, self.now.date(), config),
        }
    }

    pub fn selected_task(&self, config: &Config) -> Option<&'a Task> {
        let index = self.selected?;
        self.ordered_tasks(config).get(index).copied()
    }

    fn help_context(&self) -> HelpContext {
        match &self.popup {
            None => HelpContext::Browse(self.view),
            Some(Popup::Help) => HelpContext::Help,
            Some(Popup::Form(form)) if form.is_editing_date() => HelpContext::DateEdit,
            Some(Popup::Form(_)) => HelpContext::Form,
            Some(Popup::ConfirmDelete { .. }) => HelpContext::Confirm,
        }
    }
}

/// Render the entire UI
pub fn render(screen: &Screen<'_>, theme: &Theme, config: &Config) -> String {
    paint_lines(&screen_lines(screen, theme, config))
}

/// Exactly `screen.height` lines of `screen.width` columns.
pub fn screen_lines(screen: &Screen<'_>, theme: &Theme, config: &Config) -> Vec<Line<'static>> {
    let (width, height) = (screen.width, screen.height);
    if width < config.min_width || height < config.min_height {
        tracing::debug!(width, height, "window below minimum size");
        return too_small(width, height, config, theme);
    }

    let w = width as usize;
    let mut out = vec![header_line(screen, w, theme)];
    if let Some(line) = stats_line(screen, config, w, theme) {
        out.push(line);
    }

    let body_height = height.saturating_sub(out.len() as u16 + 1);
    match &screen.popup {
        Some(popup) => out.extend(popup_modal(popup, theme).lines(width, body_height, theme)),
        None => out.extend(body_lines(screen, width, body_height, config, theme)),
    }

    out.push(help_line(screen.help_context(), w, theme));
    out
}

fn too_small(width: u16, height: u16, config: &Config, theme: &Theme) -> Vec<Line<'static>> {
    let w = width as usize;
    let mut out: Vec<Line<'static>> = (0..height).map(|_| blank_line(w)).collect();
    let middle = height as usize / 2;
    if let Some(line) = out.get_mut(middle) {
        *line = center_line(&Line::styled(TOO_SMALL_MESSAGE, theme.warning), w);
    }
    if let Some(line) = out.get_mut(middle + 1) {
        let need = format!("(need {}x{})", config.min_width, config.min_height);
        *line = center_line(&Line::styled(need, theme.muted), w);
    }
    out
}

fn header_line(screen: &Screen<'_>, width: usize, theme: &Theme) -> Line<'static> {
    let spans = vec![
        Span::styled("  taskview", theme.title),
        Span::raw("  "),
        Span::styled(screen.view.label(), theme.muted),
        Span::raw("  "),
        Span::styled(screen.now.format("%a %b %d %Y").to_string(), theme.muted),
    ];
    fit_line(&Line::from(spans), width)
}

fn stats_line(screen: &Screen<'_>, config: &Config, width: usize, theme: &Theme) -> Option<Line<'static>> {
    if let Some(msg) = &screen.status_message {
        let style = match msg.kind {
            StatusKind::Success => theme.success,
            StatusKind::Error => theme.error,
            StatusKind::Info => theme.info,
        };
        let line = Line::from(vec![Span::raw("  "), Span::styled(msg.text.clone(), style)]);
        return Some(fit_line(&line, width));
    }
    if !config.display_progress_overview {
        return None;
    }

    let stats = TaskStats::from_tasks(screen.tasks);
    let line = Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{}%", stats.percent), theme.success),
        Span::styled(" done", theme.muted),
        Span::styled(" | ", theme.muted),
        Span::styled(stats.done.to_string(), theme.success),
        Span::styled(" done", theme.muted),
        Span::styled(" · ", theme.muted),
        Span::styled(stats.in_progress.to_string(), theme.warning),
        Span::styled(" in-progress", theme.muted),
        Span::styled(" · ", theme.muted),
        Span::styled(stats.todo.to_string(), theme.pending),
        Span::styled(" pending", theme.muted),
    ]);
    Some(fit_line(&line, width))
}

fn body_lines(
    screen: &Screen<'_>,
    width: u16,
    height: u16,
    config: &Config,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let main_width = (u32::from(width) * MAIN_PANEL_PERCENT / 100) as u16;
    let detail_width = width - main_width;

    let main = match screen.view {
        ViewMode::List => TaskList::new(screen.tasks, screen.now)
            .selected(screen.selected)
            .lines(main_width, height, config, theme),
        ViewMode::Timeline => TimelineView::new(screen.tasks, screen.now)
            .selected(screen.selected)
            .lines(main_width, height, config, theme),
    };
    let detail = TaskDetail::new(screen.selected_task(config), screen.now)
        .lines(detail_width, height, theme);

    main.into_iter()
        .zip(detail)
        .map(|(left, right)| {
            let mut spans = left.spans;
            spans.extend(right.spans);
            Line::from(spans)
        })
        .collect()
}

fn popup_modal(popup: &Popup, theme: &Theme) -> Modal {
    match popup {
        Popup::Help => help_modal(theme),
        Popup::Form(form) => form.modal(theme),
        Popup::ConfirmDelete { id, title } => {
            let buttons = [Button::new("Delete").focused(true), Button::new("Cancel")];
            let mut button_spans = vec![Span::raw("  ")];
            button_spans.extend(button_row(&buttons, theme).spans);
            let body = vec![
                Line::raw(""),
                Line::from(vec![
                    Span::raw(format!("  Delete task {}: ", id)),
                    Span::styled(title.clone(), theme.title),
                    Span::raw("?"),
                ]),
                Line::raw(""),
                Line::from(button_spans),
            ];
            Modal::new("Confirm", body).width(44)
        }
    }
}

fn help_modal(theme: &Theme) -> Modal {
    let sections = [
        ("Browsing", HelpContext::Browse(ViewMode::List)),
        ("Forms", HelpContext::Form),
        ("Due dates", HelpContext::DateEdit),
    ];
    let mut body = Vec::new();
    for (title, context) in sections {
        body.push(Line::raw(""));
        body.push(Line::styled(format!("  {}", title), theme.header));
        for (key, desc) in bindings(context) {
            body.push(Line::from(vec![
                Span::styled(format!("    {:<8}", key), theme.help_key),
                Span::styled(desc.to_string(), theme.help_desc),
            ]));
        }
    }
    Modal::new("Keybindings", body).width(40)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::tui::text::paint_line;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task::new(1, "Buy milk").with_due(now()),
            Task::new(2, "Pay rent").with_status(Status::Done),
        ]
    }

    fn text(screen: &Screen<'_>) -> Vec<String> {
        screen_lines(screen, &Theme::plain(), &Config::default())
            .iter()
            .map(paint_line)
            .collect()
    }

    #[test]
    fn fills_terminal_exactly() {
        let tasks = tasks();
        let screen = Screen::new(&tasks, now(), 80, 20).selected(Some(0));
        let lines = screen_lines(&screen, &Theme::plain(), &Config::default());
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|l| l.width() == 80));
    }

    #[test]
    fn shows_header_stats_and_panels() {
        let tasks = tasks();
        let rows = text(&Screen::new(&tasks, now(), 80, 20).selected(Some(0)));
        assert!(rows[0].starts_with("  taskview  List View"));
        assert!(rows[1].starts_with("  50% done | 1 done · 0 in-progress · 1 pending"));
        assert!(rows[2].contains("Tasks (2)") && rows[2].contains("Details"));
        assert!(rows[3].contains(">  1. ☐ Buy milk (!) today"));
        assert!(rows[3].contains("Buy milk"));
        assert!(rows[19].starts_with("[↑↓] Move"));
    }

    #[test]
    fn window_too_small() {
        let tasks = tasks();
        let rows = text(&Screen::new(&tasks, now(), 40, 6));
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[3].trim(), TOO_SMALL_MESSAGE);
        assert_eq!(rows[4].trim(), "(need 60x12)");
        assert!(text(&Screen::new(&tasks, now(), 40, 0)).is_empty());
    }

    #[test]
    fn timeline_selection_follows_bucket_order() {
        let tasks = vec![
            Task::new(1, "later"),
            Task::new(2, "now").with_due(now()),
        ];
        let screen = Screen::new(&tasks, now(), 80, 20)
            .view(ViewMode::Timeline)
            .selected(Some(0));
        assert_eq!(screen.selected_task(&Config::default()).map(|t| t.id), Some(2));
        let rows = text(&screen);
        assert!(rows[0].contains("Timeline View"));
        assert!(rows.last().unwrap().contains("[v] List"));
    }

    #[test]
    fn popup_replaces_body() {
        let tasks = tasks();
        let screen = Screen::new(&tasks, now(), 80, 20).popup(Some(Popup::ConfirmDelete {
            id: 1,
            title: "Buy milk".to_string(),
        }));
        let rows = text(&screen);
        assert_eq!(rows.len(), 20);
        assert!(rows.iter().any(|r| r.contains("Delete task 1: Buy milk?")));
        assert!(rows.iter().all(|r| !r.contains("Tasks (2)")));
        assert!(rows[19].starts_with("[y] Confirm"));
    }

    #[test]
    fn form_popup_switches_help_for_date_editing() {
        let tasks = tasks();
        let mut form = TaskForm::edit(&tasks[0]);
        form.set_focus(crate::tui::widgets::FormField::Due);
        form.handle_key(crate::tui::Key::Enter, now().date());
        let screen = Screen::new(&tasks, now(), 80, 20).popup(Some(Popup::Form(form)));
        let rows = text(&screen);
        assert!(rows.iter().any(|r| r.contains("Edit Task")));
        assert!(rows.iter().any(|r| r.contains("[2025-06-10] 09:00")));
        assert!(rows[19].starts_with("[←→] Move"));
    }

    #[test]
    fn status_message_replaces_stats() {
        let tasks = tasks();
        let screen = Screen::new(&tasks, now(), 80, 20).status_message(Some(StatusMessage {
            text: "Saved".to_string(),
            kind: StatusKind::Success,
        }));
        assert_eq!(text(&screen)[1].trim(), "Saved");
    }

    #[test]
    fn main_panel_is_focused_and_detail_is_not() {
        let tasks = tasks();
        let theme = Theme::default();
        let screen = Screen::new(&tasks, now(), 80, 20).selected(Some(0));
        let lines = screen_lines(&screen, &theme, &Config::default());
        let corners: Vec<_> = lines[2]
            .spans
            .iter()
            .filter(|span| span.content.starts_with('╭'))
            .map(|span| span.style)
            .collect();
        assert_eq!(corners, vec![theme.border_focused, theme.border]);
    }
}

use chrono::{NaiveDate, NaiveDateTime};
use ratatui::text::{Line, Span};

use crate::models::{Priority, Status, Task};
use crate::tui::key::{Key, KeyOutcome};
use crate::tui::theme::Theme;

use super::button::{button_row, Button};
use super::cycle_field::CycleField;
use super::date_input::DateInput;
use super::modal::Modal;
use super::text_input::TextInput;

const LABEL_WIDTH: usize = 10;
const FORM_WIDTH: u16 = 56;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
    Priority,
    Due,
    Save,
    Cancel,
}

impl FormField {
    pub const ORDER: [FormField; 7] = [
        FormField::Title,
        FormField::Description,
        FormField::Status,
        FormField::Priority,
        FormField::Due,
        FormField::Save,
        FormField::Cancel,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Notes",
            FormField::Status => "Status",
            FormField::Priority => "Priority",
            FormField::Due => "Due",
            FormField::Save | FormField::Cancel => "",
        }
    }
}

/// The values a submitted form hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub due: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Pending,
    Submitted(TaskDraft),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    editing: Option<u64>,
    title: TextInput,
    description: TextInput,
    status: CycleField<Status>,
    priority: CycleField<Priority>,
    due: DateInput,
    focus: FormField,
    error: Option<String>,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            editing: None,
            title: TextInput::default(),
            description: TextInput::default(),
            status: CycleField::new(Status::ALL, Status::default()),
            priority: CycleField::new(Priority::ALL, Priority::default()),
            due: DateInput::new(),
            focus: FormField::Title,
            error: None,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            title: TextInput::new(task.title.clone()),
            description: TextInput::new(task.description.clone()),
            status: CycleField::new(Status::ALL, task.status),
            priority: CycleField::new(Priority::ALL, task.priority),
            due: DateInput::with_value(task.due),
            ..Self::new()
        }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "New Task"
        }
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn due(&self) -> &DateInput {
        &self.due
    }

    /// Whether the due field is drilled into; the help bar switches keys.
    pub fn is_editing_date(&self) -> bool {
        self.focus == FormField::Due && self.due.mode().is_editing()
    }

    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    /// Replace the due date from typed text, keeping the old value and
    /// showing the error inline when it does not parse.
    pub fn set_due_text(&mut self, text: &str) {
        match self.due.set_value_from_string(text) {
            Ok(()) => self.error = None,
            Err(err) => {
                tracing::debug!(error = %err, "rejected due date text");
                self.error = Some(err.to_string());
            }
        }
    }

    fn draft(&self) -> TaskDraft {
        TaskDraft {
            id: self.editing,
            title: self.title.value().trim().to_string(),
            description: self.description.value().trim().to_string(),
            status: self.status.value().unwrap_or_default(),
            priority: self.priority.value().unwrap_or_default(),
            due: self.due.value(),
        }
    }

    fn submit(&mut self) -> FormOutcome {
        if self.title.is_blank() {
            self.error = Some("Title is required".to_string());
            self.focus = FormField::Title;
            return FormOutcome::Pending;
        }
        self.error = None;
        FormOutcome::Submitted(self.draft())
    }

    fn forward_to_focused(&mut self, key: Key, today: NaiveDate) -> KeyOutcome {
        match self.focus {
            FormField::Title => self.title.handle_key(key),
            FormField::Description => self.description.handle_key(key),
            FormField::Status => self.status.handle_key(key),
            FormField::Priority => self.priority.handle_key(key),
            FormField::Due => self.due.handle_key(key, today),
            FormField::Save | FormField::Cancel => KeyOutcome::Ignored,
        }
    }

    pub fn handle_key(&mut self, key: Key, today: NaiveDate) -> FormOutcome {
        match key {
            Key::Tab => {
                self.focus = self.focus.next();
                return FormOutcome::Pending;
            }
            Key::BackTab => {
                self.focus = self.focus.prev();
                return FormOutcome::Pending;
            }
            _ => {}
        }

        let outcome = self.forward_to_focused(key, today);
        if outcome == KeyOutcome::Changed && self.focus == FormField::Title {
            self.error = None;
        }
        if outcome.is_consumed() {
            return FormOutcome::Pending;
        }

        match (key, self.focus) {
            (Key::Esc, _) => FormOutcome::Cancelled,
            (Key::Enter | Key::Space, FormField::Save) => self.submit(),
            (Key::Enter | Key::Space, FormField::Cancel) => FormOutcome::Cancelled,
            (Key::Left, FormField::Cancel) => {
                self.focus = FormField::Save;
                FormOutcome::Pending
            }
            (Key::Right, FormField::Save) => {
                self.focus = FormField::Cancel;
                FormOutcome::Pending
            }
            (Key::Enter | Key::Down, _) => {
                self.focus = self.focus.next();
                FormOutcome::Pending
            }
            (Key::Up, _) => {
                self.focus = self.focus.prev();
                FormOutcome::Pending
            }
            _ => FormOutcome::Pending,
        }
    }

    fn row(&self, field: FormField, value: Line<'static>, theme: &Theme) -> Line<'static> {
        let focused = self.focus == field;
        let (marker, style) = if focused {
            ("▸ ", theme.header)
        } else {
            ("  ", theme.label)
        };
        let mut spans = vec![Span::styled(
            format!("{}{:<width$}", marker, field.label(), width = LABEL_WIDTH),
            style,
        )];
        spans.extend(value.spans);
        Line::from(spans)
    }

    /// Form rows sized for fields `width` columns wide.
    pub fn body(&self, width: usize, theme: &Theme) -> Vec<Line<'static>> {
        let field_width = width.saturating_sub(LABEL_WIDTH + 2).max(1);
        let f = self.focus;
        let mut out = vec![
            self.row(
                FormField::Title,
                self.title.line(field_width, f == FormField::Title, theme),
                theme,
            ),
            self.row(
                FormField::Description,
                self.description
                    .line(field_width, f == FormField::Description, theme),
                theme,
            ),
            self.row(
                FormField::Status,
                self.status.line(f == FormField::Status, theme),
                theme,
            ),
            self.row(
                FormField::Priority,
                self.priority.line(f == FormField::Priority, theme),
                theme,
            ),
            self.row(
                FormField::Due,
                self.due.line(f == FormField::Due, theme),
                theme,
            ),
            Line::raw(""),
        ];

        match &self.error {
            Some(error) => out.push(Line::styled(format!("  {}", error), theme.error)),
            None => out.push(Line::raw("")),
        }

        let buttons = [
            Button::new("Save").focused(f == FormField::Save),
            Button::new("Cancel").focused(f == FormField::Cancel),
        ];
        let mut row = vec![Span::raw(" ".repeat(LABEL_WIDTH + 2))];
        row.extend(button_row(&buttons, theme).spans);
        out.push(Line::from(row));
        out
    }

    pub fn modal(&self, theme: &Theme) -> Modal {
        let inner = FORM_WIDTH as usize - 4;
        Modal::new(self.title(), self.body(inner, theme)).width(FORM_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::text::paint_line;
    use crate::tui::widgets::date_input::DateMode;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn type_text(form: &mut TaskForm, text: &str) {
        for ch in text.chars() {
            let key = if ch == ' ' { Key::Space } else { Key::Char(ch) };
            form.handle_key(key, today());
        }
    }

    #[test]
    fn tab_cycles_focus() {
        let mut form = TaskForm::new();
        for expected in &FormField::ORDER[1..] {
            form.handle_key(Key::Tab, today());
            assert_eq!(form.focus(), *expected);
        }
        form.handle_key(Key::Tab, today());
        assert_eq!(form.focus(), FormField::Title);
        form.handle_key(Key::BackTab, today());
        assert_eq!(form.focus(), FormField::Cancel);
    }

    #[test]
    fn save_requires_title() {
        let mut form = TaskForm::new();
        form.set_focus(FormField::Save);
        assert_eq!(form.handle_key(Key::Enter, today()), FormOutcome::Pending);
        assert_eq!(form.error(), Some("Title is required"));
        assert_eq!(form.focus(), FormField::Title);

        type_text(&mut form, "Buy milk");
        assert_eq!(form.error(), None);
    }

    #[test]
    fn submits_draft() {
        let mut form = TaskForm::new();
        type_text(&mut form, "Buy milk");
        form.set_focus(FormField::Priority);
        form.handle_key(Key::Right, today());
        form.set_focus(FormField::Due);
        form.handle_key(Key::Space, today());
        form.set_focus(FormField::Save);

        let FormOutcome::Submitted(draft) = form.handle_key(Key::Enter, today()) else {
            panic!("form did not submit");
        };
        assert_eq!(draft.id, None);
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.due, Some(today().and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn esc_inside_date_pops_before_cancelling() {
        let task = Task::new(4, "x").with_due(today().and_hms_opt(9, 0, 0).unwrap());
        let mut form = TaskForm::edit(&task);
        form.set_focus(FormField::Due);
        form.handle_key(Key::Enter, today());
        assert!(form.is_editing_date());
        assert_eq!(form.handle_key(Key::Esc, today()), FormOutcome::Pending);
        assert_eq!(form.due().mode(), DateMode::View);
        assert_eq!(form.handle_key(Key::Esc, today()), FormOutcome::Cancelled);
    }

    #[test]
    fn invalid_due_text_is_reported_inline() {
        let task = Task::new(4, "x").with_due(today().and_hms_opt(9, 0, 0).unwrap());
        let mut form = TaskForm::edit(&task);
        form.set_due_text("soon");
        assert!(form.error().is_some_and(|e| e.contains("invalid date format")));
        assert_eq!(form.due().value_string(), "2025-06-10 09:00");

        let body = form.body(40, &Theme::plain());
        assert!(body.iter().any(|l| paint_line(l).contains("invalid date format")));
        form.set_due_text("2025-07-01");
        assert_eq!(form.error(), None);
    }

    #[test]
    fn edit_form_prefills_and_keeps_id() {
        let task = Task::new(9, "Existing")
            .with_status(Status::InProgress)
            .with_description("notes");
        let mut form = TaskForm::edit(&task);
        assert_eq!(form.title(), "Edit Task");
        form.set_focus(FormField::Save);
        let FormOutcome::Submitted(draft) = form.handle_key(Key::Space, today()) else {
            panic!("form did not submit");
        };
        assert_eq!(draft.id, Some(9));
        assert_eq!(draft.status, Status::InProgress);
        assert_eq!(draft.description, "notes");
    }

    #[test]
    fn body_marks_focused_row() {
        let form = TaskForm::new();
        let text: Vec<String> = form.body(40, &Theme::plain()).iter().map(paint_line).collect();
        assert!(text[0].starts_with("▸ Title"));
        assert!(text[1].starts_with("  Notes"));
        assert!(text.last().unwrap().ends_with("[ Save ]  [ Cancel ]"));
    }
}

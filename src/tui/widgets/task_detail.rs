use chrono::{NaiveDate, NaiveDateTime};
use ratatui::text::{Line, Span};

use crate::models::{format_due, Task};
use crate::tui::text::{paint_lines, wrap_text};
use crate::tui::theme::Theme;
use crate::tui::viewport::ScrollablePanel;

use super::item_row::{due_style, subtask_line};

pub const NO_SELECTION: &str = "No task selected";

const PROGRESS_WIDTH: usize = 10;
const LABEL_WIDTH: usize = 10;

/// Long form of the due distance used next to the full date.
pub fn due_phrase(due: NaiveDateTime, today: NaiveDate) -> String {
    let plural = |n: i64| if n == 1 { "" } else { "s" };
    match (due.date() - today).num_days() {
        d if d < 0 => format!("overdue by {} day{}", -d, plural(-d)),
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        d => format!("in {} day{}", d, plural(d)),
    }
}

/// `[█████░░░░░] 50%`
pub fn progress_bar(done: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (done * PROGRESS_WIDTH / total).min(PROGRESS_WIDTH)
    };
    let percent = if total == 0 { 0 } else { done * 100 / total };
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled),
        percent
    )
}

#[derive(Debug, Clone)]
pub struct TaskDetail<'a> {
    pub task: Option<&'a Task>,
    pub now: NaiveDateTime,
}

impl<'a> TaskDetail<'a> {
    pub fn new(task: Option<&'a Task>, now: NaiveDateTime) -> Self {
        Self {
            task,
            now,
        }
    }

    /// Detail for `tasks[selected]`; out-of-range indexes select nothing.
    pub fn select(tasks: &[&'a Task], selected: Option<usize>, now: NaiveDateTime) -> Self {
        let task = selected.and_then(|i| tasks.get(i).copied());
        Self::new(task, now)
    }

    fn field(label: &str, value: Vec<Span<'static>>, theme: &Theme) -> Line<'static> {
        let mut spans = vec![Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), theme.label)];
        spans.extend(value);
        Line::from(spans)
    }

    /// Body lines wrapped to `width` columns.
    pub fn build(&self, width: usize, theme: &Theme) -> Vec<Line<'static>> {
        let Some(task) = self.task else {
            return vec![Line::styled(NO_SELECTION, theme.muted)];
        };
        let today = self.now.date();
        let mut out = Vec::new();

        for row in wrap_text(&task.title, width) {
            out.push(Line::styled(row, theme.title));
        }
        out.push(Line::raw(""));

        out.push(Self::field(
            "Status",
            vec![Span::styled(
                format!("{} {}", task.status.icon(), task.status),
                theme.status_style(task.status),
            )],
            theme,
        ));

        let mut priority = task.priority.to_string();
        if let Some(marker) = task.priority.marker() {
            priority = format!("{} {}", priority, marker);
        }
        out.push(Self::field(
            "Priority",
            vec![Span::styled(priority, theme.priority_style(task.priority))],
            theme,
        ));

        let due = match task.due {
            Some(due) => vec![
                Span::raw(format_due(&due)),
                Span::styled(
                    format!(" ({})", due_phrase(due, today)),
                    due_style(task, today, theme),
                ),
            ],
            None => vec![Span::styled("none", theme.muted)],
        };
        out.push(Self::field("Due", due, theme));

        if !task.description.trim().is_empty() {
            out.push(Line::raw(""));
            out.push(Line::styled("Description", theme.label));
            for row in wrap_text(&task.description, width.saturating_sub(2)) {
                out.push(Line::raw(format!("  {}", row)));
            }
        }

        if task.subtask_count() > 0 {
            let (done, total) = (task.completed_subtasks(), task.subtask_count());
            out.push(Line::raw(""));
            out.push(Line::from(vec![
                Span::styled("Subtasks", theme.label),
                Span::styled(format!(" [{}/{}]", done, total), theme.muted),
            ]));
            for subtask in &task.subtasks {
                let mut line = subtask_line(subtask, theme);
                if let Some(first) = line.spans.first_mut() {
                    first.content = "  ".into();
                }
                out.push(line);
            }
            out.push(Self::field(
                "Progress",
                vec![Span::styled(progress_bar(done, total), theme.success)],
                theme,
            ));
        }
        out
    }

    pub fn lines(&self, width: u16, height: u16, theme: &Theme) -> Vec<Line<'static>> {
        let inner = (width as usize).saturating_sub(4);
        ScrollablePanel::new("Details", self.build(inner, theme))
            .lines(width, height, theme)
    }

    pub fn render(&self, width: u16, height: u16, theme: &Theme) -> String {
        paint_lines(&self.lines(width, height, theme))
    }
}

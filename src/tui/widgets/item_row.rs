use chrono::{NaiveDate, NaiveDateTime};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::models::{Subtask, Task};
use crate::tui::theme::Theme;

/// Options for rendering a task row
#[derive(Debug, Clone, Copy)]
pub struct ItemRowOptions {
    pub show_id: bool,
    pub show_due: bool,
}

impl ItemRowOptions {
    pub fn for_list_view() -> Self {
        Self {
            show_id: true,
            show_due: true,
        }
    }

    /// Timeline headers already say when things are due.
    pub fn for_timeline_view() -> Self {
        Self {
            show_id: true,
            show_due: false,
        }
    }
}

/// Short due label: `overdue 3d`, `today`, `tomorrow`, `in 4d` or `Jun 01`.
pub fn due_label(due: NaiveDateTime, today: NaiveDate) -> String {
    let days = (due.date() - today).num_days();
    match days {
        d if d < 0 => format!("overdue {}d", -d),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        2..=7 => format!("in {}d", days),
        _ => due.format("%b %d").to_string(),
    }
}

pub fn due_style(task: &Task, today: NaiveDate, theme: &Theme) -> Style {
    match task.due_date() {
        _ if task.status.is_done() => theme.muted,
        Some(date) if date < today => theme.error,
        Some(date) if date == today => theme.warning,
        _ => theme.info,
    }
}

/// Render a single task as a line with consistent styling
pub fn task_line(
    task: &Task,
    is_selected: bool,
    today: NaiveDate,
    options: ItemRowOptions,
    theme: &Theme,
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    let marker = if is_selected { ">" } else { " " };
    if options.show_id {
        let style = if is_selected { theme.info } else { theme.muted };
        spans.push(Span::styled(format!("{}{:>3}. ", marker, task.id), style));
    } else {
        spans.push(Span::styled(format!("{} ", marker), theme.info));
    }

    spans.push(Span::styled(
        format!("{} ", task.status.icon()),
        theme.status_style(task.status),
    ));
    spans.push(Span::styled(
        task.title.clone(),
        theme.task_title_style(task.status, task.priority),
    ));

    if let Some(marker) = task.priority.marker() {
        spans.push(Span::styled(
            format!(" {}", marker),
            theme.priority_style(task.priority),
        ));
    }

    if options.show_due {
        if let Some(due) = task.due {
            spans.push(Span::styled(
                format!(" {}", due_label(due, today)),
                due_style(task, today, theme),
            ));
        }
    }

    if task.subtask_count() > 0 {
        spans.push(Span::styled(
            format!(" [{}/{}]", task.completed_subtasks(), task.subtask_count()),
            theme.muted,
        ));
    }

    let mut line = Line::from(spans);
    if is_selected {
        line = line.style(theme.selected);
    }
    line
}

pub fn subtask_line(subtask: &Subtask, theme: &Theme) -> Line<'static> {
    let title_style = theme.task_title_style(subtask.status, subtask.priority);
    Line::from(vec![
        Span::raw("       "),
        Span::styled(
            format!("{} ", subtask.status.icon()),
            theme.status_style(subtask.status),
        ),
        Span::styled(subtask.title.clone(), title_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Status};
    use crate::tui::text::paint_line;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn due(d: u32) -> NaiveDateTime {
        day(d).and_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn due_labels_are_relative() {
        assert_eq!(due_label(due(7), day(10)), "overdue 3d");
        assert_eq!(due_label(due(10), day(10)), "today");
        assert_eq!(due_label(due(11), day(10)), "tomorrow");
        assert_eq!(due_label(due(14), day(10)), "in 4d");
        assert_eq!(due_label(due(30), day(10)), "Jun 30");
    }

    #[test]
    fn row_shows_all_parts() {
        let task = Task::new(3, "Write docs")
            .with_priority(Priority::High)
            .with_due(due(11))
            .with_subtask("outline", Status::Done)
            .with_subtask("draft", Status::Todo);
        let line = task_line(&task, true, day(10), ItemRowOptions::for_list_view(), &Theme::plain());
        assert_eq!(paint_line(&line), ">  3. ☐ Write docs (!!) tomorrow [1/2]");
    }

    #[test]
    fn timeline_rows_omit_due() {
        let task = Task::new(12, "Ship").with_status(Status::Done).with_due(due(9));
        let line = task_line(&task, false, day(10), ItemRowOptions::for_timeline_view(), &Theme::plain());
        assert_eq!(paint_line(&line), "  12. ✔ Ship (!)");
    }

    #[test]
    fn selected_row_carries_highlight() {
        let theme = Theme::default();
        let task = Task::new(1, "x");
        assert_eq!(
            task_line(&task, true, day(10), ItemRowOptions::for_list_view(), &theme).style,
            theme.selected
        );
    }
}

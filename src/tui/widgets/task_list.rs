use chrono::NaiveDateTime;
use ratatui::text::Line;

use crate::config::Config;
use crate::models::Task;
use crate::tui::text::paint_lines;
use crate::tui::theme::Theme;
use crate::tui::viewport::ScrollablePanel;

use super::item_row::{subtask_line, task_line, ItemRowOptions};

pub const EMPTY_MESSAGE: &str = "No tasks";

/// Styled rows for a panel plus the row each selectable task starts on.
#[derive(Debug, Clone, Default)]
pub struct PanelLines {
    pub lines: Vec<Line<'static>>,
    /// `item_line_map[i]` is the position of the task drawn on line `i`.
    pub item_line_map: Vec<Option<usize>>,
}

impl PanelLines {
    pub fn push(&mut self, line: Line<'static>, item: Option<usize>) {
        self.lines.push(line);
        self.item_line_map.push(item);
    }

    pub fn cursor_line(&self, selected: Option<usize>) -> Option<usize> {
        let selected = selected?;
        self.item_line_map.iter().position(|i| *i == Some(selected))
    }
}

/// Tasks shown by the list, in display order.
pub fn visible_tasks<'a>(tasks: &'a [Task], config: &Config) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| config.display_complete_tasks || !t.status.is_done())
        .collect()
}

/// The task list panel.
#[derive(Debug, Clone)]
pub struct TaskList<'a> {
    pub tasks: &'a [Task],
    /// Index into the visible tasks.
    pub selected: Option<usize>,
    pub now: NaiveDateTime,
}

impl<'a> TaskList<'a> {
    pub fn new(tasks: &'a [Task], now: NaiveDateTime) -> Self {
        Self {
            tasks,
            selected: None,
            now,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn build(&self, config: &Config, theme: &Theme) -> PanelLines {
        let today = self.now.date();
        let options = ItemRowOptions::for_list_view();
        let mut out = PanelLines::default();

        let visible = visible_tasks(self.tasks, config);
        if visible.is_empty() {
            out.push(Line::styled(format!("  {}", EMPTY_MESSAGE), theme.muted), None);
            return out;
        }

        for (i, task) in visible.iter().enumerate() {
            let is_selected = self.selected == Some(i);
            out.push(task_line(task, is_selected, today, options, theme), Some(i));
            if config.show_subtasks {
                for subtask in &task.subtasks {
                    out.push(subtask_line(subtask, theme), None);
                }
            }
        }
        out
    }

    pub fn lines(&self, width: u16, height: u16, config: &Config, theme: &Theme) -> Vec<Line<'static>> {
        let content = self.build(config, theme);
        let count = visible_tasks(self.tasks, config).len();
        let cursor = content.cursor_line(self.selected);
        ScrollablePanel::new(format!("Tasks ({})", count), content.lines)
            .cursor(cursor)
            .focused(true)
            .lines(width, height, theme)
    }

    pub fn render(&self, width: u16, height: u16, config: &Config, theme: &Theme) -> String {
        paint_lines(&self.lines(width, height, config, theme))
    }
}

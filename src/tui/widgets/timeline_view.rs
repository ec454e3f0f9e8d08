use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use ratatui::text::{Line, Span};

use crate::config::Config;
use crate::models::Task;
use crate::tui::text::paint_lines;
use crate::tui::theme::Theme;
use crate::tui::viewport::ScrollablePanel;

use super::item_row::{task_line, ItemRowOptions};
use super::task_list::{visible_tasks, PanelLines, EMPTY_MESSAGE};

/// Due-date group relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    Later,
    NoDueDate,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::Overdue,
        Bucket::Today,
        Bucket::Tomorrow,
        Bucket::ThisWeek,
        Bucket::Later,
        Bucket::NoDueDate,
    ];

    pub fn for_date(due: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(due) = due else {
            return Bucket::NoDueDate;
        };
        match (due - today).num_days() {
            d if d < 0 => Bucket::Overdue,
            0 => Bucket::Today,
            1 => Bucket::Tomorrow,
            2..=7 => Bucket::ThisWeek,
            _ => Bucket::Later,
        }
    }

    pub fn for_task(task: &Task, today: NaiveDate) -> Self {
        Self::for_date(task.due_date(), today)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bucket::Overdue => "Overdue",
            Bucket::Today => "Today",
            Bucket::Tomorrow => "Tomorrow",
            Bucket::ThisWeek => "This Week",
            Bucket::Later => "Later",
            Bucket::NoDueDate => "No Due Date",
        })
    }
}

/// Visible tasks grouped into non-empty buckets, each sorted by due time
/// then id.
pub fn group_tasks<'a>(
    tasks: &'a [Task],
    today: NaiveDate,
    config: &Config,
) -> Vec<(Bucket, Vec<&'a Task>)> {
    let visible = visible_tasks(tasks, config);
    Bucket::ALL
        .iter()
        .filter_map(|&bucket| {
            let mut members: Vec<&Task> = visible
                .iter()
                .copied()
                .filter(|t| Bucket::for_task(t, today) == bucket)
                .collect();
            if members.is_empty() {
                return None;
            }
            members.sort_by_key(|t| (t.due, t.id));
            Some((bucket, members))
        })
        .collect()
}

/// Tasks in the order the timeline shows them; the cursor indexes this.
pub fn ordered_tasks<'a>(tasks: &'a [Task], today: NaiveDate, config: &Config) -> Vec<&'a Task> {
    group_tasks(tasks, today, config)
        .into_iter()
        .flat_map(|(_, members)| members)
        .collect()
}

#[derive(Debug, Clone)]
pub struct TimelineView<'a> {
    pub tasks: &'a [Task],
    /// Index into [`ordered_tasks`].
    pub selected: Option<usize>,
    pub now: NaiveDateTime,
}

impl<'a> TimelineView<'a> {
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
        let options = ItemRowOptions::for_timeline_view();
        let mut out = PanelLines::default();

        let groups = group_tasks(self.tasks, today, config);
        if groups.is_empty() {
            out.push(Line::styled(format!("  {}", EMPTY_MESSAGE), theme.muted), None);
            return out;
        }

        let mut position = 0;
        for (i, (bucket, members)) in groups.iter().enumerate() {
            if i > 0 {
                out.push(Line::raw(""), None);
            }
            let done = members.iter().filter(|t| t.status.is_done()).count();
            let header_style = match bucket {
                Bucket::Overdue => theme.urgent,
                _ => theme.header,
            };
            out.push(
                Line::from(vec![
                    Span::styled(bucket.to_string(), header_style),
                    Span::styled(format!(" [{}/{}]", done, members.len()), theme.muted),
                ]),
                None,
            );
            for task in members {
                let is_selected = self.selected == Some(position);
                out.push(task_line(task, is_selected, today, options, theme), Some(position));
                position += 1;
            }
        }
        out
    }

    pub fn lines(&self, width: u16, height: u16, config: &Config, theme: &Theme) -> Vec<Line<'static>> {
        let content = self.build(config, theme);
        let cursor = content.cursor_line(self.selected);
        ScrollablePanel::new("Timeline", content.lines)
            .cursor(cursor)
            .focused(true)
            .lines(width, height, theme)
    }

    pub fn render(&self, width: u16, height: u16, config: &Config, theme: &Theme) -> String {
        paint_lines(&self.lines(width, height, config, theme))
    }
}

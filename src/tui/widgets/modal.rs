use ratatui::text::{Line, Span};

use crate::tui::text::{blank_line, paint_lines};
use crate::tui::theme::Theme;
use crate::tui::viewport::ScrollablePanel;

/// A titled popup box centred inside a larger area.
#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub body: Vec<Line<'static>>,
    pub width: u16,
}

impl Modal {
    pub fn new(title: impl Into<String>, body: Vec<Line<'static>>) -> Self {
        Self {
            title: title.into(),
            body,
            width: 50,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Sized to the body plus borders, clamped to the area.
    fn box_size(&self, area_width: u16, area_height: u16) -> (u16, u16) {
        let height = u16::try_from(self.body.len() + 2).unwrap_or(u16::MAX);
        (self.width.min(area_width), height.min(area_height))
    }

    /// Exactly `area_height` lines of `area_width` columns with the box in
    /// the middle.
    pub fn lines(&self, area_width: u16, area_height: u16, theme: &Theme) -> Vec<Line<'static>> {
        let (box_width, box_height) = self.box_size(area_width, area_height);
        let area_w = area_width as usize;
        let left = (area_width - box_width) as usize / 2;
        let right = area_w - left - box_width as usize;
        let top = (area_height - box_height) as usize / 2;

        let panel = ScrollablePanel::new(self.title.clone(), self.body.clone()).focused(true);
        let mut out: Vec<Line<'static>> = (0..top).map(|_| blank_line(area_w)).collect();
        for row in panel.lines(box_width, box_height, theme) {
            let mut spans = vec![Span::raw(" ".repeat(left))];
            spans.extend(row.spans);
            spans.push(Span::raw(" ".repeat(right)));
            out.push(Line::from(spans));
        }
        while out.len() < area_height as usize {
            out.push(blank_line(area_w));
        }
        out
    }

    pub fn render(&self, area_width: u16, area_height: u16, theme: &Theme) -> String {
        paint_lines(&self.lines(area_width, area_height, theme))
    }
}

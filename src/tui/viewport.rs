//! Scrollable viewport over a block of lines.
//!
//! Every panel renders its full content and lets this module pick the slice
//! that fits. The window is recomputed from scratch on each call: the caller
//! keeps only the offset (and optionally a cursor line) between renders.
//!
//! When content overflows, `▲`/`▼` rows mark hidden lines above/below. An
//! indicator row stands in for the window line it covers, so a window at
//! offset `o` and height `h` shows content lines
//! `o + top .. o + h - bottom`. This keeps the final line reachable at the
//! largest offset.

use std::ops::Range;

use ratatui::text::{Line, Span};

use super::text::{blank_line, center_line, fit_line, paint_lines, truncate_str};
use super::theme::Theme;

pub const SCROLL_UP_INDICATOR: &str = "▲";
pub const SCROLL_DOWN_INDICATOR: &str = "▼";
pub const CONTENT_UNAVAILABLE: &str = "(content unavailable)";

/// Viewports shorter than this show no indicator rows.
const MIN_INDICATOR_HEIGHT: usize = 3;

/// Resolved placement of a viewport over `total` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub total: usize,
    pub height: usize,
    /// First line of the window, in `0..=max_offset`.
    pub offset: usize,
    pub max_offset: usize,
    pub need_top: bool,
    pub need_bottom: bool,
}

impl Window {
    /// Place a `height`-row window over `total` lines.
    ///
    /// A cursor overrides `offset` and centres itself; either way the offset
    /// is clamped to `[0, total - height]`.
    pub fn compute(total: usize, offset: usize, height: usize, cursor: Option<usize>) -> Self {
        if total <= height {
            return Self {
                total,
                height,
                offset: 0,
                max_offset: 0,
                need_top: false,
                need_bottom: false,
            };
        }

        let max_offset = total - height;
        let resolved = match cursor {
            Some(cursor) => cursor
                .min(total - 1)
                .saturating_sub(height / 2)
                .min(max_offset),
            None => offset.min(max_offset),
        };
        if cursor.is_none() && resolved != offset {
            tracing::trace!(requested = offset, clamped = resolved, "viewport offset clamped");
        }

        let indicators = height >= MIN_INDICATOR_HEIGHT;
        Self {
            total,
            height,
            offset: resolved,
            max_offset,
            need_top: indicators && resolved > 0,
            need_bottom: indicators && resolved < max_offset,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.total > self.height
    }

    /// Rows available for content once indicators are reserved.
    pub fn visible_rows(&self) -> usize {
        self.height - usize::from(self.need_top) - usize::from(self.need_bottom)
    }

    /// Indices of the content lines actually shown.
    pub fn content_range(&self) -> Range<usize> {
        let start = (self.offset + usize::from(self.need_top)).min(self.total);
        let end = (start + self.visible_rows()).min(self.total);
        start..end
    }

    pub fn contains(&self, line: usize) -> bool {
        self.content_range().contains(&line)
    }
}

/// One render's worth of viewport state over plain text.
#[derive(Debug, Clone)]
pub struct ScrollRegion<'a> {
    lines: Vec<&'a str>,
    offset: usize,
    viewport_height: usize,
    cursor_line: Option<usize>,
}

impl<'a> ScrollRegion<'a> {
    pub fn new(content: &'a str, offset: usize, viewport_height: usize) -> Self {
        Self {
            lines: content
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect(),
            offset,
            viewport_height,
            cursor_line: None,
        }
    }

    pub fn with_cursor(mut self, cursor_line: Option<usize>) -> Self {
        self.cursor_line = cursor_line;
        self
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn window(&self) -> Window {
        Window::compute(
            self.lines.len(),
            self.offset,
            self.viewport_height,
            self.cursor_line,
        )
    }

    /// Exactly `viewport_height` lines joined by `\n`, or a placeholder when
    /// the viewport has no rows.
    pub fn render(&self) -> String {
        if self.viewport_height == 0 {
            return CONTENT_UNAVAILABLE.to_string();
        }
        let window = self.window();
        let mut out: Vec<&str> = Vec::with_capacity(self.viewport_height);

        if window.need_top {
            out.push(SCROLL_UP_INDICATOR);
        }
        if let Some(slice) = self.lines.get(window.content_range()) {
            out.extend_from_slice(slice);
        }
        let content_end = self.viewport_height - usize::from(window.need_bottom);
        while out.len() < content_end {
            out.push("");
        }
        if window.need_bottom {
            out.push(SCROLL_DOWN_INDICATOR);
        }
        out.join("\n")
    }
}

/// Render `content` through a viewport of `height` rows.
pub fn render_scrollable(content: &str, offset: usize, height: usize, cursor: Option<usize>) -> String {
    ScrollRegion::new(content, offset, height)
        .with_cursor(cursor)
        .render()
}

/// A bordered, titled box whose body scrolls through styled lines.
#[derive(Debug, Clone, Default)]
pub struct ScrollablePanel<'a> {
    pub title: String,
    pub lines: Vec<Line<'a>>,
    pub offset: usize,
    pub cursor: Option<usize>,
    pub focused: bool,
}

impl<'a> ScrollablePanel<'a> {
    pub fn new(title: impl Into<String>, lines: Vec<Line<'a>>) -> Self {
        Self {
            title: title.into(),
            lines,
            ..Self::default()
        }
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Window over the body for a panel of the given outer height.
    pub fn window(&self, height: u16) -> Window {
        let inner = (height as usize).saturating_sub(2);
        Window::compute(self.lines.len(), self.offset, inner, self.cursor)
    }

    /// Exactly `height` lines of exactly `width` columns.
    pub fn lines(&self, width: u16, height: u16, theme: &Theme) -> Vec<Line<'static>> {
        let (width, height) = (width as usize, height as usize);
        if width < 4 || height < 3 {
            return (0..height).map(|_| blank_line(width)).collect();
        }
        let inner_width = width - 4;
        let inner_height = height - 2;
        let border = if self.focused {
            theme.border_focused
        } else {
            theme.border
        };

        let mut out = Vec::with_capacity(height);
        out.push(self.top_border(width, theme));

        let window = Window::compute(self.lines.len(), self.offset, inner_height, self.cursor);
        let mut body: Vec<Line<'static>> = Vec::with_capacity(inner_height);
        if window.need_top {
            body.push(center_line(
                &Line::styled(SCROLL_UP_INDICATOR, theme.muted),
                inner_width,
            ));
        }
        if let Some(slice) = self.lines.get(window.content_range()) {
            body.extend(slice.iter().map(|line| fit_line(line, inner_width)));
        }
        let content_end = inner_height - usize::from(window.need_bottom);
        while body.len() < content_end {
            body.push(blank_line(inner_width));
        }
        if window.need_bottom {
            body.push(center_line(
                &Line::styled(SCROLL_DOWN_INDICATOR, theme.muted),
                inner_width,
            ));
        }

        for row in body {
            let mut spans = vec![Span::styled("│ ", border)];
            spans.extend(
                row.spans
                    .into_iter()
                    .map(|s| Span::styled(s.content, row.style.patch(s.style))),
            );
            spans.push(Span::styled(" │", border));
            out.push(Line::from(spans));
        }

        out.push(Line::from(Span::styled(
            format!("╰{}╯", "─".repeat(width - 2)),
            border,
        )));
        out
    }

    pub fn render(&self, width: u16, height: u16, theme: &Theme) -> String {
        paint_lines(&self.lines(width, height, theme))
    }

    fn top_border(&self, width: usize, theme: &Theme) -> Line<'static> {
        let border = if self.focused {
            theme.border_focused
        } else {
            theme.border
        };
        // "╭─ " + title + " " + fill + "╮"
        let title = truncate_str(&self.title, width.saturating_sub(6));
        if title.is_empty() {
            return Line::from(Span::styled(format!("╭{}╮", "─".repeat(width - 2)), border));
        }
        let fill = width.saturating_sub(5 + super::text::display_width(&title));
        let title_style = if self.focused {
            theme.header
        } else {
            theme.title
        };
        Line::from(vec![
            Span::styled("╭─ ", border),
            Span::styled(title, title_style),
            Span::styled(format!(" {}╮", "─".repeat(fill)), border),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::text::paint_line;
    use proptest::prelude::*;

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n")
    }

    fn rows(rendered: &str) -> Vec<&str> {
        rendered.split('\n').collect()
    }

    #[test]
    fn zero_height_renders_placeholder() {
        assert_eq!(render_scrollable("a\nb", 0, 0, None), CONTENT_UNAVAILABLE);
    }

    #[test]
    fn short_content_is_padded_without_indicators() {
        let out = render_scrollable("a\nb", 0, 4, None);
        assert_eq!(rows(&out), vec!["a", "b", "", ""]);
        assert!(!out.contains(SCROLL_UP_INDICATOR));
        assert!(!out.contains(SCROLL_DOWN_INDICATOR));
    }

    #[test]
    fn top_of_long_content_shows_only_down_indicator() {
        let out = render_scrollable(&numbered(10), 0, 5, None);
        assert_eq!(
            rows(&out),
            vec!["line 0", "line 1", "line 2", "line 3", SCROLL_DOWN_INDICATOR]
        );
    }

    #[test]
    fn middle_window_shows_both_indicators() {
        let out = render_scrollable(&numbered(10), 3, 5, None);
        assert_eq!(
            rows(&out),
            vec![SCROLL_UP_INDICATOR, "line 4", "line 5", "line 6", SCROLL_DOWN_INDICATOR]
        );
    }

    #[test]
    fn offset_past_end_is_clamped() {
        let window = ScrollRegion::new(&numbered(10), 99, 5).window();
        assert_eq!(window.offset, 5);
        assert!(window.need_top);
        assert!(!window.need_bottom);
        let out = render_scrollable(&numbered(10), 99, 5, None);
        assert_eq!(
            rows(&out),
            vec![SCROLL_UP_INDICATOR, "line 6", "line 7", "line 8", "line 9"]
        );
    }

    #[test]
    fn cursor_near_end_clamps_to_max_offset() {
        let content = numbered(10);
        let region = ScrollRegion::new(&content, 0, 5).with_cursor(Some(8));
        let window = region.window();
        assert_eq!(window.offset, 5);
        assert_eq!(window.max_offset, 5);
        assert!(window.contains(8));
        assert!(window.content_range().start >= 5);
        assert!(region.render().contains("line 8"));
    }

    #[test]
    fn cursor_is_centred_when_room_allows() {
        let window = Window::compute(100, 0, 11, Some(50));
        assert_eq!(window.offset, 45);
        assert!(window.contains(50));
    }

    #[test]
    fn cursor_beyond_content_is_treated_as_last_line() {
        let window = Window::compute(10, 0, 5, Some(40));
        assert_eq!(window.offset, 5);
        assert!(window.contains(9));
    }

    #[test]
    fn tiny_viewports_skip_indicators() {
        let out = render_scrollable(&numbered(10), 4, 2, None);
        assert_eq!(rows(&out), vec!["line 4", "line 5"]);
        let out = render_scrollable(&numbered(10), 4, 1, Some(7));
        assert_eq!(rows(&out), vec!["line 7"]);
    }

    #[test]
    fn crlf_content_drops_carriage_returns() {
        let region = ScrollRegion::new("one\r\ntwo\r\n", 0, 5);
        assert_eq!(region.line_count(), 3);
        let out = region.render();
        assert!(!out.contains('\r'));
        assert_eq!(rows(&out), vec!["one", "two", "", "", ""]);
    }

    #[test]
    fn panel_has_exact_dimensions_and_title() {
        let lines: Vec<Line> = (0..20).map(|i| Line::raw(format!("item {}", i))).collect();
        let panel = ScrollablePanel::new("Tasks", lines).cursor(Some(19));
        let rendered = panel.lines(20, 8, &Theme::plain());
        assert_eq!(rendered.len(), 8);
        assert!(rendered.iter().all(|l| l.width() == 20));
        let top = paint_line(&rendered[0]);
        assert!(top.starts_with("╭─ Tasks "));
        assert!(top.ends_with('╮'));
        let body: Vec<String> = rendered.iter().map(|l| paint_line(l)).collect();
        assert!(body[1].contains(SCROLL_UP_INDICATOR));
        assert!(body.iter().any(|l| l.contains("item 19")));
        assert!(body[6].contains("item 19"));
    }

    #[test]
    fn panel_truncates_long_lines() {
        let lines = vec![Line::raw("a very long line that will not fit")];
        let rendered = ScrollablePanel::new("", lines).render(14, 3, &Theme::plain());
        let rows: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(rows[1], "│ a very lo… │");
        assert_eq!(rows[0], "╭────────────╮");
    }

    #[test]
    fn degenerate_panel_is_blank() {
        let rendered = ScrollablePanel::new("x", vec![Line::raw("y")]).lines(3, 2, &Theme::plain());
        assert_eq!(rendered.len(), 2);
        assert!(rendered.iter().all(|l| l.width() == 3));
    }

    proptest! {
        #[test]
        fn output_has_exactly_height_lines(
            total in 1usize..60,
            offset in 0usize..80,
            height in 1usize..30,
            cursor in proptest::option::of(0usize..60),
        ) {
            let content = numbered(total);
            let out = render_scrollable(&content, offset, height, cursor);
            prop_assert_eq!(out.split('\n').count(), height);
        }

        #[test]
        fn offset_stays_within_bounds(
            total in 1usize..60,
            offset in 0usize..80,
            height in 1usize..30,
        ) {
            let window = Window::compute(total, offset, height, None);
            prop_assert!(window.offset <= total.saturating_sub(height));
        }

        #[test]
        fn rerendering_with_resolved_offset_is_idempotent(
            total in 1usize..60,
            offset in 0usize..80,
            height in 1usize..30,
            cursor in proptest::option::of(0usize..60),
        ) {
            let content = numbered(total);
            let window = ScrollRegion::new(&content, offset, height).with_cursor(cursor).window();
            let first = render_scrollable(&content, offset, height, cursor);
            let again = render_scrollable(&content, window.offset, height, None);
            prop_assert_eq!(first, again);
        }

        #[test]
        fn cursor_is_always_visible(
            total in 1usize..60,
            height in 1usize..30,
            seed in 0usize..1000,
        ) {
            let cursor = seed % total;
            let window = Window::compute(total, 0, height, Some(cursor));
            prop_assert!(window.contains(cursor), "{:?} hides cursor {}", window, cursor);
            prop_assert!(window.offset <= cursor);
        }
    }
}

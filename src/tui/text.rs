//! Styled-text helpers: display-width math over `ratatui` lines and the
//! conversion of those lines into ANSI-escaped strings.
//!
//! Widgets build `Line`s out of styled `Span`s and only turn them into
//! strings at the very end, so width calculations never see escape codes.

use crossterm::style::{Attribute, Color as CrosstermColor, ContentStyle, StyledContent};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ELLIPSIS: &str = "…";

const ATTRIBUTES: [(Modifier, Attribute); 9] = [
    (Modifier::BOLD, Attribute::Bold),
    (Modifier::DIM, Attribute::Dim),
    (Modifier::ITALIC, Attribute::Italic),
    (Modifier::UNDERLINED, Attribute::Underlined),
    (Modifier::SLOW_BLINK, Attribute::SlowBlink),
    (Modifier::RAPID_BLINK, Attribute::RapidBlink),
    (Modifier::REVERSED, Attribute::Reverse),
    (Modifier::HIDDEN, Attribute::Hidden),
    (Modifier::CROSSED_OUT, Attribute::CrossedOut),
];

fn crossterm_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::Black => CrosstermColor::Black,
        Color::Red => CrosstermColor::DarkRed,
        Color::Green => CrosstermColor::DarkGreen,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Magenta => CrosstermColor::DarkMagenta,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::Gray => CrosstermColor::Grey,
        Color::DarkGray => CrosstermColor::DarkGrey,
        Color::LightRed => CrosstermColor::Red,
        Color::LightGreen => CrosstermColor::Green,
        Color::LightYellow => CrosstermColor::Yellow,
        Color::LightBlue => CrosstermColor::Blue,
        Color::LightMagenta => CrosstermColor::Magenta,
        Color::LightCyan => CrosstermColor::Cyan,
        Color::White => CrosstermColor::White,
        Color::Indexed(i) => CrosstermColor::AnsiValue(i),
        Color::Rgb(r, g, b) => CrosstermColor::Rgb { r, g, b },
    }
}

fn content_style(style: Style) -> ContentStyle {
    let mut out = ContentStyle::new();
    out.foreground_color = style.fg.map(crossterm_color);
    out.background_color = style.bg.map(crossterm_color);
    let modifiers = style.add_modifier.difference(style.sub_modifier);
    for (modifier, attribute) in ATTRIBUTES {
        if modifiers.contains(modifier) {
            out.attributes.set(attribute);
        }
    }
    out
}

/// Render `text` with `style` as an ANSI-escaped string.
pub fn paint(text: &str, style: Style) -> String {
    if style == Style::default() {
        return text.to_string();
    }
    StyledContent::new(content_style(style), text).to_string()
}

pub fn paint_line(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|span| paint(&span.content, line.style.patch(span.style)))
        .collect()
}

/// Paint lines and join them with newlines.
pub fn paint_lines(lines: &[Line<'_>]) -> String {
    lines.iter().map(paint_line).collect::<Vec<_>>().join("\n")
}

pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Cut `text` to at most `max` columns, marking the cut with an ellipsis.
pub fn truncate_str(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(ELLIPSIS);
    out
}

/// Truncate or pad a styled line to exactly `width` columns.
///
/// Padding carries the line style so highlighted rows span the full width.
pub fn fit_line(line: &Line<'_>, width: usize) -> Line<'static> {
    let total = line.width();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    if total <= width {
        spans.extend(
            line.spans
                .iter()
                .map(|s| Span::styled(s.content.to_string(), s.style)),
        );
        used = total;
    } else if width > 0 {
        let budget = width - 1;
        let mut last_style = Style::default();
        'outer: for span in &line.spans {
            let mut taken = String::new();
            for ch in span.content.chars() {
                let w = ch.width().unwrap_or(0);
                if used + w > budget {
                    if !taken.is_empty() {
                        spans.push(Span::styled(taken, span.style));
                    }
                    last_style = span.style;
                    break 'outer;
                }
                taken.push(ch);
                used += w;
            }
            last_style = span.style;
            if !taken.is_empty() {
                spans.push(Span::styled(taken, span.style));
            }
        }
        spans.push(Span::styled(ELLIPSIS, last_style));
        used += 1;
    }

    if used < width {
        spans.push(Span::raw(" ".repeat(width - used)));
    }
    Line::from(spans).style(line.style)
}

/// Centre a line inside `width` columns.
pub fn center_line(line: &Line<'_>, width: usize) -> Line<'static> {
    let left = width.saturating_sub(line.width()) / 2;
    let mut spans = vec![Span::raw(" ".repeat(left))];
    spans.extend(
        line.spans
            .iter()
            .map(|s| Span::styled(s.content.to_string(), line.style.patch(s.style))),
    );
    fit_line(&Line::from(spans), width)
}

pub fn blank_line(width: usize) -> Line<'static> {
    Line::raw(" ".repeat(width))
}

/// Word-wrap plain text to `width` columns. Words longer than a line are
/// split; explicit newlines start a new paragraph.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if current_width > 0 && current_width + 1 + word_width > width {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if word_width > width {
                for ch in word.chars() {
                    let w = ch.width().unwrap_or(0);
                    if current_width + w > width {
                        out.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += w;
                }
                continue;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        paint_line(line)
    }

    #[test]
    fn default_style_paints_plain_text() {
        assert_eq!(paint("hello", Style::default()), "hello");
    }

    #[test]
    fn styled_text_carries_escape_codes() {
        let painted = paint("hi", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        assert!(painted.contains("hi"));
        assert!(painted.contains('\u{1b}'));
        assert_ne!(painted, "hi");
    }

    #[test]
    fn truncate_marks_cut_with_ellipsis() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_str("abc", 0), "");
        assert_eq!(display_width(&truncate_str("日本語テキスト", 5)), 5);
    }

    #[test]
    fn fit_line_pads_to_width() {
        let line = Line::from(vec![Span::raw("ab"), Span::raw("cd")]);
        let fitted = fit_line(&line, 6);
        assert_eq!(fitted.width(), 6);
        assert_eq!(plain(&fitted), "abcd  ");
    }

    #[test]
    fn fit_line_truncates_across_spans() {
        let line = Line::from(vec![Span::raw("abc"), Span::raw("defgh")]);
        let fitted = fit_line(&line, 5);
        assert_eq!(plain(&fitted), "abcd…");
        assert_eq!(fitted.width(), 5);
    }

    #[test]
    fn fit_line_handles_wide_chars_at_boundary() {
        let line = Line::raw("日本語");
        let fitted = fit_line(&line, 4);
        assert_eq!(fitted.width(), 4);
        assert_eq!(plain(&fitted), "日… ");
    }

    #[test]
    fn center_line_pads_both_sides() {
        let centered = center_line(&Line::raw("ab"), 6);
        assert_eq!(plain(&centered), "  ab  ");
    }

    #[test]
    fn wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
        assert!(wrap_text("anything", 0).is_empty());
    }
}

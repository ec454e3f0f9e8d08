use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::tui::key::{Key, KeyOutcome};
use crate::tui::theme::Theme;

/// Single-line text field. The cursor is a char index, not a byte offset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        let count = self.char_count();
        match key {
            Key::Char(c) => {
                self.insert(c);
                KeyOutcome::Changed
            }
            Key::Space => {
                self.insert(' ');
                KeyOutcome::Changed
            }
            Key::Backspace => {
                if self.cursor == 0 {
                    return KeyOutcome::Handled;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                KeyOutcome::Changed
            }
            Key::Delete => {
                if self.cursor >= count {
                    return KeyOutcome::Handled;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                KeyOutcome::Changed
            }
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                KeyOutcome::Handled
            }
            Key::Right => {
                self.cursor = (self.cursor + 1).min(count);
                KeyOutcome::Handled
            }
            Key::Home => {
                self.cursor = 0;
                KeyOutcome::Handled
            }
            Key::End => {
                self.cursor = count;
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Render at most `width` chars around the cursor. The cursor cell takes
    /// the focus style.
    pub fn line(&self, width: usize, focused: bool, theme: &Theme) -> Line<'static> {
        let chars: Vec<char> = self.value.chars().collect();
        let count = chars.len();
        let width = width.max(1);

        // Reserve one column for the cursor when it sits past the end.
        let room = if focused { width - 1 } else { width };
        let (start, end) = if count > room {
            let start = self.cursor.saturating_sub(room / 2);
            let end = (start + room).min(count);
            (end.saturating_sub(room), end)
        } else {
            (0, count)
        };

        let text_style = if focused { Style::default() } else { theme.muted };
        if !focused {
            let shown: String = chars[start..end].iter().collect();
            return Line::from(Span::styled(shown, text_style));
        }

        let cursor = self.cursor.clamp(start, end);
        let before: String = chars[start..cursor].iter().collect();
        let under = chars.get(cursor).copied().filter(|_| cursor < end);
        let after_start = if under.is_some() { cursor + 1 } else { cursor };
        let after: String = chars[after_start..end].iter().collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(under.unwrap_or(' ').to_string(), theme.focused),
            Span::raw(after),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::text::paint_line;

    #[test]
    fn typing_inserts_at_cursor() {
        let mut input = TextInput::new("ac");
        input.handle_key(Key::Left);
        input.handle_key(Key::Char('b'));
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor(), 2);
        input.handle_key(Key::End);
        input.handle_key(Key::Space);
        input.handle_key(Key::Char('d'));
        assert_eq!(input.value(), "abc d");
    }

    #[test]
    fn backspace_and_delete_handle_multibyte() {
        let mut input = TextInput::new("héllo");
        input.handle_key(Key::Home);
        input.handle_key(Key::Right);
        input.handle_key(Key::Delete);
        assert_eq!(input.value(), "hllo");
        input.handle_key(Key::Backspace);
        assert_eq!(input.value(), "llo");
        assert_eq!(input.handle_key(Key::Backspace), KeyOutcome::Handled);
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn navigation_keys_outside_field_are_ignored() {
        let mut input = TextInput::new("x");
        assert_eq!(input.handle_key(Key::Tab), KeyOutcome::Ignored);
        assert_eq!(input.handle_key(Key::Enter), KeyOutcome::Ignored);
        assert_eq!(input.handle_key(Key::Esc), KeyOutcome::Ignored);
        assert_eq!(input.handle_key(Key::Up), KeyOutcome::Ignored);
    }

    #[test]
    fn focused_line_shows_cursor_cell() {
        let theme = Theme::plain();
        let input = TextInput::new("abc");
        assert_eq!(paint_line(&input.line(10, true, &theme)), "abc ");
        assert_eq!(paint_line(&input.line(10, false, &theme)), "abc");
    }

    #[test]
    fn long_values_scroll_with_cursor() {
        let theme = Theme::plain();
        let input = TextInput::new("abcdefghijklmnop");
        let line = input.line(6, true, &theme);
        assert_eq!(paint_line(&line), "lmnop ");
        assert_eq!(line.width(), 6);
    }
}

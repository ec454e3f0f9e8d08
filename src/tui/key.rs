use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keyboard input understood by the widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Translate a crossterm event. Key releases and keys the widgets have
    /// no use for yield `None`.
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let key = match event.code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
                tracing::trace!(%c, "ignoring control chord");
                return None;
            }
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Tab if event.modifiers.contains(KeyModifiers::SHIFT) => Key::BackTab,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => return None,
        };
        Some(key)
    }
}

impl TryFrom<KeyEvent> for Key {
    type Error = KeyEvent;

    fn try_from(event: KeyEvent) -> Result<Self, Self::Error> {
        Key::from_event(event).ok_or(event)
    }
}

/// Whether a form/widget consumed a key or left it for its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Consumed; value unchanged (focus or mode moved).
    Handled,
    /// Consumed and the widget value changed.
    Changed,
    /// Not consumed; the owner may act on it.
    Ignored,
}

impl KeyOutcome {
    pub fn is_consumed(self) -> bool {
        self != KeyOutcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn translates_common_keys() {
        assert_eq!(Key::from_event(press(KeyCode::Char(' '))), Some(Key::Space));
        assert_eq!(Key::from_event(press(KeyCode::Char('x'))), Some(Key::Char('x')));
        assert_eq!(Key::from_event(press(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(Key::from_event(press(KeyCode::BackTab)), Some(Key::BackTab));
        assert_eq!(
            Key::from_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)),
            Some(Key::BackTab)
        );
    }

    #[test]
    fn drops_releases_and_unknown_keys() {
        let mut release = press(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(Key::from_event(release), None);
        assert_eq!(Key::from_event(press(KeyCode::F(5))), None);
        assert_eq!(
            Key::from_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
        assert!(Key::try_from(press(KeyCode::Insert)).is_err());
    }
}

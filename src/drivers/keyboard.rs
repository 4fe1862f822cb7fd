//! Keyboard event cleanup applied before events reach the window manager.
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Drops key releases and repeats, and folds modifier noise so bindings can
/// compare against plain combos.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer;

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(mut key) => {
                if key.kind != KeyEventKind::Press {
                    return None;
                }
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                // The character already carries its case.
                if matches!(key.code, KeyCode::Char(_)) {
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                Some(Event::Key(key))
            }
            other => Some(other),
        }
    }
}

use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Window manager shortcuts
    PushSettingsDock,
    PushLogDock,
    PopDock,
    AddDepthPane,
    AddImuGroup,
    ClearFullscreen,
    ClearWindows,
    // Pane and dock controls
    ToggleMaximize,
    CloseDock,
    MenuUp,
    MenuDown,
    ToggleSelection,
    ScrollPageUp,
    ScrollPageDown,
    ScrollEnd,
}

impl Action {
    /// Host-level shortcuts, in the order they are checked and listed.
    pub const SHORTCUTS: [Action; 8] = [
        Action::Quit,
        Action::PushSettingsDock,
        Action::PushLogDock,
        Action::PopDock,
        Action::AddDepthPane,
        Action::AddImuGroup,
        Action::ClearFullscreen,
        Action::ClearWindows,
    ];

    /// One-word label used in the menu bar hints.
    pub fn short_label(&self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::PushSettingsDock => "settings",
            Action::PushLogDock => "log",
            Action::PopDock => "pop",
            Action::AddDepthPane => "add",
            Action::AddImuGroup => "imu",
            Action::ClearFullscreen => "tile",
            Action::ClearWindows => "clear",
            Action::ToggleMaximize => "max",
            Action::CloseDock => "close",
            Action::MenuUp => "up",
            Action::MenuDown => "down",
            Action::ToggleSelection => "toggle",
            Action::ScrollPageUp => "pgup",
            Action::ScrollPageDown => "pgdn",
            Action::ScrollEnd => "end",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::PushSettingsDock => "Open settings dock",
            Action::PushLogDock => "Open log dock",
            Action::PopDock => "Close the active dock",
            Action::AddDepthPane => "Add a depth pane",
            Action::AddImuGroup => "Add the IMU group",
            Action::ClearFullscreen => "Leave fullscreen",
            Action::ClearWindows => "Remove all panes",
            Action::ToggleMaximize => "Toggle maximize (focused pane)",
            Action::CloseDock => "Close dock (Esc)",
            Action::MenuUp => "Menu up",
            Action::MenuDown => "Menu down",
            Action::ToggleSelection => "Toggle selection / space",
            Action::ScrollPageUp => "Scroll page up",
            Action::ScrollPageDown => "Scroll page down",
            Action::ScrollEnd => "Scroll to end",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) if self.mods.is_empty() => c.to_string(),
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(PushSettingsDock, KeyCombo::plain('s'));
        kb.add(PushLogDock, KeyCombo::plain('l'));
        kb.add(PopDock, KeyCombo::plain('p'));
        kb.add(AddDepthPane, KeyCombo::plain('a'));
        kb.add(AddImuGroup, KeyCombo::plain('g'));
        kb.add(ClearFullscreen, KeyCombo::plain('f'));
        kb.add(ClearWindows, KeyCombo::plain('c'));
        kb.add(ToggleMaximize, KeyCombo::plain('m'));
        // Dock controls
        kb.add(CloseDock, KeyCombo::new(KeyCode::Esc, KeyModifiers::NONE));
        kb.add(CloseDock, KeyCombo::plain('q'));
        kb.add(MenuUp, KeyCombo::new(KeyCode::Up, KeyModifiers::NONE));
        kb.add(MenuUp, KeyCombo::plain('k'));
        kb.add(MenuDown, KeyCombo::new(KeyCode::Down, KeyModifiers::NONE));
        kb.add(MenuDown, KeyCombo::plain('j'));
        kb.add(ToggleSelection, KeyCombo::plain(' '));
        kb.add(
            ToggleSelection,
            KeyCombo::new(KeyCode::Enter, KeyModifiers::NONE),
        );
        kb.add(
            ScrollPageUp,
            KeyCombo::new(KeyCode::PageUp, KeyModifiers::NONE),
        );
        kb.add(
            ScrollPageDown,
            KeyCombo::new(KeyCode::PageDown, KeyModifiers::NONE),
        );
        kb.add(ScrollEnd, KeyCombo::new(KeyCode::End, KeyModifiers::NONE));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        if let Some(list) = self.map.get(&action) {
            list.iter().any(|c| c.matches(key))
        } else {
            false
        }
    }

    /// First host shortcut bound to `key`, checked in `Action::SHORTCUTS` order.
    pub fn shortcut_for_key(&self, key: &KeyEvent) -> Option<Action> {
        Action::SHORTCUTS
            .into_iter()
            .find(|action| self.matches(*action, key))
    }

    /// Return the first `KeyCombo` mapped to `action`, if any.
    pub fn first_combo(&self, action: Action) -> Option<KeyCombo> {
        self.map.get(&action).and_then(|list| list.first().cloned())
    }

    /// Compact `key label` summary of the host shortcuts and the pane
    /// maximize toggle.
    pub fn shortcut_hints(&self) -> String {
        Action::SHORTCUTS
            .into_iter()
            .chain([Action::ToggleMaximize])
            .filter_map(|action| {
                self.first_combo(action)
                    .map(|combo| format!("{} {}", combo, action.short_label()))
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
        assert_eq!(kb.shortcut_for_key(&ev), Some(Action::Quit));
    }

    #[test]
    fn plain_q_closes_docks_but_is_not_a_shortcut() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(kb.matches(Action::CloseDock, &ev));
        assert_eq!(kb.shortcut_for_key(&ev), None);
    }

    #[test]
    fn shortcut_hints_list_keys_in_order() {
        let hints = KeyBindings::default().shortcut_hints();
        assert!(hints.starts_with("Ctrl+Q quit  s settings"));
        assert!(hints.contains("g imu"));
        assert!(hints.ends_with("m max"));
    }
}

use crossterm::event::Event;
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::components::{ComponentContext, DockControl};
use crate::keybindings::{Action, KeyBindings};
use crate::ui::UiFrame;

const HELP: &str = indoc! {"
    Up/Down  move
    Space    toggle
    Esc      close
"};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsItem {
    pub label: String,
    pub checked: bool,
}

impl SettingsItem {
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
        }
    }
}

/// Checkbox list shown in the dock strip. Closes itself on Esc or `q`.
#[derive(Debug)]
pub struct SettingsDock {
    title: String,
    items: Vec<SettingsItem>,
    selected: usize,
    close_requested: bool,
}

impl Default for SettingsDock {
    fn default() -> Self {
        Self::new(
            "Settings",
            vec![
                SettingsItem::new("Depth colour ramp", true),
                SettingsItem::new("IMU smoothing", false),
                SettingsItem::new("Show frame rate", true),
                SettingsItem::new("Record stream", false),
            ],
        )
    }
}

impl SettingsDock {
    pub fn new(title: impl Into<String>, items: Vec<SettingsItem>) -> Self {
        Self {
            title: title.into(),
            items,
            selected: 0,
            close_requested: false,
        }
    }

    pub fn items(&self) -> &[SettingsItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn bump_selection(&mut self, delta: isize) {
        if self.items.is_empty() {
            self.selected = 0;
            return;
        }
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = (self.selected + delta as usize).min(self.items.len() - 1);
        }
    }

    fn toggle_selected(&mut self) -> bool {
        let Some(item) = self.items.get_mut(self.selected) else {
            return false;
        };
        item.checked = !item.checked;
        tracing::debug!(setting = %item.label, checked = item.checked, "setting toggled");
        true
    }
}

impl DockControl for SettingsDock {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title.as_str())
            .border_style(Style::default().fg(crate::theme::dock_border()))
            .style(
                Style::default()
                    .bg(crate::theme::dock_bg())
                    .fg(crate::theme::dock_fg()),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let help_lines = HELP.lines().count() as u16;
        let help_height = if inner.height > help_lines + 1 {
            help_lines
        } else {
            0
        };
        let list_area = Rect {
            height: inner.height - help_height,
            ..inner
        };
        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .take(list_area.height as usize)
            .map(|(i, item)| {
                let marker = if item.checked { "[x]" } else { "[ ]" };
                let mut li = ListItem::new(format!("{marker} {}", item.label));
                if i == self.selected {
                    li = li.style(
                        Style::default()
                            .bg(crate::theme::dock_selected_bg())
                            .fg(crate::theme::dock_selected_fg())
                            .add_modifier(Modifier::BOLD),
                    );
                }
                li
            })
            .collect();
        frame.render_widget(List::new(items), list_area);

        if help_height > 0 {
            let help_area = Rect {
                y: inner.y + list_area.height,
                height: help_height,
                ..inner
            };
            let help = Paragraph::new(HELP.trim_end())
                .style(Style::default().fg(crate::theme::menu_bar_hint_fg()));
            frame.render_widget(help, help_area);
        }
    }

    fn wants_close(&self) -> bool {
        self.close_requested
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        let kb = KeyBindings::default();
        if kb.matches(Action::MenuUp, key) {
            self.bump_selection(-1);
            true
        } else if kb.matches(Action::MenuDown, key) {
            self.bump_selection(1);
            true
        } else if kb.matches(Action::ToggleSelection, key) {
            self.toggle_selected()
        } else if kb.matches(Action::CloseDock, key) {
            self.request_close();
            true
        } else {
            false
        }
    }

    fn title(&self) -> &str {
        &self.title
    }
}

use ratatui::{layout::Rect, style::Style};

use crate::ui::{UiFrame, truncate_to_width};
use crate::window::PaneId;

/// What the menu bar reports about the window manager this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuStatus<'a> {
    pub pane_count: usize,
    pub window_count: usize,
    pub maximized: Option<PaneId>,
    pub dock: Option<&'a str>,
}

/// Top bar of the viewer. Its height is what the host reports to the window
/// manager as the reserved menu bar height.
#[derive(Debug)]
pub struct MenuBar {
    height: u16,
    area: Rect,
    hints: String,
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            height: crate::constants::DEFAULT_MENU_BAR_HEIGHT,
            area: Rect::default(),
            hints: String::new(),
        }
    }

    /// Rows the bar occupies.
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height.max(1);
    }

    /// Shortcut summary shown right-aligned in the bar.
    pub fn set_hints(&mut self, hints: impl Into<String>) {
        self.hints = hints.into();
    }

    /// Split `area` into the bar strip and the region below it.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect) {
        let top_h = self.height().min(area.height);
        let bar = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: top_h,
        };
        let rest = Rect {
            x: area.x,
            y: area.y.saturating_add(top_h),
            width: area.width,
            height: area.height.saturating_sub(top_h),
        };
        self.area = bar;
        (bar, rest)
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, status: &MenuStatus<'_>) {
        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = Style::default()
            .bg(crate::theme::menu_bar_bg())
            .fg(crate::theme::menu_bar_fg());
        frame.fill(area, style);

        let label = status_label(status);
        frame.set_string(area, area.x, area.y, &label, style);

        let used = label.chars().count() as u16;
        let free = area.width.saturating_sub(used).saturating_sub(1);
        if free == 0 || self.hints.is_empty() {
            return;
        }
        let hints = truncate_to_width(&self.hints, free as usize);
        let start_x = area
            .x
            .saturating_add(area.width)
            .saturating_sub(hints.chars().count() as u16);
        let hint_style = style.fg(crate::theme::menu_bar_hint_fg());
        frame.set_string(area, start_x, area.y, &hints, hint_style);
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

fn status_label(status: &MenuStatus<'_>) -> String {
    const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
    let mut label = format!(
        "≡ {CRATE_NAME} │ {} panes in {} windows",
        status.pane_count, status.window_count
    );
    if let Some(id) = status.maximized {
        label.push_str(&format!(" │ fullscreen {id}"));
    }
    if let Some(dock) = status.dock {
        label.push_str(&format!(" │ dock: {dock}"));
    }
    label
}

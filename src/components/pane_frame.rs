use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::component_context::ComponentContext;
use crate::constants::PANE_HEADER_HEIGHT;
use crate::keybindings::{Action, KeyBindings};
use crate::layout::rect_contains;
use crate::ui::UiFrame;

const BUTTON_WIDTH: u16 = 3;

/// Title strip drawn on top of a pane, with a maximize/restore button at the
/// right edge.
#[derive(Debug, Clone, Copy)]
pub struct PaneFrame<'a> {
    title: &'a str,
    focused: bool,
    maximized: bool,
}

impl<'a> PaneFrame<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            focused: false,
            maximized: false,
        }
    }

    pub fn from_context(title: &'a str, ctx: &ComponentContext) -> Self {
        Self::new(title)
            .focused(ctx.focused())
            .maximized(ctx.maximized())
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }

    pub fn header_rect(area: Rect) -> Rect {
        Rect {
            height: area.height.min(PANE_HEADER_HEIGHT),
            ..area
        }
    }

    pub fn content_rect(area: Rect) -> Rect {
        let header = area.height.min(PANE_HEADER_HEIGHT);
        Rect {
            x: area.x,
            y: area.y.saturating_add(header),
            width: area.width,
            height: area.height.saturating_sub(header),
        }
    }

    pub fn button_rect(area: Rect) -> Rect {
        let header = Self::header_rect(area);
        let width = header.width.min(BUTTON_WIDTH);
        Rect {
            x: header.x.saturating_add(header.width).saturating_sub(width),
            width,
            ..header
        }
    }

    /// Whether `(column, row)` lands on the maximize/restore button of a pane
    /// drawn in `area`.
    pub fn hit_button(area: Rect, column: u16, row: u16) -> bool {
        rect_contains(Self::button_rect(area), column, row)
    }

    /// Whether `event` asks a pane drawn in `area` to flip its maximize
    /// request: the toggle key, or a left click on the header button.
    pub fn is_maximize_toggle(event: &Event, area: Rect) -> bool {
        match event {
            Event::Key(key) => KeyBindings::default().matches(Action::ToggleMaximize, key),
            Event::Mouse(mouse) => {
                matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
                    && Self::hit_button(area, mouse.column, mouse.row)
            }
            _ => false,
        }
    }

    /// Draw the header and return the rectangle left for content.
    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) -> Rect {
        let header = Self::header_rect(area);
        if header.width == 0 || header.height == 0 {
            return Self::content_rect(area);
        }
        let style = if self.focused {
            Style::default()
                .bg(crate::theme::pane_header_focused_bg())
                .fg(crate::theme::pane_header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(crate::theme::pane_header_bg())
                .fg(crate::theme::pane_header_fg())
        };
        frame.fill(header, style);

        let button = Self::button_rect(area);
        let title_width = header.width.saturating_sub(button.width);
        let title_len = self.title.chars().count() as u16;
        let start_x = if title_len < title_width {
            header.x + (title_width - title_len) / 2
        } else {
            header.x
        };
        let title_bounds = Rect {
            width: title_width,
            ..header
        };
        frame.set_string(title_bounds, start_x, header.y, self.title, style);

        let glyph = if self.maximized { "[-]" } else { "[+]" };
        frame.set_string(button, button.x, button.y, glyph, style);

        Self::content_rect(area)
    }
}

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::components::{ComponentContext, PaneFrame, VisualizationPane};
use crate::ui::UiFrame;

/// Animated depth heat map. Each cell is coloured from a synthetic range
/// sample that drifts outward from the centre every frame.
#[derive(Debug)]
pub struct DepthViewPane {
    title: String,
    phase: u64,
    maximize: bool,
    last_area: Rect,
}

impl Default for DepthViewPane {
    fn default() -> Self {
        Self::new("Depth")
    }
}

impl DepthViewPane {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            phase: 0,
            maximize: false,
            last_area: Rect::default(),
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.phase
    }

    /// Normalized depth for cell `(col, row)` of a `width` x `height` image.
    pub fn sample(col: u16, row: u16, width: u16, height: u16, phase: u64) -> f32 {
        if width == 0 || height == 0 {
            return 0.0;
        }
        let dx = (col as f32 + 0.5) / width as f32 - 0.5;
        // Terminal cells are roughly twice as tall as they are wide.
        let dy = ((row as f32 + 0.5) / height as f32 - 0.5) * 0.5;
        let radius = (dx * dx + dy * dy).sqrt();
        let wave = (radius * 18.0 - phase as f32 * 0.25).sin();
        (wave * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

impl VisualizationPane for DepthViewPane {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.last_area = area;
        let content = PaneFrame::from_context(&self.title, ctx).render(frame, area);
        let phase = self.phase;
        self.phase = self.phase.wrapping_add(1);
        let Some(visible) = frame.clip_rect(content) else {
            return;
        };
        let buffer = frame.buffer_mut();
        for y in visible.y..visible.y.saturating_add(visible.height) {
            for x in visible.x..visible.x.saturating_add(visible.width) {
                let value = Self::sample(
                    x - content.x,
                    y - content.y,
                    content.width,
                    content.height,
                    phase,
                );
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_bg(crate::theme::depth_color(value));
                }
            }
        }
    }

    fn wants_maximize(&self) -> bool {
        self.maximize
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if PaneFrame::is_maximize_toggle(event, self.last_area) {
            self.maximize = !self.maximize;
            tracing::debug!(title = %self.title, maximize = self.maximize, "depth view toggled");
            return true;
        }
        false
    }

    fn restored(&mut self) {
        self.maximize = false;
    }

    fn title(&self) -> &str {
        &self.title
    }
}

use std::collections::VecDeque;

use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Sparkline;

use crate::components::{ComponentContext, PaneFrame, VisualizationPane};
use crate::ui::UiFrame;

const GRAPH_MAX: u64 = 100;

/// Which inertial sensor a graph plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Gyro,
    Accel,
}

impl SensorKind {
    pub fn label(&self) -> &'static str {
        match self {
            SensorKind::Gyro => "Gyroscope",
            SensorKind::Accel => "Accelerometer",
        }
    }

    fn color(&self) -> Color {
        match self {
            SensorKind::Gyro => Color::Cyan,
            SensorKind::Accel => Color::Yellow,
        }
    }

    /// Synthetic reading for tick `t`, scaled into `0..=GRAPH_MAX`.
    pub fn reading(&self, t: u64) -> u64 {
        let t = t as f64;
        let value = match self {
            SensorKind::Gyro => 50.0 + 40.0 * (t * 0.3).sin(),
            SensorKind::Accel => 50.0 + 30.0 * (t * 0.11).sin() + 15.0 * (t * 0.7).cos(),
        };
        value.round().clamp(0.0, GRAPH_MAX as f64) as u64
    }
}

/// Rolling sparkline of one sensor stream. A new reading is appended on every
/// render call.
#[derive(Debug)]
pub struct SensorGraphPane {
    kind: SensorKind,
    title: String,
    samples: VecDeque<u64>,
    capacity: usize,
    tick: u64,
    maximize: bool,
    last_area: Rect,
}

impl SensorGraphPane {
    pub fn new(kind: SensorKind) -> Self {
        Self {
            kind,
            title: kind.label().to_string(),
            samples: VecDeque::new(),
            capacity: 256,
            tick: 0,
            maximize: false,
            last_area: Rect::default(),
        }
    }

    pub fn samples(&self) -> &VecDeque<u64> {
        &self.samples
    }

    fn record(&mut self) {
        self.samples.push_back(self.kind.reading(self.tick));
        self.tick = self.tick.wrapping_add(1);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }
}

impl VisualizationPane for SensorGraphPane {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.last_area = area;
        self.record();
        let content = PaneFrame::from_context(&self.title, ctx).render(frame, area);
        if content.width == 0 || content.height == 0 {
            return;
        }
        // Newest samples at the right edge.
        let visible = content.width as usize;
        let skip = self.samples.len().saturating_sub(visible);
        let data: Vec<u64> = self.samples.iter().skip(skip).copied().collect();
        let graph = Sparkline::default()
            .data(data)
            .max(GRAPH_MAX)
            .style(Style::default().fg(self.kind.color()));
        frame.render_widget(graph, content);
    }

    fn wants_maximize(&self) -> bool {
        self.maximize
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if PaneFrame::is_maximize_toggle(event, self.last_area) {
            self.maximize = !self.maximize;
            tracing::debug!(sensor = self.kind.label(), maximize = self.maximize, "sensor graph toggled");
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

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn readings_stay_in_range() {
        for kind in [SensorKind::Gyro, SensorKind::Accel] {
            for t in 0..500 {
                assert!(kind.reading(t) <= GRAPH_MAX);
            }
        }
    }

    #[test]
    fn each_render_records_one_sample() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 16,
            height: 5,
        };
        let mut buf = Buffer::empty(area);
        let mut pane = SensorGraphPane::new(SensorKind::Gyro);
        for _ in 0..3 {
            let mut ui = UiFrame::from_parts(area, &mut buf);
            pane.render(&mut ui, area, &ComponentContext::default());
        }
        assert_eq!(pane.samples().len(), 3);
        assert_eq!(pane.title(), "Gyroscope");
    }

    #[test]
    fn sample_history_is_bounded() {
        let mut pane = SensorGraphPane::new(SensorKind::Accel);
        for _ in 0..300 {
            pane.record();
        }
        assert_eq!(pane.samples().len(), 256);
    }
}

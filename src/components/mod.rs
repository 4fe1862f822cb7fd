use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod depth_view;
pub mod log_dock;
pub mod pane_frame;
pub mod sensor_graph;
pub mod settings_dock;

pub use depth_view::DepthViewPane;
pub use log_dock::LogDock;
pub use pane_frame::PaneFrame;
pub use sensor_graph::{SensorGraphPane, SensorKind};
pub use settings_dock::{SettingsDock, SettingsItem};

pub use crate::component_context::ComponentContext;

/// A self-rendering visualization shown in the tiled main area.
///
/// The window manager owns each pane exclusively. Once per frame it calls
/// `render` with the rectangle the pane was assigned, then asks
/// `wants_maximize`. A `true` answer makes the pane occupy the entire main
/// area from the next frame on, until it answers `false` again or the host
/// clears the fullscreen pane. A pane cleared by the host gets `restored` and
/// stays tiled until it answers `false` at least once; only then does a new
/// `true` maximize it again.
pub trait VisualizationPane {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn wants_maximize(&self) -> bool;

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }

    /// Called when the host forces this pane out of fullscreen. Panes should
    /// drop their maximize request here; one that keeps asking is held in the
    /// tiled layout regardless.
    fn restored(&mut self) {}

    fn title(&self) -> &str {
        ""
    }
}

/// A transient side panel rendered in the dock strip.
///
/// Only the top of the dock stack is rendered or receives input. After a
/// frame's render, `wants_close` is polled and a `true` answer pops it.
pub trait DockControl {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn wants_close(&self) -> bool;

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }

    fn title(&self) -> &str {
        ""
    }
}

//! Tiling window manager for a sensor viewer: visualization panes laid out in
//! a grid (with stacked groups), a fullscreen mode any pane can request, and a
//! stack of dock controls shown in a strip at the right edge.

pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod keybindings;
pub mod layout;
pub mod log_buffer;
pub mod menu_bar;
pub mod runner;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod viewer;
pub mod window;

pub use error::ViewerError;
pub use viewer::Viewer;
pub use window::{PaneId, WindowManager, WindowManagerConfig};

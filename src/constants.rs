//! Shared crate-wide constants.

/// Width of the dock strip, in terminal columns, while any dock control is
/// active.
pub const DEFAULT_DOCK_WIDTH: u16 = 40;

/// Rows reserved at the top of the viewport for the menu bar.
pub const DEFAULT_MENU_BAR_HEIGHT: u16 = 1;

/// Frame pacing for the host loop when no input arrives.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;

/// Number of log lines retained by the in-memory log buffer.
pub const DEFAULT_LOG_LINES: usize = 2000;

/// Rows used by the title strip a pane draws above its content.
pub const PANE_HEADER_HEIGHT: u16 = 1;

mod dock;
mod entry;
mod window_manager;

pub use dock::DockStack;
pub use entry::{PaneId, PaneSlot, WindowEntry, WindowGroup};
pub use window_manager::{FramePlan, WindowManager, WindowManagerConfig};

//! Shared component rendering context
//!
//! `ComponentContext` carries the layout facts a pane or dock control may need
//! while rendering or handling input. It keeps the capability traits stable
//! so new flags do not turn into extra boolean parameters.

/// Context passed to `VisualizationPane` and `DockControl` methods.
///
/// - `maximized`: the pane occupies the whole main area this frame.
/// - `focused`: the component currently receives keyboard input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentContext {
    maximized: bool,
    focused: bool,
}

impl ComponentContext {
    pub const fn new(maximized: bool) -> Self {
        Self {
            maximized,
            focused: false,
        }
    }

    pub const fn maximized(&self) -> bool {
        self.maximized
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn with_maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }
}

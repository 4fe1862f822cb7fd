use crate::components::DockControl;

/// Last-in-first-out stack of dock controls. Only the top is live; the rest
/// stay owned but inert until everything above them has been popped.
#[derive(Default)]
pub struct DockStack {
    controls: Vec<Box<dyn DockControl>>,
}

impl DockStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, dock: Box<dyn DockControl>) {
        self.controls.push(dock);
    }

    pub fn pop(&mut self) -> Option<Box<dyn DockControl>> {
        self.controls.pop()
    }

    pub fn top(&self) -> Option<&dyn DockControl> {
        self.controls.last().map(|dock| &**dock)
    }

    pub fn top_mut(&mut self) -> Option<&mut (dyn DockControl + 'static)> {
        self.controls.last_mut().map(|dock| &mut **dock)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl std::fmt::Debug for DockStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.controls.iter().map(|dock| dock.title()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentContext;
    use crate::ui::UiFrame;
    use ratatui::layout::Rect;

    struct Named(&'static str);
    impl DockControl for Named {
        fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _ctx: &ComponentContext) {}

        fn wants_close(&self) -> bool {
            false
        }

        fn title(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn push_pop_is_last_in_first_out() {
        let mut stack = DockStack::new();
        assert!(stack.top().is_none());
        stack.push(Box::new(Named("a")));
        stack.push(Box::new(Named("b")));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top().map(|d| d.title()), Some("b"));
        assert!(stack.pop().is_some());
        assert_eq!(stack.top().map(|d| d.title()), Some("a"));
        assert!(stack.pop().is_some());
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }
}

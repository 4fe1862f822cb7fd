use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::{Rect, Size};

use super::dock::DockStack;
use super::entry::{PaneId, PaneSlot, WindowEntry, WindowGroup};
use crate::components::{ComponentContext, DockControl, VisualizationPane};
use crate::constants::DEFAULT_DOCK_WIDTH;
use crate::layout::{RegionMap, grid_cells, rect_contains, rect_is_empty, stack_cells};
use crate::ui::UiFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowManagerConfig {
    /// Width of the dock strip while at least one dock control is active.
    pub dock_width: u16,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            dock_width: DEFAULT_DOCK_WIDTH,
        }
    }
}

/// Layout decided for one frame, before any pane is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FramePlan {
    pub dock_width: u16,
    pub main_area: Rect,
    pub dock_area: Rect,
    /// Pane that owns the whole main area this frame, if any.
    pub maximized: Option<PaneId>,
    /// Rectangle for every pane that gets a render call, in display order.
    pub panes: Vec<(PaneId, Rect)>,
}

/// Owns the display tree of visualization panes and the dock-control stack,
/// and lays both out once per frame.
///
/// The host must only mutate the manager between frames. Panes and dock
/// controls never see the manager, so they cannot mutate it from inside
/// `show_all`.
pub struct WindowManager {
    config: WindowManagerConfig,
    window_size: Size,
    menu_bar_height: u16,
    dock_width: u16,
    windows: Vec<WindowEntry>,
    maximized: Option<PaneId>,
    /// Pane forced out of fullscreen by the host. Its maximize requests are
    /// ignored until it answers `false` once.
    held_back: Option<PaneId>,
    focused: Option<PaneId>,
    docks: DockStack,
    regions: RegionMap<PaneId>,
    main_area: Rect,
    dock_area: Rect,
    next_pane_id: u64,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(WindowManagerConfig::default())
    }
}

impl WindowManager {
    pub fn new(config: WindowManagerConfig) -> Self {
        Self {
            config,
            window_size: Size::default(),
            menu_bar_height: 0,
            dock_width: 0,
            windows: Vec::new(),
            maximized: None,
            held_back: None,
            focused: None,
            docks: DockStack::new(),
            regions: RegionMap::default(),
            main_area: Rect::default(),
            dock_area: Rect::default(),
            next_pane_id: 0,
        }
    }

    pub fn set_window_size(&mut self, size: Size) {
        self.window_size = size;
    }

    pub fn window_size(&self) -> Size {
        self.window_size
    }

    pub fn set_menu_bar_height(&mut self, height: u16) {
        self.menu_bar_height = height;
    }

    pub fn menu_bar_height(&self) -> u16 {
        self.menu_bar_height
    }

    fn allocate_slot(&mut self, pane: Box<dyn VisualizationPane>) -> PaneSlot {
        let id = PaneId::new(self.next_pane_id);
        self.next_pane_id = self.next_pane_id.saturating_add(1);
        PaneSlot::new(id, pane)
    }

    /// Append `pane` as a new top-level entry and return its id.
    pub fn add_window(&mut self, pane: Box<dyn VisualizationPane>) -> PaneId {
        let slot = self.allocate_slot(pane);
        let id = slot.id();
        tracing::debug!(pane_id = %id, title = slot.pane().title(), "added window");
        self.windows.push(WindowEntry::Single(slot));
        id
    }

    /// Append one group entry holding `panes`, stacked in the given order.
    /// An empty list adds nothing.
    pub fn add_window_group(&mut self, panes: Vec<Box<dyn VisualizationPane>>) -> Vec<PaneId> {
        if panes.is_empty() {
            tracing::debug!("ignored empty window group");
            return Vec::new();
        }
        let members: Vec<PaneSlot> = panes
            .into_iter()
            .map(|pane| self.allocate_slot(pane))
            .collect();
        let ids: Vec<PaneId> = members.iter().map(PaneSlot::id).collect();
        tracing::debug!(members = ids.len(), first = %ids[0], "added window group");
        self.windows
            .push(WindowEntry::Group(WindowGroup::new(members)));
        ids
    }

    /// Drop the fullscreen pane so the next frame tiles again. The pane is
    /// told through `restored`, and a request it keeps making is ignored until
    /// it withdraws it.
    pub fn clear_fullscreen_window(&mut self) {
        let Some(id) = self.maximized.take() else {
            return;
        };
        if let Some(slot) = self.slot_mut(id) {
            slot.pane_mut().restored();
        }
        self.held_back = Some(id);
        tracing::info!(pane_id = %id, "cleared fullscreen window");
    }

    /// Release every pane and group.
    pub fn clear_windows(&mut self) {
        tracing::debug!(entries = self.windows.len(), "clearing windows");
        self.windows.clear();
        self.maximized = None;
        self.held_back = None;
        self.focused = None;
        self.regions.clear();
    }

    /// Remove a single pane. A group left without members goes with it.
    pub fn remove_window(&mut self, id: PaneId) -> bool {
        let Some(index) = self.windows.iter().position(|entry| entry.contains(id)) else {
            return false;
        };
        let entry = &mut self.windows[index];
        if entry.is_group() {
            entry.remove_member(id);
            if entry.is_vacant() {
                self.windows.remove(index);
            }
        } else {
            self.windows.remove(index);
        }
        if self.maximized == Some(id) {
            self.maximized = None;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.held_back == Some(id) {
            self.held_back = None;
        }
        self.regions.remove(id);
        tracing::debug!(pane_id = %id, "removed window");
        true
    }

    pub fn push_dock_control(&mut self, dock: Box<dyn DockControl>) {
        tracing::debug!(title = dock.title(), depth = self.docks.len() + 1, "pushed dock control");
        self.docks.push(dock);
    }

    /// Remove the active dock control. Does nothing when the stack is empty.
    pub fn pop_dock_control(&mut self) {
        if let Some(dock) = self.docks.pop() {
            tracing::debug!(title = dock.title(), depth = self.docks.len(), "popped dock control");
        }
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn pane_count(&self) -> usize {
        self.windows.iter().map(|entry| entry.slots().len()).sum()
    }

    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.windows
            .iter()
            .flat_map(|entry| entry.slots().iter().map(PaneSlot::id))
            .collect()
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.windows.iter().any(|entry| entry.contains(id))
    }

    pub fn maximized(&self) -> Option<PaneId> {
        self.maximized
    }

    pub fn focused(&self) -> Option<PaneId> {
        self.focused
    }

    pub fn set_focus(&mut self, id: PaneId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    pub fn dock_depth(&self) -> usize {
        self.docks.len()
    }

    pub fn top_dock_title(&self) -> Option<&str> {
        self.docks.top().map(|dock| dock.title())
    }

    /// Dock strip width used by the last frame.
    pub fn dock_width(&self) -> u16 {
        self.dock_width
    }

    /// Main area used by the last frame.
    pub fn main_area(&self) -> Rect {
        self.main_area
    }

    /// Dock strip used by the last frame.
    pub fn dock_area(&self) -> Rect {
        self.dock_area
    }

    /// Rectangles assigned to panes in the last frame.
    pub fn regions(&self) -> &RegionMap<PaneId> {
        &self.regions
    }

    fn slot(&self, id: PaneId) -> Option<&PaneSlot> {
        self.windows
            .iter()
            .flat_map(|entry| entry.slots().iter())
            .find(|slot| slot.id() == id)
    }

    fn slot_mut(&mut self, id: PaneId) -> Option<&mut PaneSlot> {
        self.windows
            .iter_mut()
            .flat_map(|entry| entry.slots_mut().iter_mut())
            .find(|slot| slot.id() == id)
    }

    fn current_dock_width(&self) -> u16 {
        if self.docks.is_empty() {
            0
        } else {
            self.config.dock_width.min(self.window_size.width)
        }
    }

    /// Decide this frame's layout from the current state without rendering.
    ///
    /// A fullscreen pane that vanished from the tree, or that no longer asks
    /// to be maximized, is dropped here so the frame falls back to tiling.
    pub fn plan_frame(&self) -> FramePlan {
        let dock_width = self.current_dock_width();
        let top = self.menu_bar_height.min(self.window_size.height);
        let height = self.window_size.height.saturating_sub(top);
        let main_width = self.window_size.width.saturating_sub(dock_width);
        let main_area = Rect {
            x: 0,
            y: top,
            width: main_width,
            height,
        };
        let dock_area = if dock_width == 0 {
            Rect::default()
        } else {
            Rect {
                x: main_width,
                y: top,
                width: dock_width,
                height,
            }
        };

        let maximized = self
            .maximized
            .filter(|id| self.slot(*id).is_some_and(|slot| slot.pane().wants_maximize()));

        let panes = match maximized {
            Some(id) => vec![(id, main_area)],
            None => self.tile(main_area),
        };

        FramePlan {
            dock_width,
            main_area,
            dock_area,
            maximized,
            panes,
        }
    }

    fn tile(&self, area: Rect) -> Vec<(PaneId, Rect)> {
        let mut placed = Vec::with_capacity(self.pane_count());
        for (entry, cell) in self
            .windows
            .iter()
            .zip(grid_cells(area, self.windows.len()))
        {
            match entry {
                WindowEntry::Single(slot) => placed.push((slot.id(), cell)),
                WindowEntry::Group(group) => {
                    for (slot, rect) in group
                        .members()
                        .iter()
                        .zip(stack_cells(cell, group.len()))
                    {
                        placed.push((slot.id(), rect));
                    }
                }
            }
        }
        placed
    }

    /// Lay out and render every visible pane, then the active dock control.
    ///
    /// A maximize request seen while tiling takes effect on the next frame;
    /// this frame keeps the layout it already decided.
    pub fn show_all(&mut self, frame: &mut UiFrame<'_>) {
        let plan = self.plan_frame();
        if self.maximized.is_some() && plan.maximized.is_none() {
            tracing::info!("fullscreen window restored to tiled layout");
        }
        self.maximized = plan.maximized;
        self.dock_width = plan.dock_width;
        self.main_area = plan.main_area;
        self.dock_area = plan.dock_area;
        self.regions.clear();

        let is_maximized = plan.maximized.is_some();
        let focused = self.focused;
        let held_back = self.held_back;
        let mut held_back_declined = false;
        let mut maximize_request = None;
        for (id, rect) in plan.panes {
            self.regions.set(id, rect);
            if rect_is_empty(rect) {
                continue;
            }
            let Some(slot) = self.slot_mut(id) else {
                continue;
            };
            let ctx = ComponentContext::new(is_maximized).with_focus(focused == Some(id));
            slot.pane_mut().render(frame, rect, &ctx);
            let wants = slot.pane().wants_maximize();
            if held_back == Some(id) {
                held_back_declined = !wants;
            } else if !is_maximized && maximize_request.is_none() && wants {
                maximize_request = Some(id);
            }
        }
        if held_back_declined {
            self.held_back = None;
        }
        if let Some(id) = maximize_request {
            tracing::info!(pane_id = %id, "window maximized");
            self.maximized = Some(id);
        }

        self.show_dock(frame);
    }

    fn show_dock(&mut self, frame: &mut UiFrame<'_>) {
        let area = self.dock_area;
        let Some(dock) = self.docks.top_mut() else {
            return;
        };
        if !rect_is_empty(area) {
            dock.render(frame, area, &ComponentContext::default().with_focus(true));
        }
        if dock.wants_close() {
            self.pop_dock_control();
        }
    }

    /// Route an input event. The active dock control gets every key event and
    /// any mouse event inside the dock strip; otherwise mouse events go to the
    /// pane under the pointer and key events to the fullscreen or focused pane.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let dock_area = self.dock_area;
        if let Some(dock) = self.docks.top_mut() {
            let ctx = ComponentContext::default().with_focus(true);
            match event {
                Event::Key(_) | Event::Paste(_) => return dock.handle_event(event, &ctx),
                Event::Mouse(mouse) if rect_contains(dock_area, mouse.column, mouse.row) => {
                    return dock.handle_event(event, &ctx);
                }
                _ => {}
            }
        }
        let target = match event {
            Event::Mouse(mouse) => {
                let Some(id) = self.regions.hit_test(mouse.column, mouse.row) else {
                    return false;
                };
                if matches!(mouse.kind, MouseEventKind::Down(_)) && self.focused != Some(id) {
                    tracing::debug!(pane_id = %id, "focused window");
                    self.focused = Some(id);
                }
                id
            }
            Event::Key(_) | Event::Paste(_) => match self.maximized.or(self.focused) {
                Some(id) => id,
                None => return false,
            },
            _ => return false,
        };
        let ctx = ComponentContext::new(self.maximized == Some(target))
            .with_focus(self.focused == Some(target));
        self.slot_mut(target)
            .map(|slot| slot.pane_mut().handle_event(event, &ctx))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent};
    use ratatui::buffer::Buffer;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type RenderLog = Rc<RefCell<Vec<(&'static str, Rect, bool)>>>;

    struct Probe {
        name: &'static str,
        log: RenderLog,
        maximize: Rc<Cell<bool>>,
        events: Rc<Cell<usize>>,
    }

    impl VisualizationPane for Probe {
        fn render(&mut self, _frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
            self.log.borrow_mut().push((self.name, area, ctx.maximized()));
        }

        fn wants_maximize(&self) -> bool {
            self.maximize.get()
        }

        fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
            self.events.set(self.events.get() + 1);
            true
        }

        fn restored(&mut self) {
            self.maximize.set(false);
        }

        fn title(&self) -> &str {
            self.name
        }
    }

    struct Fixture {
        log: RenderLog,
        flags: Vec<Rc<Cell<bool>>>,
        events: Vec<Rc<Cell<usize>>>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                log: Rc::new(RefCell::new(Vec::new())),
                flags: Vec::new(),
                events: Vec::new(),
            }
        }

        fn pane(&mut self, name: &'static str) -> Box<dyn VisualizationPane> {
            let maximize = Rc::new(Cell::new(false));
            let events = Rc::new(Cell::new(0));
            self.flags.push(Rc::clone(&maximize));
            self.events.push(Rc::clone(&events));
            Box::new(Probe {
                name,
                log: Rc::clone(&self.log),
                maximize,
                events,
            })
        }

        fn take(&self) -> Vec<(&'static str, Rect, bool)> {
            std::mem::take(&mut *self.log.borrow_mut())
        }
    }

    fn render(wm: &mut WindowManager) {
        let area = Rect {
            x: 0,
            y: 0,
            width: wm.window_size().width,
            height: wm.window_size().height,
        };
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        wm.show_all(&mut frame);
    }

    fn manager(width: u16, height: u16) -> WindowManager {
        let mut wm = WindowManager::default();
        wm.set_window_size(Size { width, height });
        wm
    }

    #[test]
    fn empty_tree_renders_nothing() {
        let mut wm = manager(80, 24);
        render(&mut wm);
        assert!(wm.regions().is_empty());
        assert_eq!(wm.dock_width(), 0);
    }

    #[test]
    fn zero_viewport_skips_render_calls() {
        let mut fx = Fixture::new();
        let mut wm = manager(0, 0);
        wm.add_window(fx.pane("a"));
        render(&mut wm);
        assert!(fx.take().is_empty());
    }

    #[test]
    fn menu_bar_offsets_main_area() {
        let mut fx = Fixture::new();
        let mut wm = manager(80, 24);
        wm.set_menu_bar_height(2);
        wm.add_window(fx.pane("a"));
        render(&mut wm);
        let log = fx.take();
        assert_eq!(
            log,
            vec![(
                "a",
                Rect {
                    x: 0,
                    y: 2,
                    width: 80,
                    height: 22
                },
                false
            )]
        );
    }

    #[test]
    fn maximize_stale_reference_is_dropped_when_pane_declines() {
        let mut fx = Fixture::new();
        let mut wm = manager(60, 20);
        let a = wm.add_window(fx.pane("a"));
        wm.add_window(fx.pane("b"));
        fx.flags[0].set(true);
        render(&mut wm);
        assert_eq!(wm.maximized(), Some(a));
        fx.take();

        // Pane un-maximizes between frames: the very next frame is tiled.
        fx.flags[0].set(false);
        let plan = wm.plan_frame();
        assert_eq!(plan.maximized, None);
        render(&mut wm);
        assert_eq!(fx.take().len(), 2);
        assert_eq!(wm.maximized(), None);
    }

    #[test]
    fn clear_fullscreen_notifies_pane() {
        let mut fx = Fixture::new();
        let mut wm = manager(60, 20);
        wm.add_window(fx.pane("a"));
        fx.flags[0].set(true);
        render(&mut wm);
        assert!(wm.maximized().is_some());
        wm.clear_fullscreen_window();
        assert_eq!(wm.maximized(), None);
        assert!(!fx.flags[0].get());
        render(&mut wm);
        assert_eq!(wm.maximized(), None);
    }

    #[test]
    fn remove_window_drops_group_when_vacant() {
        let mut fx = Fixture::new();
        let mut wm = manager(60, 20);
        let single = wm.add_window(fx.pane("a"));
        let group = wm.add_window_group(vec![fx.pane("g1"), fx.pane("g2")]);
        assert_eq!(wm.window_count(), 2);
        assert_eq!(wm.pane_count(), 3);

        assert!(wm.remove_window(group[0]));
        assert_eq!(wm.window_count(), 2);
        assert!(wm.remove_window(group[1]));
        assert_eq!(wm.window_count(), 1);
        assert!(!wm.remove_window(group[1]));
        assert_eq!(wm.pane_ids(), vec![single]);
    }

    #[test]
    fn removing_maximized_pane_clears_reference() {
        let mut fx = Fixture::new();
        let mut wm = manager(60, 20);
        let a = wm.add_window(fx.pane("a"));
        fx.flags[0].set(true);
        render(&mut wm);
        assert_eq!(wm.maximized(), Some(a));
        assert!(wm.remove_window(a));
        assert_eq!(wm.maximized(), None);
    }

    #[test]
    fn empty_group_is_ignored() {
        let mut wm = manager(60, 20);
        assert!(wm.add_window_group(Vec::new()).is_empty());
        assert_eq!(wm.window_count(), 0);
    }

    #[test]
    fn pane_ids_are_not_reused() {
        let mut fx = Fixture::new();
        let mut wm = manager(60, 20);
        let a = wm.add_window(fx.pane("a"));
        wm.clear_windows();
        let b = wm.add_window(fx.pane("b"));
        assert_ne!(a, b);
    }

    #[test]
    fn mouse_press_focuses_and_routes_keys() {
        let mut fx = Fixture::new();
        let mut wm = manager(80, 20);
        let _a = wm.add_window(fx.pane("a"));
        let b = wm.add_window(fx.pane("b"));
        render(&mut wm);

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 50,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
        assert!(wm.handle_event(&click));
        assert_eq!(wm.focused(), Some(b));
        assert_eq!(fx.events[1].get(), 1);

        let key = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(wm.handle_event(&key));
        assert_eq!(fx.events[1].get(), 2);
        assert_eq!(fx.events[0].get(), 0);
    }

    #[test]
    fn set_focus_routes_keys_and_rejects_unknown_ids() {
        let mut fx = Fixture::new();
        let mut wm = manager(80, 20);
        let a = wm.add_window(fx.pane("a"));
        let b = wm.add_window(fx.pane("b"));
        assert!(wm.set_focus(a));
        let key = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(wm.handle_event(&key));
        assert_eq!(fx.events[0].get(), 1);

        assert!(wm.remove_window(b));
        assert!(!wm.set_focus(b));
        assert_eq!(wm.focused(), Some(a));
    }

    #[test]
    fn key_without_focus_is_unhandled() {
        let mut fx = Fixture::new();
        let mut wm = manager(80, 20);
        wm.add_window(fx.pane("a"));
        render(&mut wm);
        let key = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!wm.handle_event(&key));
    }

    #[test]
    fn dock_width_clamps_to_viewport() {
        let mut wm = WindowManager::new(WindowManagerConfig { dock_width: 50 });
        wm.set_window_size(Size {
            width: 30,
            height: 10,
        });
        struct Inert;
        impl DockControl for Inert {
            fn render(&mut self, _f: &mut UiFrame<'_>, _a: Rect, _c: &ComponentContext) {}
            fn wants_close(&self) -> bool {
                false
            }
        }
        wm.push_dock_control(Box::new(Inert));
        let plan = wm.plan_frame();
        assert_eq!(plan.dock_width, 30);
        assert_eq!(plan.main_area.width, 0);
        assert_eq!(
            plan.dock_area,
            Rect {
                x: 0,
                y: 0,
                width: 30,
                height: 10
            }
        );
    }
}

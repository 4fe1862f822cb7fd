use crossterm::event::Event;
use ratatui::layout::Size;

use crate::components::{
    DepthViewPane, LogDock, SensorGraphPane, SensorKind, SettingsDock, VisualizationPane,
};
use crate::config::ViewerOptions;
use crate::event_loop::ControlFlow;
use crate::keybindings::{Action, KeyBindings};
use crate::log_buffer::LogBufferHandle;
use crate::menu_bar::{MenuBar, MenuStatus};
use crate::runner::ViewerApp;
use crate::ui::UiFrame;
use crate::window::{PaneId, WindowManager};

/// Application root: owns the window manager, the menu bar and the shortcut
/// table, and turns host shortcuts into window manager calls.
pub struct Viewer {
    windows: WindowManager,
    menu: MenuBar,
    keys: KeyBindings,
    log: Option<LogBufferHandle>,
    depth_panes_opened: usize,
}

impl Viewer {
    pub fn new(options: &ViewerOptions, log: Option<LogBufferHandle>) -> Self {
        let keys = KeyBindings::default();
        let mut menu = MenuBar::new();
        menu.set_hints(keys.shortcut_hints());
        let mut viewer = Self {
            windows: WindowManager::new(options.window_manager),
            menu,
            keys,
            log,
            depth_panes_opened: 0,
        };
        for _ in 0..options.depth_panes {
            viewer.add_depth_pane();
        }
        if options.imu_group {
            viewer.add_imu_group();
        }
        viewer
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn add_depth_pane(&mut self) -> PaneId {
        self.depth_panes_opened += 1;
        let title = format!("Depth {}", self.depth_panes_opened);
        self.windows.add_window(Box::new(DepthViewPane::new(title)))
    }

    pub fn add_imu_group(&mut self) -> Vec<PaneId> {
        let panes: Vec<Box<dyn VisualizationPane>> = vec![
            Box::new(SensorGraphPane::new(SensorKind::Gyro)),
            Box::new(SensorGraphPane::new(SensorKind::Accel)),
        ];
        self.windows.add_window_group(panes)
    }

    /// Run one host shortcut.
    pub fn apply(&mut self, action: Action) -> ControlFlow {
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::PushSettingsDock => {
                self.windows
                    .push_dock_control(Box::new(SettingsDock::default()));
            }
            Action::PushLogDock => match &self.log {
                Some(handle) => {
                    self.windows
                        .push_dock_control(Box::new(LogDock::new(handle.clone())));
                }
                None => tracing::warn!("log dock unavailable: no log buffer installed"),
            },
            Action::PopDock => self.windows.pop_dock_control(),
            Action::AddDepthPane => {
                self.add_depth_pane();
            }
            Action::AddImuGroup => {
                self.add_imu_group();
            }
            Action::ClearFullscreen => self.windows.clear_fullscreen_window(),
            Action::ClearWindows => self.windows.clear_windows(),
            _ => {}
        }
        ControlFlow::Continue
    }
}

impl ViewerApp for Viewer {
    fn draw(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        self.windows.set_window_size(Size {
            width: area.width,
            height: area.height,
        });
        self.menu.split_area(area);
        self.windows.set_menu_bar_height(self.menu.height());
        self.windows.show_all(frame);

        let status = MenuStatus {
            pane_count: self.windows.pane_count(),
            window_count: self.windows.window_count(),
            maximized: self.windows.maximized(),
            dock: self.windows.top_dock_title(),
        };
        self.menu.render(frame, &status);
    }

    fn handle_event(&mut self, event: &Event) -> ControlFlow {
        if self.windows.handle_event(event) {
            return ControlFlow::Continue;
        }
        match event {
            Event::Key(key) => match self.keys.shortcut_for_key(key) {
                Some(action) => self.apply(action),
                None => ControlFlow::Continue,
            },
            _ => ControlFlow::Continue,
        }
    }
}

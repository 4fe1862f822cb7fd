use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::InputDriver;
use super::keyboard::KeyboardNormalizer;

/// Reads normalized crossterm events from the controlling terminal.
#[derive(Debug, Default)]
pub struct ConsoleInputDriver {
    normalizer: KeyboardNormalizer,
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self {
            normalizer: KeyboardNormalizer::new(),
        }
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        loop {
            let evt = crossterm::event::read()?;
            if let Some(normalized) = self.normalizer.normalize(evt) {
                return Ok(normalized);
            }
        }
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

/// Terminal mode switches a `ConsoleSession` flips on enter and back on exit.
pub trait ScreenModes {
    fn set_alternate_screen(&mut self, enabled: bool) -> io::Result<()>;
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()>;
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;
    fn clear_screen(&mut self) -> io::Result<()>;
}

impl<W: io::Write> ScreenModes for Terminal<CrosstermBackend<W>> {
    fn set_alternate_screen(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(self.backend_mut(), EnterAlternateScreen)
        } else {
            execute!(self.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)
        }
    }

    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            self.show_cursor()
        } else {
            self.hide_cursor()
        }
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.clear()
    }
}

/// Raw-mode, alternate-screen terminal owned by the viewer.
///
/// Each mode is recorded as soon as it is switched on, so `exit` (and drop)
/// undoes exactly what a possibly interrupted `enter` managed to do.
pub struct ConsoleSession<S: ScreenModes = Terminal<CrosstermBackend<Stdout>>> {
    terminal: S,
    alternate_screen: bool,
    raw_mode: bool,
    cursor_hidden: bool,
}

impl ConsoleSession {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self::with_screen(terminal))
    }
}

impl<S: ScreenModes> ConsoleSession<S> {
    pub fn with_screen(terminal: S) -> Self {
        Self {
            terminal,
            alternate_screen: false,
            raw_mode: false,
            cursor_hidden: false,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut S {
        &mut self.terminal
    }

    pub fn is_entered(&self) -> bool {
        self.alternate_screen || self.raw_mode || self.cursor_hidden
    }

    pub fn enter(&mut self) -> io::Result<()> {
        if self.is_entered() {
            return Ok(());
        }
        self.terminal.set_alternate_screen(true)?;
        self.alternate_screen = true;
        self.terminal.set_raw_mode(true)?;
        self.raw_mode = true;
        self.terminal.set_cursor_visible(false)?;
        self.cursor_hidden = true;
        self.terminal.clear_screen()
    }

    /// Restore every mode `enter` switched on. All steps run; the first
    /// failure is returned.
    pub fn exit(&mut self) -> io::Result<()> {
        let mut result = Ok(());
        if std::mem::take(&mut self.raw_mode) {
            result = result.and(self.terminal.set_raw_mode(false));
        }
        if std::mem::take(&mut self.alternate_screen) {
            result = result.and(self.terminal.set_alternate_screen(false));
        }
        if std::mem::take(&mut self.cursor_hidden) {
            result = result.and(self.terminal.set_cursor_visible(true));
        }
        result
    }
}

impl<S: ScreenModes> Drop for ConsoleSession<S> {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::components::{ComponentContext, DockControl};
use crate::keybindings::{Action, KeyBindings};
use crate::log_buffer::LogBufferHandle;
use crate::ui::UiFrame;

/// Dock control that shows the tail of the in-memory log.
///
/// Follows new lines until scrolled back with PageUp or the mouse wheel;
/// End jumps back to the tail.
#[derive(Debug)]
pub struct LogDock {
    handle: LogBufferHandle,
    scroll_back: usize,
    last_view: usize,
    close_requested: bool,
}

impl LogDock {
    pub fn new(handle: LogBufferHandle) -> Self {
        Self {
            handle,
            scroll_back: 0,
            last_view: 0,
            close_requested: false,
        }
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    fn scroll(&mut self, delta: isize) {
        let max_back = self.handle.len().saturating_sub(self.last_view.max(1));
        if delta.is_negative() {
            self.scroll_back = self.scroll_back.saturating_sub(delta.unsigned_abs());
        } else {
            self.scroll_back = (self.scroll_back + delta as usize).min(max_back);
        }
    }
}

impl DockControl for LogDock {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        let title = if self.scroll_back == 0 {
            "Log".to_string()
        } else {
            format!("Log (-{})", self.scroll_back)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(crate::theme::dock_border()))
            .style(
                Style::default()
                    .bg(crate::theme::dock_bg())
                    .fg(crate::theme::dock_fg()),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.last_view = inner.height as usize;
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let lines = self.handle.tail(self.last_view, self.scroll_back);
        let text = Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>());
        frame.render_widget(Paragraph::new(text), inner);
    }

    fn wants_close(&self) -> bool {
        self.close_requested
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let page = self.last_view.max(1) as isize;
        match event {
            Event::Key(key) => {
                let kb = KeyBindings::default();
                if kb.matches(Action::ScrollPageUp, key) {
                    self.scroll(page);
                } else if kb.matches(Action::ScrollPageDown, key) {
                    self.scroll(-page);
                } else if kb.matches(Action::ScrollEnd, key) {
                    self.scroll_back = 0;
                } else if kb.matches(Action::CloseDock, key) {
                    self.close_requested = true;
                } else {
                    return false;
                }
                true
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.scroll(1);
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.scroll(-1);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn title(&self) -> &str {
        "Log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn render(dock: &mut LogDock, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        {
            let mut ui = UiFrame::from_parts(area, &mut buf);
            dock.render(&mut ui, area, &ComponentContext::default());
        }
        buf
    }

    fn row(buf: &Buffer, y: u16, width: u16) -> String {
        (1..width - 1)
            .map(|x| buf.cell((x, y)).expect("cell present").symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn shows_newest_lines_and_scrolls_back() {
        let handle = LogBufferHandle::new(100);
        for i in 0..20 {
            handle.push(format!("line{i}"));
        }
        let mut dock = LogDock::new(handle);
        let area = Rect {
            x: 0,
            y: 0,
            width: 20,
            height: 7,
        };
        let buf = render(&mut dock, area);
        assert_eq!(row(&buf, 5, 20), "line19");
        assert_eq!(row(&buf, 1, 20), "line15");

        let ctx = ComponentContext::default();
        assert!(dock.handle_event(&key(KeyCode::PageUp), &ctx));
        assert_eq!(dock.scroll_back(), 5);
        let buf = render(&mut dock, area);
        assert_eq!(row(&buf, 5, 20), "line14");

        assert!(dock.handle_event(&key(KeyCode::End), &ctx));
        assert_eq!(dock.scroll_back(), 0);
    }

    #[test]
    fn scroll_back_is_bounded() {
        let handle = LogBufferHandle::new(100);
        for i in 0..3 {
            handle.push(format!("line{i}"));
        }
        let mut dock = LogDock::new(handle);
        render(
            &mut dock,
            Rect {
                x: 0,
                y: 0,
                width: 20,
                height: 7,
            },
        );
        dock.handle_event(&key(KeyCode::PageUp), &ComponentContext::default());
        assert_eq!(dock.scroll_back(), 0);
    }

    #[test]
    fn q_requests_close() {
        let mut dock = LogDock::new(LogBufferHandle::new(4));
        assert!(dock.handle_event(&key(KeyCode::Char('q')), &ComponentContext::default()));
        assert!(dock.wants_close());
    }
}

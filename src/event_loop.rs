use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded message pump for the viewer.
///
/// Each turn first calls the handler with `None` (draw a frame), then waits
/// up to `poll_interval` for input and hands every pending event to the
/// handler before drawing again. Window manager mutations therefore always
/// happen between frames.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain bursts (mouse drags, key repeat) before the next frame.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::scripted::{ScriptStep, ScriptedInputDriver};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn frames_interleave_with_event_batches() {
        let driver = ScriptedInputDriver::new([
            ScriptStep::Event(key('a')),
            ScriptStep::Event(key('b')),
            ScriptStep::Frame,
            ScriptStep::Event(key('q')),
        ]);
        let mut event_loop = EventLoop::new(driver, Duration::ZERO);
        let mut trace = Vec::new();
        event_loop
            .run(|_, event| {
                let flow = match &event {
                    None => {
                        trace.push("frame".to_string());
                        ControlFlow::Continue
                    }
                    Some(Event::Key(k)) if k.code == KeyCode::Char('q') => ControlFlow::Quit,
                    Some(Event::Key(k)) => {
                        trace.push(format!("{:?}", k.code));
                        ControlFlow::Continue
                    }
                    Some(_) => ControlFlow::Continue,
                };
                Ok(flow)
            })
            .expect("loop ends on quit");
        assert_eq!(trace, vec!["frame", "Char('a')", "Char('b')", "frame"]);
    }
}

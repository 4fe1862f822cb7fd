//! Replays a fixed sequence of events and frame boundaries so the viewer can
//! run headless.
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;

use super::InputDriver;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Event(Event),
    /// Report no pending input once, letting the loop draw a frame.
    Frame,
}

#[derive(Debug, Default)]
pub struct ScriptedInputDriver {
    steps: VecDeque<ScriptStep>,
}

impl ScriptedInputDriver {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl InputDriver for ScriptedInputDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        match self.steps.front() {
            Some(ScriptStep::Frame) => {
                self.steps.pop_front();
                Ok(false)
            }
            // An exhausted script reports input so `read` can fail instead of
            // spinning forever.
            Some(ScriptStep::Event(_)) | None => Ok(true),
        }
    }

    fn read(&mut self) -> io::Result<Event> {
        match self.steps.pop_front() {
            Some(ScriptStep::Event(event)) => Ok(event),
            Some(ScriptStep::Frame) => Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                "frame boundary read as input",
            )),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input script exhausted",
            )),
        }
    }
}

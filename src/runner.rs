use std::io;
use std::time::Duration;

use crossterm::event::Event;
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::ui::UiFrame;

/// What the host loop needs from an application.
pub trait ViewerApp {
    /// Draw one full frame.
    fn draw(&mut self, frame: &mut UiFrame<'_>);

    /// React to one input event between frames.
    fn handle_event(&mut self, event: &Event) -> ControlFlow;

    /// Whether the loop should capture mouse input.
    fn mouse_capture(&self) -> bool {
        true
    }
}

/// Drive `app` until it asks to quit: draw a frame, then feed it every
/// pending input event, and repeat.
pub fn run_app<B, D, A, E>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    app: &mut A,
    poll_interval: Duration,
) -> Result<(), E>
where
    B: Backend,
    D: InputDriver,
    A: ViewerApp,
    E: From<io::Error>,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(app.mouse_capture())?;

    let mut frames: u64 = 0;
    event_loop.run(|_driver, event| {
        match event {
            Some(evt) => {
                if let ControlFlow::Quit = app.handle_event(&evt) {
                    tracing::info!(frames, "viewer quit requested");
                    return Ok(ControlFlow::Quit);
                }
            }
            None => {
                terminal
                    .draw(|frame| {
                        let mut ui = UiFrame::new(frame);
                        app.draw(&mut ui);
                    })
                    .map_err(|e| io::Error::other(e.to_string()))?;
                frames = frames.wrapping_add(1);
            }
        }
        Ok(ControlFlow::Continue)
    })?;

    Ok(())
}

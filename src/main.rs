use clap::Parser;

use viewer_wm::config::{ViewerCli, ViewerOptions};
use viewer_wm::drivers::console::{ConsoleInputDriver, ConsoleSession};
use viewer_wm::log_buffer::{LogBufferHandle, set_global_log_buffer};
use viewer_wm::runner::run_app;
use viewer_wm::error::Result;
use viewer_wm::{Viewer, tracing_sub};

fn main() -> Result<()> {
    let args = ViewerCli::parse();
    let options = ViewerOptions::try_from(&args)?;

    // Logs go to memory while the viewer owns the screen.
    let log = LogBufferHandle::default();
    set_global_log_buffer(log.clone());
    tracing_sub::init_default(options.log_level);
    tracing::info!(?options, "starting viewer");

    let mut viewer = Viewer::new(&options, Some(log.clone()));
    let mut session = ConsoleSession::new()?;
    session.enter()?;
    let mut driver = ConsoleInputDriver::new();
    let result: Result<()> = run_app(
        session.terminal_mut(),
        &mut driver,
        &mut viewer,
        options.frame_interval,
    );
    session.exit()?;

    if result.is_err() {
        for line in log.tail(20, 0) {
            eprintln!("{line}");
        }
    }
    result
}

use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::constants::{DEFAULT_DOCK_WIDTH, DEFAULT_FRAME_INTERVAL_MS};
use crate::error::ViewerError;
use crate::window::WindowManagerConfig;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "viewer-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Tiled sensor viewer with a dockable side panel"
)]
pub struct ViewerCli {
    /// Width of the dock strip, in columns, while a dock control is open.
    #[arg(long = "dock-width", value_name = "COLUMNS", default_value_t = DEFAULT_DOCK_WIDTH)]
    pub dock_width: u16,

    /// Frames drawn per second while idle.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = 1000 / DEFAULT_FRAME_INTERVAL_MS)]
    pub fps: u64,

    /// Minimum level written to the in-app log (error, warn, info, debug, trace).
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Depth panes opened at start.
    #[arg(short = 'p', long = "panes", value_name = "COUNT", default_value_t = 2)]
    pub panes: usize,

    /// Skip the IMU graph group opened at start.
    #[arg(long = "no-group")]
    pub no_group: bool,
}

/// Validated startup options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    pub window_manager: WindowManagerConfig,
    pub frame_interval: Duration,
    pub log_level: Level,
    pub depth_panes: usize,
    pub imu_group: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            window_manager: WindowManagerConfig::default(),
            frame_interval: Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS),
            log_level: Level::INFO,
            depth_panes: 2,
            imu_group: true,
        }
    }
}

impl TryFrom<&ViewerCli> for ViewerOptions {
    type Error = ViewerError;

    fn try_from(cli: &ViewerCli) -> Result<Self, Self::Error> {
        if !(10..=200).contains(&cli.dock_width) {
            return Err(ViewerError::InvalidOption(
                "dock width must be between 10 and 200 columns".to_string(),
            ));
        }
        if !(1..=240).contains(&cli.fps) {
            return Err(ViewerError::InvalidOption(
                "fps must be between 1 and 240".to_string(),
            ));
        }
        if cli.panes > 16 {
            return Err(ViewerError::InvalidOption(
                "at most 16 depth panes can be opened at start".to_string(),
            ));
        }
        let log_level = cli.log_level.parse::<Level>().map_err(|_| {
            ViewerError::InvalidOption(format!("unknown log level `{}`", cli.log_level))
        })?;
        Ok(Self {
            window_manager: WindowManagerConfig {
                dock_width: cli.dock_width,
            },
            frame_interval: Duration::from_millis(1000 / cli.fps),
            log_level,
            depth_panes: cli.panes,
            imu_group: !cli.no_group,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ViewerCli {
        ViewerCli::try_parse_from(std::iter::once("viewer-wm").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn defaults_convert_cleanly() {
        let options = ViewerOptions::try_from(&parse(&[])).expect("defaults are valid");
        assert_eq!(options.window_manager.dock_width, DEFAULT_DOCK_WIDTH);
        assert_eq!(options.log_level, Level::INFO);
        assert_eq!(options.depth_panes, 2);
        assert!(options.imu_group);
    }

    #[test]
    fn flags_are_applied() {
        let cli = parse(&[
            "--dock-width",
            "60",
            "--fps",
            "50",
            "--log-level",
            "debug",
            "--panes",
            "0",
            "--no-group",
        ]);
        let options = ViewerOptions::try_from(&cli).expect("valid options");
        assert_eq!(options.window_manager.dock_width, 60);
        assert_eq!(options.frame_interval, Duration::from_millis(20));
        assert_eq!(options.log_level, Level::DEBUG);
        assert_eq!(options.depth_panes, 0);
        assert!(!options.imu_group);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for args in [
            &["--dock-width", "5"][..],
            &["--fps", "0"][..],
            &["--panes", "17"][..],
            &["--log-level", "loud"][..],
        ] {
            let err = ViewerOptions::try_from(&parse(args)).expect_err("should be rejected");
            assert!(matches!(err, ViewerError::InvalidOption(_)));
        }
    }
}

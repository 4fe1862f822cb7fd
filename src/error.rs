use std::io;

use thiserror::Error;

/// Failures surfaced by the viewer binary.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;

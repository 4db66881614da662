//! ==============================================================================
//! error.rs - shared error type
//! ==============================================================================
//!
//! every failure in this crate is recoverable: callers log it and move on to
//! the next serial line or the next refresh tick. binaries wrap these in
//! anyhow at the top level.
//!
//! ==============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("device request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// the device answered but no line looked like `{...}`
    #[error("no bracketed json line in device response")]
    NoBracketedLine,

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MonitorError>;

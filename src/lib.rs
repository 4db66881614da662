//! plant-monitor
//!
//! two small services for a microcontroller grow box:
//! - the sensor bridge (`plant-bridge`) relays serial json readings over http
//! - the dashboard (`plant-dashboard`) shows the plant catalog and keeps one
//!   plant linked to live device data

pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod serial;
pub mod server;

pub use config::MonitorConfig;
pub use domain::{ReadingSlot, SensorReading};
pub use error::{MonitorError, Result};

use tracing_subscriber::EnvFilter;

/// install the global tracing subscriber; `RUST_LOG` wins over the config level
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

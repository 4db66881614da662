//! ==============================================================================
//! config.rs - runtime configuration loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `monitor.toml`.
//!     loads configuration from file or falls back to the built-in defaults,
//!     which are the fixed addresses the grow box ships with.
//!
//! structure:
//!     - BridgeConfig: where the sensor bridge listens and which dir it serves.
//!     - SerialConfig: device path, baud rate and reconnect behaviour.
//!     - DashboardConfig: dashboard listen address and how it polls the device.
//!     - CalibrationConfig: offsets applied to raw device values.
//!     - LoggingConfig: tracing filter and whether readings are logged.
//!
//! every section is `#[serde(default)]` so a file only has to name what it
//! changes.
//!
//! ==============================================================================

use crate::error::{MonitorError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MonitorConfig {
    pub bridge: BridgeConfig,
    pub serial: SerialConfig,
    pub dashboard: DashboardConfig,
    pub calibration: CalibrationConfig,
    pub logging: LoggingConfig,

    /// file this config came from, `None` when running on defaults
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
    /// candidate files that existed but could not be used
    #[serde(skip)]
    pub load_errors: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BridgeConfig {
    pub bind: String,
    pub static_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SerialConfig {
    pub device: String,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
    pub reconnect_seconds: u64,
    pub channel_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub bind: String,
    pub device_url: String,
    pub interval_ms: u64,
    pub timeout_ms: u64,
    /// catalog entry overwritten by every successful refresh
    pub live_plant: String,
}

/// raw device values are inverted/offset; these undo it
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CalibrationConfig {
    pub temperature_offset: f64,
    pub humidity_base: f64,
    pub moisture_base: f64,
    pub light_marker: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_sensor_data: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            static_dir: PathBuf::from("."),
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: "/dev/ttyACM0".to_string(),
            baud_rate: 9600,
            read_timeout_ms: 500,
            reconnect_seconds: 5,
            channel_capacity: 64,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            device_url: "http://192.168.4.1/".to_string(),
            interval_ms: 1000,
            timeout_ms: 800,
            live_plant: "Ashwagandha".to_string(),
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            temperature_offset: 10.0,
            humidity_base: 100.0,
            moisture_base: 105.0,
            light_marker: "N/A".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_sensor_data: true,
        }
    }
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_seconds)
    }
}

impl DashboardConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl MonitorConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MonitorError::Config(format!("failed to read {}: {}", path.as_ref().display(), e))
        })?;

        let mut config: MonitorConfig = toml::from_str(&content)
            .map_err(|e| MonitorError::Config(format!("failed to parse config: {}", e)))?;
        config.loaded_from = Some(path.as_ref().to_path_buf());

        Ok(config)
    }

    /// Load with default fallback
    ///
    /// runs before logging is up, so problems are kept in `load_errors` and
    /// reported by `print_summary`.
    pub fn load_or_default() -> Self {
        let paths = [
            PathBuf::from("config").join("monitor.toml"),
            PathBuf::from("..").join("config").join("monitor.toml"),
        ];

        let mut load_errors = Vec::new();
        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        return Self { load_errors, ..config };
                    }
                    Err(e) => load_errors.push(e.to_string()),
                }
            }
        }

        Self { load_errors, ..Self::default() }
    }

    /// Log configuration summary
    pub fn print_summary(&self) {
        match &self.loaded_from {
            Some(path) => tracing::info!("[CONFIG] Loaded from {}", path.display()),
            None => tracing::warn!("[CONFIG] No usable config file found - using defaults"),
        }
        for err in &self.load_errors {
            tracing::warn!("[CONFIG] Skipped: {}", err);
        }
        tracing::info!(
            bridge = %self.bridge.bind,
            static_dir = %self.bridge.static_dir.display(),
            serial = %self.serial.device,
            baud = self.serial.baud_rate,
            "[CONFIG] bridge"
        );
        tracing::info!(
            dashboard = %self.dashboard.bind,
            device_url = %self.dashboard.device_url,
            interval_ms = self.dashboard.interval_ms,
            timeout_ms = self.dashboard.timeout_ms,
            live_plant = %self.dashboard.live_plant,
            "[CONFIG] dashboard"
        );
    }
}

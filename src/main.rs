//! ==============================================================================
//! main.rs - sensor bridge entry point
//! ==============================================================================
//!
//! purpose:
//!     sits between the microcontroller's serial line and the browser.
//!     keeps the newest reading and hands it out over http.
//!
//! responsibilities:
//!     - load configuration (config/monitor.toml or defaults)
//!     - open the serial port and keep it open (serial.rs)
//!     - parse each line into the reading slot (serial.rs)
//!     - serve GET /sensor-data and static files (server.rs)
//!
//! architecture:
//!
//!     ┌──────────────────────────────────────────────────────────┐
//!     │                  sensor bridge (this file)               │
//!     │  ┌──────────────┐   ┌────────────┐   ┌────────────────┐  │
//!     │  │ port reader  │──>│ run_ingest │──>│  ReadingSlot   │  │
//!     │  │ (blocking)   │   │            │   │ (latest only)  │  │
//!     │  └──────────────┘   └────────────┘   └───────┬────────┘  │
//!     │                                              │ read      │
//!     │                               ┌──────────────┴────────┐  │
//!     │                               │ web server (:3000)    │  │
//!     │                               │ /sensor-data + static │  │
//!     │                               └───────────────────────┘  │
//!     └──────────────────────────────────────────────────────────┘
//!
//! ==============================================================================

use anyhow::{Context, Result};
use plant_monitor::{serial, server, MonitorConfig, ReadingSlot};

#[tokio::main]
async fn main() -> Result<()> {
    // step 1: load configuration, then logging at the configured level
    let config = MonitorConfig::load_or_default();
    plant_monitor::init_logging(&config.logging.level);

    tracing::info!("===========================================================");
    tracing::info!("  Plant Monitor - Sensor Bridge");
    tracing::info!("===========================================================");
    config.print_summary();

    // step 2: the one reading slot, placeholder until the first good line
    let slot = ReadingSlot::new();

    // step 3: serial reader + ingest
    tracing::info!("[STARTUP] Opening serial device {}...", config.serial.device);
    let lines = serial::spawn_reader(config.serial.clone());
    let ingest = tokio::spawn(serial::run_ingest(
        lines,
        slot.clone(),
        config.logging.show_sensor_data,
    ));

    // step 4: web server, runs until the process is stopped
    let listener = tokio::net::TcpListener::bind(&config.bridge.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bridge.bind))?;
    tracing::info!(
        "[STARTUP] ✓ Backend running at http://{} (static files from {})",
        listener.local_addr()?,
        config.bridge.static_dir.display()
    );

    let app = server::router(slot, &config.bridge.static_dir);
    let result = server::run_server(listener, app).await;

    ingest.abort();
    if let Err(e) = &result {
        tracing::error!("[ERROR] Web server error: {}", e);
    }
    result
}

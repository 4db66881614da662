//! ==============================================================================
//! dashboard.rs - display controller entry point
//! ==============================================================================
//!
//! purpose:
//!     serves the plant gallery/detail kiosk page and keeps the live-linked
//!     plant in step with the device.
//!
//! responsibilities:
//!     - load configuration (config/monitor.toml or defaults)
//!     - build the catalog and view state (dashboard/view.rs)
//!     - poll the device once per interval (dashboard/refresh.rs)
//!     - serve the page and the select/back links (dashboard/server.rs)
//!
//! ==============================================================================

use anyhow::{Context, Result};
use plant_monitor::dashboard::{server, Catalog, Dashboard, DashboardState, DeviceClient, Refresher};
use plant_monitor::MonitorConfig;
use std::sync::Arc;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<()> {
    // step 1: load configuration
    let config = MonitorConfig::load_or_default();
    plant_monitor::init_logging(&config.logging.level);

    tracing::info!("===========================================================");
    tracing::info!("  Plant Monitor - Dashboard");
    tracing::info!("===========================================================");
    config.print_summary();

    // step 2: catalog + view state shared by the refresh task and the web server
    let dashboard = Arc::new(RwLock::new(Dashboard::new(
        Catalog::builtin(),
        config.dashboard.live_plant.clone(),
    )));

    // step 3: background refresh, first tick fires right away
    let client = DeviceClient::new(config.dashboard.device_url.clone(), config.dashboard.timeout())
        .context("failed to build device http client")?;
    let refresher = Refresher::new(client, config.calibration.clone(), config.logging.show_sensor_data);
    let interval = config.dashboard.interval();
    tracing::info!(
        "[RUNTIME] Polling {} every {}ms (timeout {}ms)",
        config.dashboard.device_url,
        config.dashboard.interval_ms,
        config.dashboard.timeout_ms
    );
    let refresh = tokio::spawn(refresher.run(dashboard.clone(), interval));

    // step 4: web server
    let listener = tokio::net::TcpListener::bind(&config.dashboard.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.dashboard.bind))?;
    tracing::info!("[STARTUP] ✓ Dashboard live at http://{}", listener.local_addr()?);

    let state = DashboardState {
        dashboard,
        page_refresh_secs: interval.as_secs().max(1),
    };
    let result = axum::serve(listener, server::router(state)).await;

    refresh.abort();
    if let Err(e) = &result {
        tracing::error!("[ERROR] Web server error: {}", e);
    }
    result.map_err(Into::into)
}

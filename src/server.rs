//! sensor bridge web server
//!
//! one json route; everything else is a file under `static_dir`.

use crate::domain::{ReadingSlot, SensorReading};

use axum::{extract::State, response::Json, routing::get, Router};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub fn router(slot: ReadingSlot, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/sensor-data", get(sensor_data_handler))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .with_state(slot)
}

pub async fn run_server(listener: tokio::net::TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app).await?;
    Ok(())
}

/// latest reading as received from the device, placeholder until the first line
async fn sensor_data_handler(State(slot): State<ReadingSlot>) -> Json<SensorReading> {
    Json(slot.snapshot().await)
}

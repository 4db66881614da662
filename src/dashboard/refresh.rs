//! ==============================================================================
//! refresh.rs - live sensor refresh for the dashboard
//! ==============================================================================
//!
//! purpose:
//!     polls the device's informal `GET /` endpoint, pulls the newest json
//!     object out of whatever text it returns, calibrates it and merges it into
//!     the live-linked plant.
//!
//! relationships:
//!     - used by: bin/dashboard.rs (spawns run_refresh_loop)
//!     - writes: view.rs (Dashboard::apply_live)
//!     - uses: reqwest (http client with a per-request timeout)
//!
//! overlap:
//!     each tick is awaited inside the loop and missed ticks are delayed, so
//!     there is never more than one request in flight. the request timeout is
//!     shorter than the interval, so a dead device costs one tick, not a stall.
//!
//! ==============================================================================

use super::catalog::LiveFields;
use super::view::Dashboard;
use crate::config::CalibrationConfig;
use crate::error::{MonitorError, Result};

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;

/// raw values as the device prints them
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DeviceSample {
    #[serde(rename = "temperatureC")]
    pub temperature_c: f64,
    pub raindrop: f64,
    pub moisture: f64,
}

// ==============================================================================
// decoding + calibration
// ==============================================================================

/// last line of `body` that is a bracketed, decodable sample
///
/// lines that don't start with `{` and end with `}` are skipped without a
/// second look. bracketed lines that fail to decode are skipped too, unless
/// none of them decode, in which case the last failure is returned.
pub fn last_json_object(body: &str) -> Result<DeviceSample> {
    let mut latest: Option<DeviceSample> = None;
    let mut last_err: Option<serde_json::Error> = None;

    let candidates = body
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('{') && line.ends_with('}'));

    for line in candidates {
        match serde_json::from_str::<DeviceSample>(line) {
            Ok(sample) => latest = Some(sample),
            Err(e) => last_err = Some(e),
        }
    }

    match (latest, last_err) {
        (Some(sample), _) => Ok(sample),
        (None, Some(e)) => Err(MonitorError::Json(e)),
        (None, None) => Err(MonitorError::NoBracketedLine),
    }
}

/// undo the device's inverted/offset readings
pub fn calibrate(sample: &DeviceSample, cal: &CalibrationConfig) -> LiveFields {
    LiveFields {
        temperature: sample.temperature_c - cal.temperature_offset,
        humidity: cal.humidity_base - sample.raindrop,
        soil_moisture: cal.moisture_base - sample.moisture,
        light: cal.light_marker.clone(),
    }
}

// ==============================================================================
// device client
// ==============================================================================

#[derive(Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    url: String,
}

impl DeviceClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// response body as text, whatever the status code
    pub async fn fetch_body(&self) -> Result<String> {
        let response = self.http.get(&self.url).send().await?;
        Ok(response.text().await?)
    }
}

// ==============================================================================
// refresh task
// ==============================================================================

pub struct Refresher {
    client: DeviceClient,
    calibration: CalibrationConfig,
    show_data: bool,
}

impl Refresher {
    pub fn new(client: DeviceClient, calibration: CalibrationConfig, show_data: bool) -> Self {
        Self { client, calibration, show_data }
    }

    /// decode a device body and merge it; the dashboard is untouched on error
    pub async fn apply_body(&self, body: &str, dashboard: &RwLock<Dashboard>) -> Result<LiveFields> {
        let sample = last_json_object(body)?;
        let live = calibrate(&sample, &self.calibration);

        if self.show_data {
            tracing::info!(
                "[REFRESH] Temp: {:.1}°C | Humidity: {:.1}% | Soil: {:.1}",
                live.temperature, live.humidity, live.soil_moisture
            );
        } else {
            tracing::debug!(?sample, ?live, "[REFRESH] sensor data updated");
        }

        dashboard.write().await.apply_live(&live);
        Ok(live)
    }

    /// one poll of the device
    pub async fn tick(&self, dashboard: &RwLock<Dashboard>) -> Result<LiveFields> {
        let body = self.client.fetch_body().await?;
        self.apply_body(&body, dashboard).await
    }

    /// poll forever; failures are logged and the next tick tries again
    pub async fn run(self, dashboard: Arc<RwLock<Dashboard>>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = self.tick(&dashboard).await {
                tracing::warn!("[REFRESH] ⚠ Error fetching sensor data from {}: {}", self.client.url(), e);
            }
        }
    }
}

// ==============================================================================
// tests
// ==============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::catalog::Catalog;

    fn dashboard() -> RwLock<Dashboard> {
        RwLock::new(Dashboard::new(Catalog::builtin(), "Ashwagandha"))
    }

    fn refresher() -> Refresher {
        let client = DeviceClient::new("http://127.0.0.1:9/", Duration::from_millis(100)).unwrap();
        Refresher::new(client, CalibrationConfig::default(), false)
    }

    #[test]
    fn calibration_matches_device_offsets() {
        let sample = DeviceSample { temperature_c: 30.0, raindrop: 20.0, moisture: 15.0 };
        let live = calibrate(&sample, &CalibrationConfig::default());
        assert_eq!(live.temperature, 20.0);
        assert_eq!(live.humidity, 80.0);
        assert_eq!(live.soil_moisture, 90.0);
        assert_eq!(live.light, "N/A");
    }

    #[test]
    fn decoder_takes_last_bracketed_line() {
        let body = "HTTP/1.1 200 OK\r\n\
                    Content-Type: application/json\r\n\
                    {\"temperatureC\":\r\n\
                    {\"temperatureC\":30.00,\"temperatureF\":86.00,\"moisture\":15,\"raindrop\":20}\r\n";
        let sample = last_json_object(body).unwrap();
        assert_eq!(sample, DeviceSample { temperature_c: 30.0, raindrop: 20.0, moisture: 15.0 });
    }

    #[test]
    fn decoder_prefers_later_objects() {
        let body = "{\"temperatureC\":1,\"moisture\":1,\"raindrop\":1}\n\
                    noise\n\
                    {\"temperatureC\":2,\"moisture\":2,\"raindrop\":2}";
        assert_eq!(last_json_object(body).unwrap().temperature_c, 2.0);
    }

    #[test]
    fn decoder_skips_bad_trailing_candidate() {
        let body = "{\"temperatureC\":2,\"moisture\":2,\"raindrop\":2}\n{\"status\":\"ok\"}";
        assert_eq!(last_json_object(body).unwrap().moisture, 2.0);
    }

    #[test]
    fn decoder_errors() {
        assert!(matches!(last_json_object(""), Err(MonitorError::NoBracketedLine)));
        assert!(matches!(
            last_json_object("It is rainning outside!\n"),
            Err(MonitorError::NoBracketedLine)
        ));
        assert!(matches!(last_json_object("{not json}"), Err(MonitorError::Json(_))));
    }

    #[tokio::test]
    async fn bad_body_leaves_catalog_alone() {
        let dashboard = dashboard();
        let r = refresher();
        assert!(r.apply_body("Still Connecting...", &dashboard).await.is_err());
        assert!(r.apply_body("{broken}", &dashboard).await.is_err());

        let d = dashboard.read().await;
        let plant = d.catalog().get("Ashwagandha").unwrap();
        assert_eq!(plant.temperature, 28.0);
        assert_eq!(plant.light, "Full Sunlight");
    }

    #[tokio::test]
    async fn good_body_updates_shown_plant() {
        let dashboard = dashboard();
        dashboard.write().await.select("Ashwagandha");

        let body = "{\"temperatureC\":30,\"moisture\":15,\"raindrop\":20}\n";
        refresher().apply_body(body, &dashboard).await.unwrap();

        let d = dashboard.read().await;
        let crate::dashboard::view::View::Detail(detail) = d.view() else {
            panic!("detail view should still be shown");
        };
        assert_eq!(detail.temperature, "20 °C");
        assert_eq!(detail.humidity, "80 %");
        assert_eq!(detail.soil_moisture, "90");
        assert_eq!(detail.light, "N/A");
    }

    #[tokio::test]
    async fn unreachable_device_is_an_http_error() {
        let dashboard = dashboard();
        let err = refresher().tick(&dashboard).await.unwrap_err();
        assert!(matches!(err, MonitorError::Http(_)));
        assert_eq!(dashboard.read().await.catalog().get("Ashwagandha").unwrap().humidity, 60.0);
    }
}

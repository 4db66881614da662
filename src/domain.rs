use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// latest reading relayed from the microcontroller
///
/// serialized with the dashboard's field names. the device's own names
/// (`temperatureC`, `raindrop`, `moisture`) are accepted on the way in and the
/// values are kept exactly as sent, no calibration happens on the bridge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawReading")]
pub struct SensorReading {
    /// temperature in celsius
    pub temperature: f64,
    /// humidity, or the raindrop percentage standing in for it
    pub humidity: f64,
    /// soil moisture percentage
    pub soil_moisture: f64,
    /// light category, the current hardware has no light sensor
    pub light: String,
}

/// a serial line as it arrives; either naming may be present, or both
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReading {
    temperature: Option<f64>,
    #[serde(rename = "temperatureC")]
    temperature_c: Option<f64>,
    humidity: Option<f64>,
    raindrop: Option<f64>,
    soil_moisture: Option<f64>,
    moisture: Option<f64>,
    light: Option<String>,
}

impl TryFrom<RawReading> for SensorReading {
    type Error = String;

    /// dashboard names win over device names when a line carries both
    fn try_from(raw: RawReading) -> Result<Self, Self::Error> {
        let pick = |primary: Option<f64>, device: Option<f64>, name: &str, device_name: &str| {
            primary
                .or(device)
                .ok_or_else(|| format!("missing field `{}` (or `{}`)", name, device_name))
        };

        Ok(Self {
            temperature: pick(raw.temperature, raw.temperature_c, "temperature", "temperatureC")?,
            humidity: pick(raw.humidity, raw.raindrop, "humidity", "raindrop")?,
            soil_moisture: pick(raw.soil_moisture, raw.moisture, "soilMoisture", "moisture")?,
            light: raw.light.unwrap_or_else(unknown_light),
        })
    }
}

fn unknown_light() -> String {
    "Unknown".to_string()
}

impl Default for SensorReading {
    /// placeholder served until the first line parses
    fn default() -> Self {
        Self {
            temperature: 0.0,
            humidity: 0.0,
            soil_moisture: 0.0,
            light: unknown_light(),
        }
    }
}

/// the bridge's single reading slot
///
/// written only by serial ingest, read by the http handler. the value is
/// swapped whole under the write lock so readers never see a mix of two lines.
#[derive(Clone, Default)]
pub struct ReadingSlot {
    inner: Arc<RwLock<SensorReading>>,
}

impl ReadingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> SensorReading {
        self.inner.read().await.clone()
    }

    pub async fn replace(&self, reading: SensorReading) {
        *self.inner.write().await = reading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_line_uses_aliases() {
        let line = r#"{"temperatureC":23.50,"temperatureF":74.30,"moisture":41,"raindrop":7}"#;
        let reading: SensorReading = serde_json::from_str(line).unwrap();
        assert_eq!(reading.temperature, 23.5);
        assert_eq!(reading.humidity, 7.0);
        assert_eq!(reading.soil_moisture, 41.0);
        assert_eq!(reading.light, "Unknown");
    }

    #[test]
    fn line_with_both_namings_is_accepted() {
        let line = r#"{"temperature":21,"temperatureC":19,"humidity":50,"raindrop":3,"soilMoisture":40,"moisture":44,"light":"Bright"}"#;
        let reading: SensorReading = serde_json::from_str(line).unwrap();
        assert_eq!(reading.temperature, 21.0);
        assert_eq!(reading.humidity, 50.0);
        assert_eq!(reading.soil_moisture, 40.0);
        assert_eq!(reading.light, "Bright");
    }

    #[test]
    fn serializes_with_all_four_keys() {
        let value = serde_json::to_value(SensorReading::default()).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["temperature", "humidity", "soilMoisture", "light"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert_eq!(obj.len(), 4);
    }

    #[test]
    fn missing_numeric_field_is_rejected() {
        let line = r#"{"temperatureC":23.5,"moisture":41}"#;
        assert!(serde_json::from_str::<SensorReading>(line).is_err());
    }

    #[tokio::test]
    async fn slot_starts_with_placeholder_and_swaps_whole() {
        let slot = ReadingSlot::new();
        assert_eq!(slot.snapshot().await, SensorReading::default());

        let next = SensorReading {
            temperature: 21.0,
            humidity: 55.0,
            soil_moisture: 60.0,
            light: "Bright".to_string(),
        };
        slot.replace(next.clone()).await;
        assert_eq!(slot.snapshot().await, next);
    }
}

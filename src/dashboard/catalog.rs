//! plant catalog
//!
//! fixed at startup. only the live-linked plant's four sensor fields change
//! afterwards, through `apply_live`.

use indexmap::IndexMap;
use serde::Serialize;

/// text ranges a plant is happiest in
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdealRange {
    pub temperature: String,
    pub humidity: String,
    pub soil_moisture: String,
    pub light: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    /// celsius
    pub temperature: f64,
    /// percent
    pub humidity: f64,
    pub soil_moisture: f64,
    pub light: String,
    pub ideal: IdealRange,
    pub fact: String,
    pub status: String,
    /// url, or a path served by the bridge
    pub image: String,
}

/// calibrated values from one device refresh
#[derive(Clone, Debug, PartialEq)]
pub struct LiveFields {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub light: String,
}

/// plant name -> record, in gallery order
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    plants: IndexMap<String, PlantRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// the three plants the grow box is set up for
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            "Ashwagandha",
            PlantRecord {
                temperature: 28.0,
                humidity: 60.0,
                soil_moisture: 70.0,
                light: "Full Sunlight".to_string(),
                ideal: IdealRange {
                    temperature: "25-30 °C".to_string(),
                    humidity: "50-70%".to_string(),
                    soil_moisture: "60-80".to_string(),
                    light: "Full sunlight".to_string(),
                },
                fact: "Ashwagandha is a medicinal plant known for its stress-reducing properties.".to_string(),
                status: "Perfect".to_string(),
                image: "/download.jpg".to_string(),
            },
        );
        catalog.insert(
            "Mint",
            PlantRecord {
                temperature: 22.0,
                humidity: 70.0,
                soil_moisture: 80.0,
                light: "Partial Sunlight".to_string(),
                ideal: IdealRange {
                    temperature: "20-25 °C".to_string(),
                    humidity: "60-80%".to_string(),
                    soil_moisture: "70-90".to_string(),
                    light: "Partial sunlight".to_string(),
                },
                fact: "Mint is a versatile herb often used in teas and beverages.".to_string(),
                status: "Perfect".to_string(),
                image: "https://foodieng.com/wp-content/uploads/2022/05/mint-leaf.jpg".to_string(),
            },
        );
        catalog.insert(
            "Common Herbs",
            PlantRecord {
                temperature: 15.0,
                humidity: 40.0,
                soil_moisture: 50.0,
                light: "Low Sunlight".to_string(),
                ideal: IdealRange {
                    temperature: "22-28 °C".to_string(),
                    humidity: "55-75%".to_string(),
                    soil_moisture: "65-85".to_string(),
                    light: "Partial sunlight".to_string(),
                },
                fact: "Common Sage is often used for seasoning and has medicinal properties.".to_string(),
                status: "Needs Attention".to_string(),
                image: "https://img.freepik.com/premium-photo/common-sage-isolated-white-background_434193-7374.jpg"
                    .to_string(),
            },
        );
        catalog
    }

    pub fn insert(&mut self, name: impl Into<String>, record: PlantRecord) {
        self.plants.insert(name.into(), record);
    }

    pub fn get(&self, name: &str) -> Option<&PlantRecord> {
        self.plants.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PlantRecord> {
        self.plants.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plants.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlantRecord)> {
        self.plants.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// overwrite the sensor fields of one plant; false if it isn't in the catalog
    pub fn apply_live(&mut self, name: &str, live: &LiveFields) -> bool {
        let Some(record) = self.get_mut(name) else {
            return false;
        };
        record.temperature = live.temperature;
        record.humidity = live.humidity;
        record.soil_moisture = live.soil_moisture;
        record.light = live.light.clone();
        true
    }
}

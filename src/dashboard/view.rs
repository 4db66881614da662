//! gallery/detail view state
//!
//! `Dashboard` owns the catalog together with what the screen currently
//! shows. select/deselect are the two viewer actions; `apply_live` is what the
//! refresh task calls.

use super::catalog::{Catalog, LiveFields, PlantRecord};

/// text of every field shown on the detail view
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailView {
    pub plant_name: String,
    pub temperature: String,
    pub humidity: String,
    pub soil_moisture: String,
    pub light: String,
    pub ideal_temperature: String,
    pub ideal_humidity: String,
    pub ideal_soil_moisture: String,
    pub ideal_light: String,
    pub fact: String,
    pub status: String,
    pub image: String,
}

impl DetailView {
    fn from_record(name: &str, plant: &PlantRecord) -> Self {
        Self {
            plant_name: name.to_string(),
            temperature: format!("{} °C", plant.temperature),
            humidity: format!("{} %", plant.humidity),
            soil_moisture: plant.soil_moisture.to_string(),
            light: plant.light.clone(),
            ideal_temperature: plant.ideal.temperature.clone(),
            ideal_humidity: plant.ideal.humidity.clone(),
            ideal_soil_moisture: plant.ideal.soil_moisture.clone(),
            ideal_light: plant.ideal.light.clone(),
            fact: plant.fact.clone(),
            status: plant.status.clone(),
            image: plant.image.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Gallery,
    Detail(DetailView),
}

pub struct Dashboard {
    catalog: Catalog,
    view: View,
    live_plant: String,
}

impl Dashboard {
    pub fn new(catalog: Catalog, live_plant: impl Into<String>) -> Self {
        Self {
            catalog,
            view: View::Gallery,
            live_plant: live_plant.into(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn is_gallery_visible(&self) -> bool {
        matches!(self.view, View::Gallery)
    }

    pub fn is_detail_visible(&self) -> bool {
        !self.is_gallery_visible()
    }

    /// name on the detail view, `None` while the gallery is up
    pub fn displayed_plant(&self) -> Option<&str> {
        match &self.view {
            View::Detail(detail) => Some(&detail.plant_name),
            View::Gallery => None,
        }
    }

    /// show `name` on the detail view; unknown names do nothing
    pub fn select(&mut self, name: &str) -> bool {
        let Some(plant) = self.catalog.get(name) else {
            tracing::debug!(plant = name, "select ignored, not in catalog");
            return false;
        };
        self.view = View::Detail(DetailView::from_record(name, plant));
        true
    }

    pub fn deselect(&mut self) {
        self.view = View::Gallery;
    }

    /// merge refreshed values into the live-linked plant and redraw it if shown
    pub fn apply_live(&mut self, live: &LiveFields) -> bool {
        if !self.catalog.apply_live(&self.live_plant, live) {
            tracing::warn!(plant = %self.live_plant, "[REFRESH] live plant is not in the catalog");
            return false;
        }

        if self.displayed_plant() == Some(self.live_plant.as_str()) {
            let name = self.live_plant.clone();
            self.select(&name);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::new(Catalog::builtin(), "Ashwagandha")
    }

    fn live() -> LiveFields {
        LiveFields {
            temperature: 20.0,
            humidity: 80.0,
            soil_moisture: 90.0,
            light: "N/A".to_string(),
        }
    }

    #[test]
    fn starts_on_gallery() {
        let d = dashboard();
        assert!(d.is_gallery_visible());
        assert!(!d.is_detail_visible());
        assert_eq!(d.displayed_plant(), None);
    }

    #[test]
    fn select_fills_every_field_for_each_plant() {
        let mut d = dashboard();
        let names: Vec<String> = d.catalog().names().map(str::to_string).collect();

        for name in names {
            assert!(d.select(&name));
            assert!(d.is_detail_visible());
            let record = d.catalog().get(&name).unwrap().clone();
            let View::Detail(detail) = d.view() else {
                panic!("detail view not shown for {}", name);
            };
            assert_eq!(detail.plant_name, name);
            assert_eq!(detail.temperature, format!("{} °C", record.temperature));
            assert_eq!(detail.humidity, format!("{} %", record.humidity));
            assert_eq!(detail.soil_moisture, record.soil_moisture.to_string());
            assert_eq!(detail.light, record.light);
            assert_eq!(detail.ideal_temperature, record.ideal.temperature);
            assert_eq!(detail.ideal_humidity, record.ideal.humidity);
            assert_eq!(detail.ideal_soil_moisture, record.ideal.soil_moisture);
            assert_eq!(detail.ideal_light, record.ideal.light);
            assert_eq!(detail.fact, record.fact);
            assert_eq!(detail.status, record.status);
            assert_eq!(detail.image, record.image);
        }
    }

    #[test]
    fn whole_numbers_render_without_decimals() {
        let mut d = dashboard();
        d.select("Mint");
        let View::Detail(detail) = d.view() else { panic!() };
        assert_eq!(detail.temperature, "22 °C");
        assert_eq!(detail.humidity, "70 %");
        assert_eq!(detail.soil_moisture, "80");
    }

    #[test]
    fn unknown_name_changes_nothing() {
        let mut d = dashboard();
        assert!(!d.select("Basil"));
        assert!(d.is_gallery_visible());

        d.select("Mint");
        let shown = d.view().clone();
        assert!(!d.select("Basil"));
        assert_eq!(d.view(), &shown);
        assert_eq!(d.catalog().len(), 3);
    }

    #[test]
    fn deselect_always_returns_to_gallery() {
        let mut d = dashboard();
        d.deselect();
        assert!(d.is_gallery_visible());

        d.select("Common Herbs");
        d.deselect();
        assert!(d.is_gallery_visible());
        assert!(!d.is_detail_visible());
        assert_eq!(d.displayed_plant(), None);
    }

    #[test]
    fn live_update_redraws_only_when_shown() {
        let mut d = dashboard();
        d.select("Ashwagandha");
        assert!(d.apply_live(&live()));
        let View::Detail(detail) = d.view() else { panic!() };
        assert_eq!(detail.temperature, "20 °C");
        assert_eq!(detail.light, "N/A");

        d.select("Mint");
        let shown = d.view().clone();
        d.apply_live(&LiveFields { temperature: 5.0, ..live() });
        assert_eq!(d.view(), &shown);
        assert_eq!(d.catalog().get("Ashwagandha").unwrap().temperature, 5.0);
    }

    #[test]
    fn live_update_does_not_leave_gallery() {
        let mut d = dashboard();
        d.select("Ashwagandha");
        d.deselect();
        d.apply_live(&live());
        assert!(d.is_gallery_visible());
    }

    #[test]
    fn missing_live_plant_is_ignored() {
        let mut d = Dashboard::new(Catalog::builtin(), "Basil");
        assert!(!d.apply_live(&live()));
        assert_eq!(d.catalog().get("Ashwagandha").unwrap().temperature, 28.0);
    }
}

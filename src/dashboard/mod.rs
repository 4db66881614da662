//! ==============================================================================
//! dashboard - display controller
//! ==============================================================================
//!
//! purpose:
//!     holds the plant catalog and the gallery/detail view, keeps one plant
//!     linked to live device data and serves the result as a kiosk page.
//!
//! layout:
//!     - catalog.rs: plant records, built-in catalog
//!     - view.rs: Dashboard (select / deselect / apply_live)
//!     - refresh.rs: device polling, json line decoder, calibration
//!     - render.rs: html for gallery and detail views
//!     - server.rs: axum routes driving the view
//!
//! ==============================================================================

pub mod catalog;
pub mod refresh;
pub mod render;
pub mod server;
pub mod view;

pub use catalog::{Catalog, IdealRange, LiveFields, PlantRecord};
pub use refresh::{DeviceClient, DeviceSample, Refresher};
pub use server::DashboardState;
pub use view::{Dashboard, DetailView, View};

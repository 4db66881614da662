//! dashboard web server
//!
//! `GET /` draws whatever the view currently is. the plant and back links
//! change the view and bounce straight back to `/`.

use super::catalog::Catalog;
use super::render::render_page;
use super::view::Dashboard;

use axum::{
    extract::{Path, State},
    response::{Html, Json, Redirect},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct DashboardState {
    pub dashboard: Arc<RwLock<Dashboard>>,
    /// seconds between page reloads
    pub page_refresh_secs: u64,
}

pub fn router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/plants/:name", get(select_handler))
        .route("/back", get(back_handler))
        .route("/api/plants", get(catalog_handler))
        .with_state(state)
}

async fn page_handler(State(state): State<DashboardState>) -> Html<String> {
    let dashboard = state.dashboard.read().await;
    Html(render_page(dashboard.view(), dashboard.catalog(), state.page_refresh_secs))
}

async fn select_handler(State(state): State<DashboardState>, Path(name): Path<String>) -> Redirect {
    state.dashboard.write().await.select(&name);
    Redirect::to("/")
}

async fn back_handler(State(state): State<DashboardState>) -> Redirect {
    state.dashboard.write().await.deselect();
    Redirect::to("/")
}

/// read-only json dump of the catalog
async fn catalog_handler(State(state): State<DashboardState>) -> Json<Catalog> {
    Json(state.dashboard.read().await.catalog().clone())
}

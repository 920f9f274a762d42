pub mod config;
pub mod handlers;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::stager::LocalStager;
use crate::services::storage::ObjectStorage;
use axum::{
    Router,
    routing::{any, get},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn ObjectStorage>,
    pub stager: Arc<LocalStager>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/upload", get(handlers::pages::upload_form))
        .route("/success", get(handlers::pages::success))
        .route("/fail", get(handlers::pages::fail))
        .route("/favicon.ico", get(handlers::pages::favicon))
        // Registered for every method: the handler owns the 405 branch so the
        // browser still gets a redirect instead of a bare error body.
        .route("/upldr", any(handlers::upload::relay_upload))
        .with_state(state)
}

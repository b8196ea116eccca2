//! API module
//!
//! HTTP handlers exposing site content and backend diagnostics as JSON.

pub mod content;
pub mod diagnostics;

use crate::config::BackendConfig;
use crate::content::SiteContentProvider;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// State shared by every handler
pub struct AppState {
    /// Content provider (owns its own locking)
    pub provider: SiteContentProvider,
    /// Backend settings, reported by diagnostics
    pub backend_config: BackendConfig,
}

impl AppState {
    /// Build state for the configured backend
    pub fn new(backend_config: BackendConfig) -> Self {
        Self {
            provider: SiteContentProvider::from_config(&backend_config),
            backend_config,
        }
    }
}

/// Handle to the shared state
pub type SharedState = Arc<AppState>;

/// Content and diagnostics routes
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/content", get(content::get_content))
        .route("/api/content/reload", post(content::reload_content))
        .route(
            "/api/content/services",
            get(content::get_services).put(content::put_services),
        )
        .route(
            "/api/content/gallery",
            get(content::get_gallery).put(content::put_gallery),
        )
        .route(
            "/api/content/testimonials",
            get(content::get_testimonials).put(content::put_testimonials),
        )
        .route(
            "/api/content/team",
            get(content::get_team).put(content::put_team),
        )
        .route(
            "/api/content/social-links",
            get(content::get_social_links).put(content::put_social_links),
        )
        .route(
            "/api/content/hero-image",
            get(content::get_hero_image).put(content::put_hero_image),
        )
        .route(
            "/api/content/about-us-image",
            get(content::get_about_us_image).put(content::put_about_us_image),
        )
        .route("/api/diagnostics/connection", get(diagnostics::connection))
        .route("/api/diagnostics/services", get(diagnostics::services))
        .with_state(state)
}

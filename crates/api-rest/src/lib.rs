//! # API REST
//!
//! REST API for admin forms.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Form building itself lives in `admin-forms-core`; handlers build one form instance per
//! request and return its rendered view.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod handlers;

pub use config::RestConfig;

use admin_forms_core::{ConfigManager, FormTypeRegistry};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers.
///
/// Both members are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConfigManager>,
    pub registry: Arc<FormTypeRegistry>,
}

impl AppState {
    /// State with the default form type registry.
    pub fn new(config: ConfigManager) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(FormTypeRegistry::with_defaults()),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::show_form, handlers::submit_form),
    components(schemas(handlers::HealthRes, handlers::FormRes, handlers::SubmitReq))
)]
pub struct ApiDoc;

/// Build the REST router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/forms/:entity/:view", get(handlers::show_form))
        .route("/forms/:entity/:view/submit", post(handlers::submit_form))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

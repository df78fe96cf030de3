//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - Page routes rendered as JSON view documents
//! - Authentication middleware and the company access guard
//! - Error and view response types

pub mod error;
pub mod guard;
pub mod middleware;
pub mod routes;
pub mod view;

use axum::Router;
use finboard_shared::JwtService;
use finboard_shared::config::RegistrationConfig;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use view::View;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Employee onboarding settings.
    pub registration: Arc<RegistrationConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Path of a page under the API prefix, used in `redirect_to` fields.
#[must_use]
pub fn page_path(path: &str) -> String {
    format!("/api/v1{path}")
}

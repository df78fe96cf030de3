//! API route definitions.

use axum::{Router, middleware};
use serde::Serialize;
use uuid::Uuid;

use crate::{AppState, middleware::auth::auth_middleware};
use finboard_db::entities::companies;

pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod home;
pub mod records;
pub mod registration;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Company pages require a valid access token
    let protected_routes = Router::new()
        .merge(dashboard::routes())
        .merge(records::routes())
        .merge(employees::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(home::routes())
        .merge(auth::routes())
        .merge(registration::routes())
        .merge(protected_routes)
}

/// Company fields every company page shows in its header.
#[derive(Debug, Clone, Serialize)]
pub struct CompanySummary {
    /// Company ID.
    pub id: Uuid,
    /// Company name.
    pub name: String,
    /// Reporting currency.
    pub base_currency: String,
}

impl From<companies::Model> for CompanySummary {
    fn from(company: companies::Model) -> Self {
        Self {
            id: company.id,
            name: company.name,
            base_currency: company.base_currency,
        }
    }
}

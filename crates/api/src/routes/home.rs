//! Landing page.

use axum::{Router, routing::get};
use serde_json::json;

use crate::{AppState, page_path, view::View};

/// GET / - Landing page with links to login and registration.
async fn home() -> View<serde_json::Value> {
    View::new(
        "home.html",
        json!({
            "login_url": page_path("/auth/login"),
            "register_url": page_path("/register"),
        }),
    )
}

/// Creates the home route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}

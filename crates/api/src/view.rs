//! View documents.
//!
//! A page renders as `{"template": <page>, "context": <mapping>}`. Failed
//! form submissions render the same page with a 4xx status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// A rendered page.
#[derive(Debug, Clone)]
pub struct View<T> {
    status: StatusCode,
    template: &'static str,
    context: T,
}

#[derive(Serialize)]
struct ViewBody<'a, T> {
    template: &'static str,
    context: &'a T,
}

impl<T: Serialize> View<T> {
    /// A 200 page.
    pub fn new(template: &'static str, context: T) -> Self {
        Self {
            status: StatusCode::OK,
            template,
            context,
        }
    }

    /// Same page with a different status, for re-rendered forms.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        let body = ViewBody {
            template: self.template,
            context: &self.context,
        };
        (self.status, Json(body)).into_response()
    }
}

//! Error responses.
//!
//! Handlers return [`ApiError`], which renders as
//! `{"error": <code>, "message": <text>}` with the status of the wrapped
//! [`AppError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;

use finboard_core::access::AccessError;
use finboard_core::auth::PasswordError;
use finboard_shared::{AppError, JwtError};

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 403 with the blanket message used by every gated page.
    #[must_use]
    pub fn forbidden() -> Self {
        Self(AppError::Forbidden(AccessError::Forbidden.to_string()))
    }

    /// 404 for a missing resource.
    #[must_use]
    pub fn not_found(what: &str) -> Self {
        Self(AppError::NotFound(format!("{what} not found")))
    }

    /// 401 with `message`.
    #[must_use]
    pub fn unauthorized(message: &str) -> Self {
        Self(AppError::Unauthorized(message.to_string()))
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl From<DbErr> for ApiError {
    fn from(error: DbErr) -> Self {
        Self(AppError::Database(error.to_string()))
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        Self(AppError::Internal(error.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(error: JwtError) -> Self {
        match error {
            JwtError::Expired => Self(AppError::Unauthorized("Token has expired".to_string())),
            JwtError::EncodingError(e) => Self(AppError::Internal(e)),
            JwtError::DecodingError(_) | JwtError::Invalid => {
                Self(AppError::Unauthorized("Invalid or malformed token".to_string()))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            Json(json!({
                "error": self.0.error_code().to_lowercase(),
                "message": self.0.public_message(),
            })),
        )
            .into_response()
    }
}

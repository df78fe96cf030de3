//! Authentication routes for login, token refresh and logout.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderName, StatusCode, header::USER_AGENT},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, page_path, view::View};
use finboard_core::auth::verify_password;
use finboard_db::{
    CompanyRepository, GroupRepository, SessionRepository, UserRepository, entities::users,
    repositories::NewSession,
};
use finboard_shared::{
    AppError, TokenPair,
    auth::{LoginRequest, LoginResponse, LogoutRequest, RefreshRequest, TokenKind, UserInfo},
};

/// Shown when a login field is empty.
pub const EMPTY_CREDENTIALS: &str = "Wrong login or password.";
/// Shown for an unknown username or a wrong password.
pub const UNKNOWN_USER: &str = "No user exists with that username.";

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

fn login_view(login: &str, error: Option<&str>) -> View<serde_json::Value> {
    View::new(
        "login.html",
        json!({
            "form": { "login": login },
            "error": error,
        }),
    )
}

/// Main dashboard of a company.
pub(crate) fn dashboard_path(company_id: Uuid) -> String {
    page_path(&format!("/companies/{company_id}/dashboard"))
}

/// Issues a token pair, records the session and builds the login response.
pub(crate) async fn start_session(
    state: &AppState,
    user: users::Model,
    company_id: Uuid,
    headers: &HeaderMap,
) -> Result<LoginResponse, ApiError> {
    let access_token = state.jwt_service.generate_access_token(user.id, company_id)?;
    let (refresh_token, expires_at) = state
        .jwt_service
        .generate_refresh_token(user.id, company_id)?;

    SessionRepository::new((*state.db).clone())
        .create(NewSession {
            user_id: user.id,
            company_id,
            refresh_token: &refresh_token,
            expires_at,
            user_agent: header_str(headers, USER_AGENT),
            ip_address: forwarded_for(headers),
        })
        .await?;

    let groups = GroupRepository::new((*state.db).clone())
        .group_names(user.id)
        .await?;

    Ok(LoginResponse {
        user: UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            company_id,
            groups,
        },
        tokens: TokenPair::new(
            access_token,
            refresh_token,
            state.jwt_service.access_token_expires_in(),
        ),
        redirect_to: dashboard_path(company_id),
    })
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// First address in `X-Forwarded-For`, as set by the reverse proxy.
fn forwarded_for(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, HeaderName::from_static("x-forwarded-for"))
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// GET /auth/login - Empty login form.
async fn login_page() -> View<serde_json::Value> {
    login_view("", None)
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if !payload.is_complete() {
        return Ok(login_view(&payload.login, Some(EMPTY_CREDENTIALS))
            .with_status(StatusCode::BAD_REQUEST)
            .into_response());
    }

    let user_repo = UserRepository::new((*state.db).clone());

    let Some(user) = user_repo.find_by_username(payload.login.trim()).await? else {
        info!(login = %payload.login, "Login attempt for non-existent user");
        return Ok(login_view(&payload.login, Some(UNKNOWN_USER))
            .with_status(StatusCode::UNAUTHORIZED)
            .into_response());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Ok(login_view(&payload.login, Some(UNKNOWN_USER))
            .with_status(StatusCode::UNAUTHORIZED)
            .into_response());
    }

    if !user.is_active {
        return Ok(login_view(&payload.login, Some("This account has been disabled."))
            .with_status(StatusCode::UNAUTHORIZED)
            .into_response());
    }

    let Some(company_id) = CompanyRepository::new((*state.db).clone())
        .company_of(user.id)
        .await?
    else {
        return Err(AppError::Forbidden("User is not a member of any company.".to_string()).into());
    };

    let user_id = user.id;
    let response = start_session(&state, user, company_id, &headers).await?;

    info!(%user_id, %company_id, "User logged in successfully");

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// POST /auth/refresh - Exchange a live refresh token for an access token.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Response, ApiError> {
    let claims = state
        .jwt_service
        .validate_kind(&payload.refresh_token, TokenKind::Refresh)?;

    let session = SessionRepository::new((*state.db).clone())
        .find_by_token(&payload.refresh_token)
        .await?;

    if session.is_none() {
        return Err(ApiError::unauthorized("Session has been revoked"));
    }

    let access_token = state
        .jwt_service
        .generate_access_token(claims.user_id(), claims.company_id())?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "expires_in": state.jwt_service.access_token_expires_in()
        })),
    )
        .into_response())
}

/// POST /auth/logout - Revoke the session owning the refresh token.
async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> Result<Response, ApiError> {
    let revoked = SessionRepository::new((*state.db).clone())
        .revoke_by_token(&payload.refresh_token)
        .await?;

    if revoked {
        info!("Session revoked on logout");
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "revoked": revoked,
            "redirect_to": page_path(""),
        })),
    )
        .into_response())
}

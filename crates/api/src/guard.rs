//! Company access guard.
//!
//! Loads the viewer's membership and groups and runs the access check for a
//! company page.

use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use finboard_core::access::{AccessLevel, Viewer, authorize};
use finboard_db::{CompanyRepository, GroupRepository, entities::companies};
use finboard_shared::types::{CompanyId, UserId};

/// Loads the viewer behind an authenticated request.
///
/// # Errors
///
/// Returns a database error if the membership or group lookup fails.
pub async fn load_viewer(state: &AppState, auth: &AuthUser) -> Result<Viewer, ApiError> {
    let company_id = CompanyRepository::new((*state.db).clone())
        .company_of(auth.user_id())
        .await?;
    let groups = GroupRepository::new((*state.db).clone())
        .group_names(auth.user_id())
        .await?;

    Ok(Viewer {
        user_id: UserId::from_uuid(auth.user_id()),
        company_id: company_id.map(CompanyId::from_uuid),
        groups,
    })
}

/// Checks `level` for the company in the path and returns the company row.
///
/// # Errors
///
/// Returns 403 `Forbidden.` when the check fails, 404 when the company does
/// not exist, or a database error.
pub async fn require(
    state: &AppState,
    auth: &AuthUser,
    level: AccessLevel,
    company_id: Uuid,
) -> Result<companies::Model, ApiError> {
    let viewer = load_viewer(state, auth).await?;

    if authorize(&viewer, level, CompanyId::from_uuid(company_id)).is_err() {
        tracing::info!(
            user_id = %auth.user_id(),
            %company_id,
            ?level,
            "access denied"
        );
        return Err(ApiError::forbidden());
    }

    CompanyRepository::new((*state.db).clone())
        .find_by_id(company_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company"))
}

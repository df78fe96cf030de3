//! Employee onboarding by a company manager.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError, guard, middleware::AuthUser, page_path, view::View};
use finboard_core::access::AccessLevel;
use finboard_core::auth::hash_password;
use finboard_db::repositories::{NewUser, RegistrationError, RegistrationRepository};
use finboard_shared::forms::{EmployeeForm, field_messages};
use finboard_shared::types::RoleGroup;

use super::CompanySummary;
use super::registration::USERNAME_TAKEN;

const TEMPLATE: &str = "employee_registration.html";

#[derive(Debug, Serialize)]
struct EmployeeContext {
    company: CompanySummary,
    form: EmployeeForm,
    groups: [&'static str; 2],
    error: Option<&'static str>,
    errors: BTreeMap<String, Vec<String>>,
}

impl EmployeeContext {
    fn new(company: CompanySummary, form: EmployeeForm) -> Self {
        Self {
            company,
            form,
            groups: RoleGroup::ALL.map(RoleGroup::name),
            error: None,
            errors: BTreeMap::new(),
        }
    }
}

/// Creates the employee routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies/{company_id}/employees/new", get(employee_page))
        .route("/companies/{company_id}/employees", post(register_employee))
}

/// GET /companies/{company_id}/employees/new - Empty employee form.
async fn employee_page(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<Response, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::CompanyManager, company_id).await?;

    Ok(View::new(TEMPLATE, EmployeeContext::new(company.into(), EmployeeForm::default()))
        .into_response())
}

/// POST /companies/{company_id}/employees - Create an employee with the
/// placeholder password.
async fn register_employee(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    auth: AuthUser,
    Json(form): Json<EmployeeForm>,
) -> Result<Response, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::CompanyManager, company_id).await?;

    let role = match (form.validate(), form.role_group()) {
        (Ok(()), Some(role)) => role,
        (result, _) => {
            let mut context = EmployeeContext::new(company.into(), form);
            if let Err(errors) = result {
                context.errors = field_messages(&errors);
            }
            context.error = Some("Please correct the errors below.");
            return Ok(View::new(TEMPLATE, context)
                .with_status(StatusCode::BAD_REQUEST)
                .into_response());
        }
    };

    let password_hash = hash_password(&state.registration.employee_placeholder_password)?;

    let employee = match RegistrationRepository::new((*state.db).clone())
        .register_employee(
            company_id,
            NewUser {
                username: form.username.trim().to_string(),
                email: form.email.trim().to_string(),
                first_name: form.first_name.trim().to_string(),
                last_name: form.last_name.trim().to_string(),
                password_hash,
            },
            role,
        )
        .await
    {
        Ok(user) => user,
        Err(RegistrationError::UsernameTaken) => {
            let mut context = EmployeeContext::new(company.into(), form);
            context.error = Some(USERNAME_TAKEN);
            return Ok(View::new(TEMPLATE, context)
                .with_status(StatusCode::CONFLICT)
                .into_response());
        }
        Err(RegistrationError::CompanyNotFound) => return Err(ApiError::not_found("Company")),
        Err(RegistrationError::Database(e)) => return Err(e.into()),
    };

    info!(
        %company_id,
        employee_id = %employee.id,
        manager_id = %auth.user_id(),
        group = %role,
        "Employee registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": {
                "id": employee.id,
                "username": employee.username,
                "email": employee.email,
                "first_name": employee.first_name,
                "last_name": employee.last_name,
                "group": role.name(),
            },
            "redirect_to": page_path(&format!("/companies/{company_id}/dashboard/manager")),
        })),
    )
        .into_response())
}

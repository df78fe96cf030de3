//! Company + manager registration.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::{AppState, error::ApiError, view::View};
use finboard_core::auth::hash_password;
use finboard_db::repositories::{NewCompany, NewUser, RegistrationError, RegistrationRepository};
use finboard_shared::forms::{CompanyForm, ManagerForm, RegistrationRequest, field_messages};

use super::auth::start_session;

/// Shown when the two password fields differ.
pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
/// Shown when the manager's username is taken.
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

const TEMPLATE: &str = "register.html";

/// Context of the registration page.
#[derive(Debug, Serialize)]
struct RegistrationContext {
    company_form: CompanyForm,
    manager_form: ManagerForm,
    error: Option<&'static str>,
    errors: BTreeMap<&'static str, BTreeMap<String, Vec<String>>>,
}

impl RegistrationContext {
    fn new(company_form: CompanyForm, manager_form: ManagerForm) -> Self {
        Self {
            company_form,
            manager_form,
            error: None,
            errors: BTreeMap::new(),
        }
    }

    fn rejected(mut self, status: StatusCode, error: &'static str) -> Response {
        self.error = Some(error);
        View::new(TEMPLATE, self).with_status(status).into_response()
    }
}

/// Creates the registration router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/register", get(registration_page).post(register))
}

/// GET /register - Empty company and manager forms.
async fn registration_page() -> View<RegistrationContext> {
    View::new(
        TEMPLATE,
        RegistrationContext::new(CompanyForm::default(), ManagerForm::default()),
    )
}

/// POST /register - Create a company with its first manager and log them in.
async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RegistrationRequest>,
) -> Result<Response, ApiError> {
    let RegistrationRequest { company, manager } = payload;
    let mut context = RegistrationContext::new(company.clone(), manager.clone());

    if let Err(errors) = company.validate() {
        context.errors.insert("company", field_messages(&errors));
    }
    if let Err(errors) = manager.validate() {
        context.errors.insert("manager", field_messages(&errors));
    }
    if !context.errors.is_empty() {
        return Ok(context.rejected(StatusCode::BAD_REQUEST, "Please correct the errors below."));
    }

    if !manager.passwords_match() {
        return Ok(context.rejected(StatusCode::BAD_REQUEST, PASSWORD_MISMATCH));
    }

    let password_hash = hash_password(&manager.password)?;

    let registered = match RegistrationRepository::new((*state.db).clone())
        .register_company(
            NewCompany {
                name: company.name.trim().to_string(),
                tax_id: company.tax_id.filter(|t| !t.trim().is_empty()),
                base_currency: company.base_currency.trim().to_uppercase(),
            },
            NewUser {
                username: manager.username.trim().to_string(),
                email: manager.email.trim().to_string(),
                first_name: manager.first_name.trim().to_string(),
                last_name: manager.last_name.trim().to_string(),
                password_hash,
            },
        )
        .await
    {
        Ok(r) => r,
        Err(RegistrationError::UsernameTaken) => {
            return Ok(context.rejected(StatusCode::CONFLICT, USERNAME_TAKEN));
        }
        Err(RegistrationError::CompanyNotFound) => return Err(ApiError::not_found("Company")),
        Err(RegistrationError::Database(e)) => return Err(e.into()),
    };

    info!(
        company_id = %registered.company.id,
        user_id = %registered.manager.id,
        "Company registered"
    );

    let company_id = registered.company.id;
    let response = start_session(&state, registered.manager, company_id, &headers).await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

//! Dashboard routes.
//!
//! The main and manager dashboards and the modification page need only a
//! session. The income statement and cash flow pages need a manager of the
//! company in the path.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError, guard, middleware::AuthUser, view::View};
use finboard_core::access::AccessLevel;
use finboard_core::dashboard::{
    CashFlowStatement, IncomeStatement, MainDashboard, ManagerDashboard,
};
use finboard_db::FinanceRepository;

use super::CompanySummary;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies/{company_id}/dashboard", get(main_dashboard))
        .route(
            "/companies/{company_id}/dashboard/manager",
            get(manager_dashboard),
        )
        .route(
            "/companies/{company_id}/income-statement",
            get(income_statement),
        )
        .route("/companies/{company_id}/cash-flow", get(cash_flow))
        .route("/companies/{company_id}/modification", get(modification))
}

/// A company page: the company header plus the page's own figures.
#[derive(Debug, Serialize)]
pub struct CompanyPage<T> {
    /// Company header.
    pub company: CompanySummary,
    /// Page figures, flattened into the context.
    #[serde(flatten)]
    pub data: T,
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// GET /companies/{company_id}/dashboard
#[axum::debug_handler]
async fn main_dashboard(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<View<CompanyPage<MainDashboard>>, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::Authenticated, company_id).await?;

    let data = FinanceRepository::new((*state.db).clone())
        .main_dashboard(company_id, today())
        .await?;

    Ok(View::new(
        "dashboard.html",
        CompanyPage {
            company: company.into(),
            data,
        },
    ))
}

/// GET /companies/{company_id}/dashboard/manager
#[axum::debug_handler]
async fn manager_dashboard(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<View<CompanyPage<ManagerDashboard>>, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::Authenticated, company_id).await?;

    let data = FinanceRepository::new((*state.db).clone())
        .manager_dashboard(company_id, today())
        .await?;

    Ok(View::new(
        "manager_dashboard.html",
        CompanyPage {
            company: company.into(),
            data,
        },
    ))
}

/// GET /companies/{company_id}/income-statement
#[axum::debug_handler]
async fn income_statement(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<View<CompanyPage<IncomeStatement>>, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::CompanyManager, company_id).await?;

    let data = FinanceRepository::new((*state.db).clone())
        .income_statement(company_id, today())
        .await?;

    Ok(View::new(
        "income_statement.html",
        CompanyPage {
            company: company.into(),
            data,
        },
    ))
}

/// GET /companies/{company_id}/cash-flow
#[axum::debug_handler]
async fn cash_flow(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<View<CompanyPage<CashFlowStatement>>, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::CompanyManager, company_id).await?;

    let data = FinanceRepository::new((*state.db).clone())
        .cash_flow(company_id, today())
        .await?;

    Ok(View::new(
        "cash_flow.html",
        CompanyPage {
            company: company.into(),
            data,
        },
    ))
}

/// GET /companies/{company_id}/modification
async fn modification(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<View<CompanyPage<serde_json::Value>>, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::Authenticated, company_id).await?;

    Ok(View::new(
        "modification_dashboard.html",
        CompanyPage {
            company: company.into(),
            data: serde_json::json!({}),
        },
    ))
}

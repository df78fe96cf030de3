//! Revenue and expense pages: paginated lists and the add-record forms.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError, guard, middleware::AuthUser, page_path, view::View};
use finboard_core::access::AccessLevel;
use finboard_db::FinanceRepository;
use finboard_db::entities::{expenses, revenues};
use finboard_db::repositories::{NewExpense, NewRevenue};
use finboard_shared::forms::{ExpenseForm, RevenueForm, field_messages};
use finboard_shared::types::{PageRequest, PageResponse};

use super::CompanySummary;

const REVENUES_TEMPLATE: &str = "revenues.html";
const EXPENSES_TEMPLATE: &str = "expenses.html";
const INVALID_FORM: &str = "Please correct the errors below.";

/// Creates the record routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/revenues",
            get(list_revenues).post(create_revenue),
        )
        .route(
            "/companies/{company_id}/expenses",
            get(list_expenses).post(create_expense),
        )
}

#[derive(Debug, Serialize)]
struct ListContext<R, F> {
    company: CompanySummary,
    records: PageResponse<R>,
    form: F,
}

#[derive(Debug, Serialize)]
struct FormContext<F> {
    company: CompanySummary,
    form: F,
    error: &'static str,
    errors: BTreeMap<String, Vec<String>>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Revenues
// ============================================================================

/// GET /companies/{company_id}/revenues
async fn list_revenues(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(page): Query<PageRequest>,
    auth: AuthUser,
) -> Result<Response, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::Authenticated, company_id).await?;
    let page = page.normalized();

    let (rows, total) = FinanceRepository::new((*state.db).clone())
        .list_revenues(company_id, &page)
        .await?;

    Ok(View::new(
        REVENUES_TEMPLATE,
        ListContext::<revenues::Model, _> {
            company: company.into(),
            records: PageResponse::new(rows, page.page, page.per_page, total),
            form: RevenueForm::default(),
        },
    )
    .into_response())
}

/// POST /companies/{company_id}/revenues
async fn create_revenue(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    auth: AuthUser,
    Json(form): Json<RevenueForm>,
) -> Result<Response, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::CompanyMember, company_id).await?;

    let document_date = match (form.validate(), form.document_date) {
        (Ok(()), Some(date)) => date,
        (result, _) => {
            let errors = result.err().map(|e| field_messages(&e)).unwrap_or_default();
            return Ok(View::new(
                REVENUES_TEMPLATE,
                FormContext {
                    company: company.into(),
                    form,
                    error: INVALID_FORM,
                    errors,
                },
            )
            .with_status(StatusCode::BAD_REQUEST)
            .into_response());
        }
    };

    let revenue = FinanceRepository::new((*state.db).clone())
        .create_revenue(
            company_id,
            NewRevenue {
                document_number: form.document_number.trim().to_string(),
                customer: trimmed(form.customer),
                document_date,
                expected_payment_date: form.expected_payment_date,
                currency: form.currency.trim().to_uppercase(),
                net_amount: form.net_amount,
                net_amount_converted: form.net_amount_converted,
                settlement_status: form.settlement_status,
            },
        )
        .await?;

    info!(%company_id, revenue_id = %revenue.id, user_id = %auth.user_id(), "Revenue added");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "revenue": revenue,
            "redirect_to": page_path(&format!("/companies/{company_id}/revenues")),
        })),
    )
        .into_response())
}

// ============================================================================
// Expenses
// ============================================================================

/// GET /companies/{company_id}/expenses
async fn list_expenses(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(page): Query<PageRequest>,
    auth: AuthUser,
) -> Result<Response, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::Authenticated, company_id).await?;
    let page = page.normalized();

    let (rows, total) = FinanceRepository::new((*state.db).clone())
        .list_expenses(company_id, &page)
        .await?;

    Ok(View::new(
        EXPENSES_TEMPLATE,
        ListContext::<expenses::Model, _> {
            company: company.into(),
            records: PageResponse::new(rows, page.page, page.per_page, total),
            form: ExpenseForm::default(),
        },
    )
    .into_response())
}

/// POST /companies/{company_id}/expenses
async fn create_expense(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    auth: AuthUser,
    Json(form): Json<ExpenseForm>,
) -> Result<Response, ApiError> {
    let company = guard::require(&state, &auth, AccessLevel::CompanyMember, company_id).await?;

    let document_date = match (form.validate(), form.document_date) {
        (Ok(()), Some(date)) => date,
        (result, _) => {
            let errors = result.err().map(|e| field_messages(&e)).unwrap_or_default();
            return Ok(View::new(
                EXPENSES_TEMPLATE,
                FormContext {
                    company: company.into(),
                    form,
                    error: INVALID_FORM,
                    errors,
                },
            )
            .with_status(StatusCode::BAD_REQUEST)
            .into_response());
        }
    };

    let expense = FinanceRepository::new((*state.db).clone())
        .create_expense(
            company_id,
            NewExpense {
                document_number: form.document_number.trim().to_string(),
                vendor: trimmed(form.vendor),
                category: trimmed(form.category),
                document_date,
                expected_payment_date: form.expected_payment_date,
                net_amount: form.net_amount,
                settlement_status: form.settlement_status,
            },
        )
        .await?;

    info!(%company_id, expense_id = %expense.id, user_id = %auth.user_id(), "Expense added");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "expense": expense,
            "redirect_to": page_path(&format!("/companies/{company_id}/expenses")),
        })),
    )
        .into_response())
}

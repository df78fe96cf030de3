//! HTTP tests for the revenue and expense pages.

mod common;

use axum::http::StatusCode;
use common::{TestApp, decimal};
use rust_decimal_macros::dec;
use serde_json::{Value, json};

fn revenue(number: &str, date: &str) -> Value {
    json!({
        "document_number": number,
        "customer": "  Initech  ",
        "document_date": date,
        "expected_payment_date": date,
        "currency": "eur",
        "net_amount": "100.25",
        "net_amount_converted": "430.75",
        "settlement_status": false,
    })
}

#[tokio::test]
async fn test_add_revenue_then_list_it() {
    let app = TestApp::spawn().await;
    let acme = app.register("Acme", "alice").await;
    let uri = format!("/api/v1/companies/{}/revenues", acme.company_id);

    let (status, body) = app
        .post(&uri, &revenue("FV/1/2026", "2026-03-01"), Some(&acme.access_token))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["revenue"]["customer"], "Initech");
    assert_eq!(body["revenue"]["currency"], "EUR");
    assert_eq!(body["redirect_to"], uri);

    let (status, page) = app.get(&uri, Some(&acme.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["template"], "revenues.html");
    let records = &page["context"]["records"];
    assert_eq!(records["meta"]["total"], 1);
    assert_eq!(records["data"][0]["document_number"], "FV/1/2026");
    assert_eq!(decimal(&records["data"][0]["net_amount_converted"]), dec!(430.75));
    assert_eq!(page["context"]["form"]["document_number"], "");
}

#[tokio::test]
async fn test_add_expense_then_list_it() {
    let app = TestApp::spawn().await;
    let acme = app.register("Acme", "alice").await;
    let uri = format!("/api/v1/companies/{}/expenses", acme.company_id);

    let (status, body) = app
        .post(
            &uri,
            &json!({
                "document_number": "R/7",
                "vendor": "Office Supplies Ltd",
                "category": "",
                "document_date": "2026-02-10",
                "net_amount": "99.75",
            }),
            Some(&acme.access_token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["expense"]["category"].is_null());
    assert_eq!(body["expense"]["settlement_status"], false);

    let (status, page) = app.get(&uri, Some(&acme.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["template"], "expenses.html");
    assert_eq!(decimal(&page["context"]["records"]["data"][0]["net_amount"]), dec!(99.75));
}

#[tokio::test]
async fn test_invalid_revenue_re_renders_form() {
    let app = TestApp::spawn().await;
    let acme = app.register("Acme", "alice").await;
    let uri = format!("/api/v1/companies/{}/revenues", acme.company_id);

    let mut body = revenue("FV/2", "2026-03-01");
    body["net_amount"] = json!("-5");
    body["document_date"] = Value::Null;

    let (status, page) = app.post(&uri, &body, Some(&acme.access_token)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(page["template"], "revenues.html");
    assert_eq!(page["context"]["form"]["document_number"], "FV/2");
    let errors = &page["context"]["errors"];
    assert_eq!(errors["net_amount"], json!(["Amount cannot be negative."]));
    assert_eq!(errors["document_date"], json!(["Document date is required."]));

    let (_, page) = app.get(&uri, Some(&acme.access_token)).await;
    assert_eq!(page["context"]["records"]["meta"]["total"], 0);
}

#[tokio::test]
async fn test_invalid_expense_is_rejected() {
    let app = TestApp::spawn().await;
    let acme = app.register("Acme", "alice").await;

    let (status, page) = app
        .post(
            &format!("/api/v1/companies/{}/expenses", acme.company_id),
            &json!({ "document_date": "2026-02-10", "net_amount": "10" }),
            Some(&acme.access_token),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        page["context"]["errors"]["document_number"],
        json!(["Document number is required."])
    );
}

#[tokio::test]
async fn test_outsider_cannot_add_records() {
    let app = TestApp::spawn().await;
    let acme = app.register("Acme", "alice").await;
    let globex = app.register("Globex", "bob").await;

    let (status, body) = app
        .post(
            &format!("/api/v1/companies/{}/revenues", acme.company_id),
            &revenue("FV/3", "2026-03-01"),
            Some(&globex.access_token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden.");

    let (status, _) = app
        .post(
            &format!("/api/v1/companies/{}/expenses", acme.company_id),
            &json!({ "document_number": "R/1", "document_date": "2026-02-10", "net_amount": "1" }),
            Some(&globex.access_token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_employee_can_add_records() {
    let app = TestApp::spawn().await;
    let acme = app.register("Acme", "alice").await;
    let employee = app.employee(&acme, "eve", "Employees").await;

    let (status, _) = app
        .post(
            &format!("/api/v1/companies/{}/revenues", acme.company_id),
            &revenue("FV/4", "2026-03-01"),
            Some(&employee),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_revenue_list_is_paginated_oldest_document_first() {
    let app = TestApp::spawn().await;
    let acme = app.register("Acme", "alice").await;
    let uri = format!("/api/v1/companies/{}/revenues", acme.company_id);

    for (number, date) in [
        ("FV/2", "2026-02-05"),
        ("FV/3", "2026-03-05"),
        ("FV/1", "2026-01-05"),
    ] {
        let (status, _) = app
            .post(&uri, &revenue(number, date), Some(&acme.access_token))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = app
        .get(&format!("{uri}?page=1&per_page=2"), Some(&acme.access_token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let records = &page["context"]["records"];
    assert_eq!(records["meta"]["total"], 3);
    assert_eq!(records["meta"]["total_pages"], 2);
    assert_eq!(records["data"][0]["document_number"], "FV/1");
    assert_eq!(records["data"][1]["document_number"], "FV/2");

    let (_, page) = app
        .get(&format!("{uri}?page=2&per_page=2"), Some(&acme.access_token))
        .await;
    let data = page["context"]["records"]["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["document_number"], "FV/3");
}

#[tokio::test]
async fn test_records_are_scoped_to_company() {
    let app = TestApp::spawn().await;
    let acme = app.register("Acme", "alice").await;
    let globex = app.register("Globex", "bob").await;

    let (status, _) = app
        .post(
            &format!("/api/v1/companies/{}/revenues", globex.company_id),
            &revenue("GX/1", "2026-03-01"),
            Some(&globex.access_token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, page) = app
        .get(
            &format!("/api/v1/companies/{}/revenues", acme.company_id),
            Some(&acme.access_token),
        )
        .await;
    assert_eq!(page["context"]["records"]["meta"]["total"], 0);
}

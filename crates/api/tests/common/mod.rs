//! Test harness: the full router over an in-memory SQLite database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;

use finboard_api::{AppState, create_router};
use finboard_db::migration::{Migrator, MigratorTrait};
use finboard_shared::config::RegistrationConfig;
use finboard_shared::{JwtConfig, JwtService};

pub const PASSWORD: &str = "correct-horse-battery";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

/// A registered company with its manager's tokens.
pub struct Registered {
    pub company_id: String,
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options)
            .await
            .expect("Failed to open in-memory database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let state = AppState {
            db: Arc::new(db.clone()),
            jwt_service: Arc::new(JwtService::new(JwtConfig {
                secret: "test-secret-key-for-testing".to_string(),
                ..JwtConfig::default()
            })),
            registration: Arc::new(RegistrationConfig::default()),
        };

        Self {
            router: create_router(state),
            db,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router should respond");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Body should be readable")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Body should be JSON")
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).expect("valid request"))
            .await
    }

    pub async fn post(&self, uri: &str, body: &Value, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(
            builder
                .body(Body::from(body.to_string()))
                .expect("valid request"),
        )
        .await
    }

    /// Registers a company and returns the manager's session.
    pub async fn register(&self, company: &str, username: &str) -> Registered {
        let (status, body) = self
            .post("/api/v1/register", &registration_body(company, username), None)
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");

        Registered {
            company_id: body["user"]["company_id"]
                .as_str()
                .expect("company id")
                .to_string(),
            user_id: body["user"]["id"].as_str().expect("user id").to_string(),
            access_token: body["access_token"]
                .as_str()
                .expect("access token")
                .to_string(),
            refresh_token: body["refresh_token"]
                .as_str()
                .expect("refresh token")
                .to_string(),
        }
    }

    /// Logs in and returns the full response.
    pub async fn login(&self, login: &str, password: &str) -> (StatusCode, Value) {
        self.post(
            "/api/v1/auth/login",
            &json!({ "login": login, "password": password }),
            None,
        )
        .await
    }

    /// Onboards an employee through the manager and returns their access token.
    pub async fn employee(&self, manager: &Registered, username: &str, group: &str) -> String {
        let (status, body) = self
            .post(
                &format!("/api/v1/companies/{}/employees", manager.company_id),
                &json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "first_name": "Eve",
                    "last_name": "Employee",
                    "group": group,
                }),
                Some(&manager.access_token),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "employee registration failed: {body}");

        let (status, body) = self.login(username, "temporary").await;
        assert_eq!(status, StatusCode::OK, "employee login failed: {body}");
        body["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }
}

pub fn registration_body(company: &str, username: &str) -> Value {
    json!({
        "company": {
            "name": company,
            "tax_id": "PL5260250274",
            "base_currency": "PLN",
        },
        "manager": {
            "username": username,
            "email": format!("{username}@example.com"),
            "first_name": "Alice",
            "last_name": "Manager",
            "password": PASSWORD,
            "password_repeated": PASSWORD,
        },
    })
}

/// Reads a decimal serialized as a string.
pub fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("decimal should serialize as a string")
        .parse()
        .expect("valid decimal")
}

//! Common test utilities: SQLite-backed module, router and fixtures

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use entitlement_service::{Config, EntitlementServiceModule, EntitlementStatus, NewEntitlement};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use tower::ServiceExt;

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {test_name}");
    println!("📋 PURPOSE: {purpose}");
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

/// Fresh in-memory SQLite database with the migrator applied.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn sqlite_db() -> Arc<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opts).await.expect("connect sqlite");
    EntitlementServiceModule::default()
        .migrate(&db)
        .await
        .expect("run migrations");
    Arc::new(db)
}

/// Initialized module over a fresh SQLite database
pub async fn sqlite_module(config: Config) -> (EntitlementServiceModule, Arc<DatabaseConnection>) {
    let db = sqlite_db().await;
    let module = EntitlementServiceModule::new(config);
    module.init(db.clone()).expect("init module");
    (module, db)
}

/// Full REST router over a fresh SQLite database
pub async fn test_router(config: Config) -> (Router, EntitlementServiceModule) {
    let (module, _db) = sqlite_module(config).await;
    let router = module.register_rest(Router::new()).expect("register routes");
    (router, module)
}

pub fn entitlement(sku: &str, status: EntitlementStatus) -> NewEntitlement {
    NewEntitlement {
        sku: Some(sku.to_string()),
        status,
        ..Default::default()
    }
}

/// Send a request and decode the JSON response body
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

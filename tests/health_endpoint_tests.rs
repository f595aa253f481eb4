//! Integration tests for the service's endpoints.
//!
//! The healthcheck tests double as an example of how to drive the router
//! in-process against an in-memory database. In concrete services, rewrite
//! them to suit your endpoints.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use service_skeleton::db::Database;
use service_skeleton::repository::SqliteHealthCheckRepository;
use service_skeleton::server::{AppState, build_router};
use service_skeleton::service::HealthService;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Helper to build server state over a fresh in-memory database.
fn setup_state() -> (AppState, Database) {
    let db = Database::open_in_memory().expect("failed to create in-memory database");
    let repo = SqliteHealthCheckRepository::new(db.clone());
    let service = HealthService::new(Arc::new(repo));
    (AppState::new(service), db)
}

async fn get_json(
    app: axum::Router,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn health_returns_ok_with_uuid() {
    let (state, _db) = setup_state();
    let app = build_router(state);

    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let id = body["id"].as_str().expect("id must be a string");
    Uuid::parse_str(id).expect("id must be a UUID");
}

#[tokio::test]
async fn health_persists_a_row_per_request() {
    let (state, db) = setup_state();
    let app = build_router(state);

    let (first_status, first) = get_json(app.clone(), "/health").await;
    let (second_status, second) = get_json(app, "/health").await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_ne!(first["id"], second["id"]);

    let count = db
        .with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM healthchecks", [], |row| row.get(0))?;
            Ok(n)
        })
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (state, _db) = setup_state();
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

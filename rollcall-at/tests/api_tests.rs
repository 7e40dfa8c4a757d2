//! Integration tests for the rollcall-at HTTP API
//!
//! Drives the full router with `tower::ServiceExt::oneshot` against a
//! tempfile-backed database. The status mapping (200/400/404/500) is
//! the externally observable contract and is asserted per error kind.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use rollcall_common::db::init_database;
use rollcall_at::db::{attendance, enrollees};
use rollcall_at::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: fresh database with two enrollees
async fn setup_test_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("rollcall.db"))
        .await
        .expect("Should initialize test database");

    for (identity, first, paternal) in [
        ("123456785", "Ana", Some("Rojas")),
        ("111111111", "Berta", Some("Soto")),
    ] {
        let new = enrollees::NewEnrollee {
            identity: identity.to_string(),
            first_name: first.to_string(),
            last_name_paternal: paternal.map(str::to_string),
            ..Default::default()
        };
        enrollees::insert(&pool, &new).await.unwrap();
    }

    (dir, pool)
}

fn setup_app(db: SqlitePool) -> axum::Router {
    build_router(AppState::new(db))
}

/// Test helper: request with a JSON body
fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn guid_of(pool: &SqlitePool, identity: &str) -> String {
    sqlx::query_scalar("SELECT guid FROM enrollees WHERE identity = ?")
        .bind(identity)
        .fetch_one(pool)
        .await
        .unwrap()
}

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app(pool);

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "rollcall-at");
    assert!(body["version"].is_string());
}

// =============================================================================
// Check-in Registration
// =============================================================================

#[tokio::test]
async fn test_register_success_returns_name_date_time() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app(pool.clone());

    let request = json_request(
        "POST",
        "/api/attendance/register",
        json!({"identity": "12.345.678-5"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "Ana Rojas");
    assert!(body["message"].is_string());
    // YYYY-MM-DD and HH:MM:SS of the persisted event
    assert_eq!(body["date"].as_str().unwrap().len(), 10);
    assert_eq!(body["time"].as_str().unwrap().len(), 8);

    let guid = guid_of(&pool, "123456785").await;
    assert_eq!(attendance::count_for_enrollee(&pool, &guid).await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_missing_identity_is_400() {
    let (_dir, pool) = setup_test_db().await;

    for body in [json!({}), json!({"identity": ""}), json!({"identity": null})] {
        let app = setup_app(pool.clone());
        let response = app
            .oneshot(json_request("POST", "/api/attendance/register", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = extract_json(response.into_body()).await;
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_register_invalid_identity_is_400() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app(pool);

    let request = json_request(
        "POST",
        "/api/attendance/register",
        json!({"identity": "12345678-9"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_unknown_identity_is_404_and_writes_nothing() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app(pool.clone());

    // valid check digit, nobody enrolled
    let request = json_request(
        "POST",
        "/api/attendance/register",
        json!({"identity": "7654321-6"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance_events")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(events, 0);
}

// =============================================================================
// Enrollee Listing / Search
// =============================================================================

#[tokio::test]
async fn test_list_all_enrollees() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app(pool);

    let response = app.oneshot(get_request("/api/enrollees")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().any(|e| e["identity"] == "123456785"));
    assert!(list.iter().any(|e| e["first_name"] == "Berta"));
}

#[tokio::test]
async fn test_search_normalizes_the_fragment() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app(pool);

    // punctuation in the query must not defeat the match
    let response = app
        .oneshot(get_request("/api/enrollees?identity=12.345"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["identity"], "123456785");
}

// =============================================================================
// Enrollee Update
// =============================================================================

#[tokio::test]
async fn test_update_applies_typed_field_rules() {
    let (_dir, pool) = setup_test_db().await;
    let guid = guid_of(&pool, "123456785").await;
    let app = setup_app(pool.clone());

    let request = json_request(
        "PUT",
        &format!("/api/enrollees/{}", guid),
        json!({
            "email": "ana@example.com",
            "phone": "",
            "identity": "22.222.222-2",
            "course_date": "2026-09-01",
            "attendance": 7,
            "note": "moved cohorts"
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let row: (Option<String>, Option<String>, String, Option<String>, Option<i64>) =
        sqlx::query_as(
            "SELECT email, phone, identity, course_date, attendance FROM enrollees WHERE guid = ?",
        )
        .bind(&guid)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(row.0.as_deref(), Some("ana@example.com"));
    assert_eq!(row.1, None, "empty string stores NULL");
    assert_eq!(row.2, "222222222", "identity stored normalized");
    assert_eq!(row.3.as_deref(), Some("2026-09-01"));
    assert_eq!(row.4, Some(7));
}

#[tokio::test]
async fn test_update_unparseable_date_stores_null() {
    let (_dir, pool) = setup_test_db().await;
    let guid = guid_of(&pool, "123456785").await;
    let app = setup_app(pool.clone());

    let request = json_request(
        "PUT",
        &format!("/api/enrollees/{}", guid),
        json!({"course_date": "01/09/2026"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let course_date: Option<String> =
        sqlx::query_scalar("SELECT course_date FROM enrollees WHERE guid = ?")
            .bind(&guid)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(course_date, None);
}

#[tokio::test]
async fn test_update_leaves_absent_fields_untouched() {
    let (_dir, pool) = setup_test_db().await;
    let guid = guid_of(&pool, "123456785").await;
    let app = setup_app(pool.clone());

    let request = json_request(
        "PUT",
        &format!("/api/enrollees/{}", guid),
        json!({"note": "only the note"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (first_name, identity): (String, String) =
        sqlx::query_as("SELECT first_name, identity FROM enrollees WHERE guid = ?")
            .bind(&guid)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(first_name, "Ana");
    assert_eq!(identity, "123456785");
}

#[tokio::test]
async fn test_update_unknown_guid_is_404() {
    let (_dir, pool) = setup_test_db().await;
    let app = setup_app(pool);

    let request = json_request(
        "PUT",
        "/api/enrollees/00000000-0000-0000-0000-000000000000",
        json!({"note": "nobody"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_constraint_violation_is_500() {
    let (_dir, pool) = setup_test_db().await;
    let guid = guid_of(&pool, "123456785").await;
    let app = setup_app(pool.clone());

    // blanking a NOT NULL column surfaces as an internal error
    let request = json_request(
        "PUT",
        &format!("/api/enrollees/{}", guid),
        json!({"first_name": ""}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // and the transaction rolled back
    let first_name: String = sqlx::query_scalar("SELECT first_name FROM enrollees WHERE guid = ?")
        .bind(&guid)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(first_name, "Ana");
}

// =============================================================================
// Per-course Summary
// =============================================================================

#[tokio::test]
async fn test_attendance_by_course_groups_unassigned() {
    let (_dir, pool) = setup_test_db().await;
    let guid = guid_of(&pool, "123456785").await;

    // one default-course check-in through the API
    let app = setup_app(pool.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/attendance/register",
            json!({"identity": "12345678-5"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // and one event without a course, straight through the db layer
    let mut conn = pool.acquire().await.unwrap();
    attendance::insert_event(&mut conn, &guid, None, chrono::Utc::now())
        .await
        .unwrap();
    drop(conn);

    let app = setup_app(pool);
    let response = app
        .oneshot(get_request("/api/attendance/by-course"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["Curso por Defecto"], 1);
    assert_eq!(body["Sin Curso Asignado"], 1);
}

//! rollcall-at library - Attendance Tracker service
//!
//! Check-in registration plus the administrative read/update API over
//! the enrollee and attendance tables.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod import;
pub mod registrar;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    Router::new()
        .route("/api/attendance/register", post(api::register_attendance))
        .route("/api/attendance/by-course", get(api::attendance_by_course))
        .route("/api/enrollees", get(api::list_enrollees))
        .route("/api/enrollees/:guid", put(api::update_enrollee))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

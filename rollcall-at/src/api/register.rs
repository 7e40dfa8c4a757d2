//! Check-in registration endpoint

use axum::{extract::State, Json};
use rollcall_common::time;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::registrar;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Raw identity number as typed at the kiosk, punctuation and all
    pub identity: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub name: String,
    pub date: String,
    pub time: String,
}

/// POST /api/attendance/register
///
/// Validates the identity, finds the enrollee, and records the
/// check-in. 400 on missing/invalid identity, 404 when nobody matches,
/// 500 when the write fails.
pub async fn register_attendance(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let record = registrar::register(&state.db, req.identity.as_deref(), time::now()).await?;

    Ok(Json(RegisterResponse {
        message: "Attendance registered".to_string(),
        name: record.name,
        date: record.date,
        time: record.time,
    }))
}

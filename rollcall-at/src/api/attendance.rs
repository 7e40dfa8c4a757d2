//! Attendance summary endpoint

use axum::{extract::State, Json};
use std::collections::BTreeMap;

use crate::api::ApiError;
use crate::db::attendance;
use crate::AppState;

/// GET /api/attendance/by-course
///
/// Check-in totals keyed by course label. Events without a course are
/// grouped under the unassigned-course label.
pub async fn attendance_by_course(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, i64>>, ApiError> {
    let counts = attendance::counts_by_course(&state.db).await?;
    Ok(Json(counts))
}

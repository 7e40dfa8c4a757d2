//! Attendance event queries
//!
//! Events are append-only: one row per successful check-in, never
//! updated or deleted here.

use chrono::{DateTime, Utc};
use rollcall_common::db::models::AttendanceEvent;
use rollcall_common::Result;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Insert one check-in event and return the persisted row.
///
/// Runs on a caller-supplied connection so the registrar can keep the
/// insert and the counter increment in one transaction. `RETURNING`
/// echoes the stored values rather than the caller's arguments.
pub async fn insert_event(
    conn: &mut SqliteConnection,
    enrollee_id: &str,
    course: Option<&str>,
    recorded_at: DateTime<Utc>,
) -> Result<AttendanceEvent> {
    let guid = Uuid::new_v4().to_string();

    let event = sqlx::query_as::<_, AttendanceEvent>(
        r#"
        INSERT INTO attendance_events (guid, enrollee_id, course, recorded_at)
        VALUES (?, ?, ?, ?)
        RETURNING guid, enrollee_id, course, recorded_at
        "#,
    )
    .bind(&guid)
    .bind(enrollee_id)
    .bind(course)
    .bind(recorded_at)
    .fetch_one(&mut *conn)
    .await?;

    Ok(event)
}

/// Label used for events whose course is NULL or empty in the
/// per-course summary
pub const UNASSIGNED_COURSE_LABEL: &str = "Sin Curso Asignado";

/// Check-in totals per course label
pub async fn counts_by_course(db: &SqlitePool) -> Result<BTreeMap<String, i64>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT
            CASE WHEN course IS NULL OR course = '' THEN ? ELSE course END AS label,
            COUNT(*) AS total
        FROM attendance_events
        GROUP BY label
        "#,
    )
    .bind(UNASSIGNED_COURSE_LABEL)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().collect())
}

/// Number of recorded events for one enrollee
pub async fn count_for_enrollee(db: &SqlitePool, enrollee_id: &str) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance_events WHERE enrollee_id = ?")
            .bind(enrollee_id)
            .fetch_one(db)
            .await?;
    Ok(count)
}

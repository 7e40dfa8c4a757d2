//! Check-in registration core
//!
//! Linear path: validate the raw identity, look up the enrollee,
//! then persist the event and the counter bump as one transaction.

use chrono::{DateTime, Utc};
use rollcall_common::{rut, time, Error, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::db::{attendance, enrollees};

/// Course label recorded when a check-in names no course
pub const DEFAULT_COURSE_LABEL: &str = "Curso por Defecto";

/// Outcome of a successful registration, echoing persisted state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    /// Enrollee display name (first name + paternal surname)
    pub name: String,
    /// Event date, `YYYY-MM-DD`
    pub date: String,
    /// Event time, `HH:MM:SS`
    pub time: String,
}

/// Register one check-in for the enrollee matching `raw_identity`.
///
/// Fails with `MissingInput` before touching storage when the identity
/// is absent or blank, with `InvalidIdentity` on a structural or
/// check-digit failure, and with `NotFound` when no enrollee carries
/// the normalized identity. The event insert and the counter increment
/// commit together or not at all: any storage failure drops the
/// transaction, which rolls back both writes.
pub async fn register(
    db: &SqlitePool,
    raw_identity: Option<&str>,
    now: DateTime<Utc>,
) -> Result<RegistrationRecord> {
    let raw = match raw_identity {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(Error::MissingInput),
    };

    if !rut::validate(raw) {
        return Err(Error::InvalidIdentity);
    }
    let identity = rut::normalize(raw);

    let enrollee = enrollees::find_by_identity(db, &identity)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No enrollee with identity {}", identity)))?;

    let mut tx = db.begin().await?;
    let event =
        attendance::insert_event(&mut *tx, &enrollee.guid, Some(DEFAULT_COURSE_LABEL), now).await?;
    enrollees::increment_attendance(&mut *tx, &enrollee.guid).await?;
    tx.commit().await?;

    info!("Registered attendance for {} ({})", enrollee.display_name(), identity);

    Ok(RegistrationRecord {
        name: enrollee.display_name(),
        date: time::format_date(event.recorded_at),
        time: time::format_time(event.recorded_at),
    })
}

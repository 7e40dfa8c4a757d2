//! One-time enrollee seeding from a CSV export
//!
//! Populates the enrollees table before normal operation begins. Rows
//! whose normalized identity already exists are skipped, so rerunning
//! the job against the same file is harmless.

use rollcall_common::{rut, time, Error, Result};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::db::enrollees::{self, NewEnrollee};

/// Expected CSV header: `identity, document_type, first_name,
/// last_name_paternal, last_name_maternal, email, phone, product,
/// company_identity, attendance, note, course_date, request_ref,
/// operation_number`
#[derive(Debug, serde::Deserialize)]
struct SeedRow {
    identity: String,
    #[serde(default)]
    document_type: Option<String>,
    first_name: String,
    #[serde(default)]
    last_name_paternal: Option<String>,
    #[serde(default)]
    last_name_maternal: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    product: Option<String>,
    #[serde(default)]
    company_identity: Option<String>,
    #[serde(default)]
    attendance: Option<i64>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    course_date: Option<String>,
    #[serde(default)]
    request_ref: Option<String>,
    #[serde(default)]
    operation_number: Option<String>,
}

/// Seeding outcome counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Seed enrollees from a headered CSV file.
///
/// Skips rows with a blank identity and rows whose normalized identity
/// is already present. Unparseable course dates store NULL, matching
/// the update endpoint.
pub async fn seed_from_csv(db: &SqlitePool, path: &Path) -> Result<ImportSummary> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::Import(format!("cannot open {}: {}", path.display(), e)))?;

    let mut summary = ImportSummary::default();

    for row in reader.deserialize::<SeedRow>() {
        let row = row.map_err(|e| Error::Import(format!("bad row in {}: {}", path.display(), e)))?;

        let identity = rut::normalize(&row.identity);
        if identity.is_empty() {
            warn!("Skipping seed row with blank identity (first_name: {})", row.first_name);
            summary.skipped += 1;
            continue;
        }

        if enrollees::find_by_identity(db, &identity).await?.is_some() {
            debug!("Enrollee {} already present, skipping", identity);
            summary.skipped += 1;
            continue;
        }

        let new = NewEnrollee {
            document_type: blank_to_none(row.document_type),
            identity,
            first_name: row.first_name,
            last_name_paternal: blank_to_none(row.last_name_paternal),
            last_name_maternal: blank_to_none(row.last_name_maternal),
            email: blank_to_none(row.email),
            phone: blank_to_none(row.phone),
            product: blank_to_none(row.product),
            company_identity: blank_to_none(row.company_identity),
            attendance: row.attendance.unwrap_or(0),
            note: blank_to_none(row.note),
            course_date: row.course_date.as_deref().and_then(time::parse_date),
            request_ref: blank_to_none(row.request_ref),
            operation_number: blank_to_none(row.operation_number),
        };
        enrollees::insert(db, &new).await?;
        summary.inserted += 1;
    }

    info!(
        "Enrollee seeding done: {} inserted, {} skipped",
        summary.inserted, summary.skipped
    );
    Ok(summary)
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

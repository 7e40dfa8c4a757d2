//! Database initialization
//!
//! Creates the schema on first run and is safe to call again on every
//! startup (all statements are idempotent).

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while one writer commits
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Wait for the write lock instead of failing fast under contention
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_enrollees_table(&pool).await?;
    create_attendance_events_table(&pool).await?;

    Ok(pool)
}

/// Create the enrollees table
///
/// One row per student. `identity` holds the normalized national
/// identity number (punctuation stripped, uppercased) and is the
/// unique lookup key for check-ins. `attendance` is a running total
/// mutated only by the registrar; it stays nullable so a NULL written
/// through the admin update endpoint is read back as zero.
pub async fn create_enrollees_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS enrollees (
            guid TEXT PRIMARY KEY,
            document_type TEXT,
            identity TEXT NOT NULL UNIQUE,
            first_name TEXT NOT NULL,
            last_name_paternal TEXT,
            last_name_maternal TEXT,
            email TEXT,
            phone TEXT,
            product TEXT,
            company_identity TEXT,
            attendance INTEGER DEFAULT 0,
            note TEXT,
            course_date TIMESTAMP,
            request_ref TEXT,
            operation_number TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (attendance IS NULL OR attendance >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_enrollees_identity ON enrollees(identity)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the attendance_events table
///
/// One row per check-in. `enrollee_id` is a logical reference only;
/// the original design carries no enforced foreign key and deleting
/// enrollees is outside this system's lifecycle.
pub async fn create_attendance_events_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_events (
            guid TEXT PRIMARY KEY,
            enrollee_id TEXT NOT NULL,
            course TEXT,
            recorded_at TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_attendance_events_enrollee ON attendance_events(enrollee_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_attendance_events_course ON attendance_events(course)")
        .execute(pool)
        .await?;

    Ok(())
}

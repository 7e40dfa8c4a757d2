//! Enrollee queries
//!
//! All lookups go through the normalized identity; callers normalize
//! before reaching this module.

use rollcall_common::db::models::Enrollee;
use rollcall_common::{rut, time, Result};
use serde::Deserialize;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

const ENROLLEE_COLUMNS: &str = "guid, document_type, identity, first_name, \
     last_name_paternal, last_name_maternal, email, phone, product, \
     company_identity, attendance, note, course_date, request_ref, operation_number";

/// Exact-match lookup by normalized identity
pub async fn find_by_identity(db: &SqlitePool, identity: &str) -> Result<Option<Enrollee>> {
    let enrollee = sqlx::query_as::<_, Enrollee>(&format!(
        "SELECT {ENROLLEE_COLUMNS} FROM enrollees WHERE identity = ?"
    ))
    .bind(identity)
    .fetch_optional(db)
    .await?;

    Ok(enrollee)
}

/// List enrollees, optionally filtered by an identity substring
pub async fn list(db: &SqlitePool, identity_fragment: Option<&str>) -> Result<Vec<Enrollee>> {
    let enrollees = match identity_fragment {
        Some(fragment) => {
            sqlx::query_as::<_, Enrollee>(&format!(
                "SELECT {ENROLLEE_COLUMNS} FROM enrollees WHERE identity LIKE ? ORDER BY identity"
            ))
            .bind(format!("%{}%", fragment))
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, Enrollee>(&format!(
                "SELECT {ENROLLEE_COLUMNS} FROM enrollees ORDER BY identity"
            ))
            .fetch_all(db)
            .await?
        }
    };

    Ok(enrollees)
}

/// A new enrollee row, as produced by the seeding job
#[derive(Debug, Clone, Default)]
pub struct NewEnrollee {
    pub document_type: Option<String>,
    /// Already-normalized identity
    pub identity: String,
    pub first_name: String,
    pub last_name_paternal: Option<String>,
    pub last_name_maternal: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub product: Option<String>,
    pub company_identity: Option<String>,
    pub attendance: i64,
    pub note: Option<String>,
    pub course_date: Option<chrono::NaiveDate>,
    pub request_ref: Option<String>,
    pub operation_number: Option<String>,
}

/// Insert a new enrollee, returning its generated guid
pub async fn insert(db: &SqlitePool, new: &NewEnrollee) -> Result<String> {
    let guid = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO enrollees (
            guid, document_type, identity, first_name, last_name_paternal,
            last_name_maternal, email, phone, product, company_identity,
            attendance, note, course_date, request_ref, operation_number
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&guid)
    .bind(&new.document_type)
    .bind(&new.identity)
    .bind(&new.first_name)
    .bind(&new.last_name_paternal)
    .bind(&new.last_name_maternal)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.product)
    .bind(&new.company_identity)
    .bind(new.attendance)
    .bind(&new.note)
    .bind(new.course_date)
    .bind(&new.request_ref)
    .bind(&new.operation_number)
    .execute(db)
    .await?;

    Ok(guid)
}

/// Bump the attendance counter by one.
///
/// Single SQL expression, so two concurrent check-ins for the same
/// enrollee cannot both read a stale value and lose an update. A NULL
/// counter counts as zero.
pub async fn increment_attendance(conn: &mut SqliteConnection, guid: &str) -> Result<()> {
    sqlx::query(
        "UPDATE enrollees SET attendance = COALESCE(attendance, 0) + 1, \
         updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(guid)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Partial update of one enrollee from the administrative view.
///
/// The field set is a fixed whitelist; each provided field is applied
/// with its own typed rule and absent fields are left untouched:
/// - `identity` is normalized before storage
/// - `course_date` parses `YYYY-MM-DD`, anything else stores NULL
/// - `attendance` is stored as given (the CHECK constraint rejects
///   negatives)
/// - every other field stores NULL when the provided string is empty
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEnrollee {
    pub document_type: Option<String>,
    pub identity: Option<String>,
    pub first_name: Option<String>,
    pub last_name_paternal: Option<String>,
    pub last_name_maternal: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub product: Option<String>,
    pub company_identity: Option<String>,
    pub attendance: Option<i64>,
    pub note: Option<String>,
    pub course_date: Option<String>,
    pub request_ref: Option<String>,
    pub operation_number: Option<String>,
}

/// Apply a partial update. Returns `false` when no such enrollee exists.
pub async fn update(db: &SqlitePool, guid: &str, update: &UpdateEnrollee) -> Result<bool> {
    let mut tx = db.begin().await?;

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM enrollees WHERE guid = ?)")
        .bind(guid)
        .fetch_one(&mut *tx)
        .await?;
    if !exists {
        return Ok(false);
    }

    if let Some(raw) = update.identity.as_deref() {
        // normalized before storage; an empty value becomes NULL and
        // the NOT NULL constraint rejects it
        set_text(&mut tx, guid, "identity", &rut::normalize(raw)).await?;
    }

    if let Some(raw) = update.course_date.as_deref() {
        sqlx::query("UPDATE enrollees SET course_date = ? WHERE guid = ?")
            .bind(time::parse_date(raw))
            .bind(guid)
            .execute(&mut *tx)
            .await?;
    }

    if let Some(count) = update.attendance {
        sqlx::query("UPDATE enrollees SET attendance = ? WHERE guid = ?")
            .bind(count)
            .bind(guid)
            .execute(&mut *tx)
            .await?;
    }

    let text_fields: [(&str, Option<&str>); 11] = [
        ("document_type", update.document_type.as_deref()),
        ("first_name", update.first_name.as_deref()),
        ("last_name_paternal", update.last_name_paternal.as_deref()),
        ("last_name_maternal", update.last_name_maternal.as_deref()),
        ("email", update.email.as_deref()),
        ("phone", update.phone.as_deref()),
        ("product", update.product.as_deref()),
        ("company_identity", update.company_identity.as_deref()),
        ("note", update.note.as_deref()),
        ("request_ref", update.request_ref.as_deref()),
        ("operation_number", update.operation_number.as_deref()),
    ];
    for (column, value) in text_fields {
        if let Some(value) = value {
            set_text(&mut tx, guid, column, value).await?;
        }
    }

    sqlx::query("UPDATE enrollees SET updated_at = CURRENT_TIMESTAMP WHERE guid = ?")
        .bind(guid)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

/// Set one whitelisted text column; an empty value stores NULL.
///
/// `column` only ever comes from the fixed lists above, never from
/// request data.
async fn set_text(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    guid: &str,
    column: &str,
    value: &str,
) -> Result<()> {
    let value = if value.is_empty() { None } else { Some(value) };
    let sql = format!("UPDATE enrollees SET {column} = ? WHERE guid = ?");
    sqlx::query(&sql)
        .bind(value)
        .bind(guid)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

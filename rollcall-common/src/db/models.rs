//! Database models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One student record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollee {
    pub guid: String,
    pub document_type: Option<String>,
    /// Normalized national identity number, unique across enrollees
    pub identity: String,
    pub first_name: String,
    pub last_name_paternal: Option<String>,
    pub last_name_maternal: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub product: Option<String>,
    pub company_identity: Option<String>,
    /// Running check-in total; NULL reads as zero
    pub attendance: Option<i64>,
    pub note: Option<String>,
    pub course_date: Option<NaiveDate>,
    pub request_ref: Option<String>,
    pub operation_number: Option<String>,
}

impl Enrollee {
    /// Display name: first name plus paternal surname, single space,
    /// trimmed when the surname is missing
    pub fn display_name(&self) -> String {
        let surname = self.last_name_paternal.as_deref().unwrap_or("");
        format!("{} {}", self.first_name, surname).trim().to_string()
    }
}

/// One recorded check-in
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceEvent {
    pub guid: String,
    /// Logical reference to the owning enrollee
    pub enrollee_id: String,
    pub course: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

//! Booking entity and validated create/update input
//!
//! Field lengths match the bookings table columns. Wire names are
//! camelCase; the submission timestamp is reported as `submissionTime`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// A persisted booking record
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub package_type: String,
    pub session_type: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub subjects: Option<String>,
    pub additional_info: Option<String>,
    pub referral: Option<String>,
    #[serde(rename = "submissionTime")]
    pub submitted_at: DateTime<Utc>,
}

/// Booking input for create and full-record update.
///
/// Carries no id and no submission timestamp: the store assigns both.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub package_type: String,
    pub session_type: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub subjects: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub referral: Option<String>,
}

// Bounds are VARCHAR(n) columns, which count characters, not bytes.
fn required(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

fn optional(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}

impl NewBooking {
    /// Check required-non-empty and column length bounds.
    ///
    /// The same bounds exist as column constraints; validating here saves
    /// the round-trip and produces a field-level message.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name, 250)?;
        required("phone", &self.phone, 20)?;
        required("email", &self.email, 100)?;
        required("packageType", &self.package_type, 50)?;
        required("sessionType", &self.session_type, 50)?;
        optional("subjects", self.subjects.as_deref(), 500)?;
        optional("additionalInfo", self.additional_info.as_deref(), 1000)?;
        optional("referral", self.referral.as_deref(), 100)?;
        Ok(())
    }
}

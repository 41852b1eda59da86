//! Attendance Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Valid attendance statuses
pub const ATTENDANCE_STATUSES: [&str; 2] = ["Present", "Absent"];

/// Attendance row. One record per (employee, date), enforced by a
/// storage-level unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Attendance {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Attendance with the referenced employee resolved (explicit populate
/// variant, used by the per-date roster)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceWithEmployee {
    pub id: i64,
    pub employee_id: i64,
    pub employee_no: String,
    pub employee_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Mark-attendance request body
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    #[validate(range(min = 1, message = "Invalid employee ID format"))]
    pub employee_id: i64,

    #[validate(custom(function = validate_date_not_future))]
    pub date: NaiveDate,

    #[validate(custom(function = validate_status))]
    pub status: String,
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_date_not_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > chrono::Utc::now().date_naive() {
        Err(validation_error(
            "date_future",
            "Date cannot be in the future",
        ))
    } else {
        Ok(())
    }
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if ATTENDANCE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(validation_error(
            "status",
            "Status must be either Present or Absent",
        ))
    }
}

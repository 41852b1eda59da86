//! Request validation helper
//!
//! Runs `validator` derives on a payload and aggregates every failing
//! field's message into one 400 response.

use shared::error::{AppError, AppResult};
use validator::{Validate, ValidationErrorsKind};

/// Validate a request payload, collecting all field messages
///
/// Produces `Validation failed: <m1>, <m2>` with messages ordered by
/// field name for deterministic output.
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    let Err(errors) = payload.validate() else {
        return Ok(());
    };

    let mut fields: Vec<(&str, String)> = Vec::new();
    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(field_errors) = kind {
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                fields.push((field.as_ref(), message));
            }
        }
    }
    fields.sort();

    let joined = fields
        .iter()
        .map(|(_, m)| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::validation(format!("Validation failed: {joined}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
        name: String,
        #[validate(email(message = "Please provide a valid email address"))]
        email: String,
    }

    #[test]
    fn valid_payload_passes() {
        let sample = Sample {
            name: "Jane".into(),
            email: "jane@example.com".into(),
        };
        assert!(validate_payload(&sample).is_ok());
    }

    #[test]
    fn all_field_messages_aggregated() {
        let sample = Sample {
            name: "J".into(),
            email: "not-an-email".into(),
        };
        let err = validate_payload(&sample).unwrap_err();
        assert!(err.message.starts_with("Validation failed: "));
        assert!(err.message.contains("Please provide a valid email address"));
        assert!(err.message.contains("Name must be at least 2 characters"));
    }
}

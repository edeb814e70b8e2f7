//! Validation Utilities

use validator::{Validate, ValidationErrors};

use super::error::ClientError;
use crate::domain::value_objects::ValidationResult;

/// Flatten validation errors into messages, ordered by field name.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}

/// Run derive-based validation and collect every message.
pub fn validate_all<T: Validate>(value: &T) -> ValidationResult {
    match value.validate() {
        Ok(()) => ValidationResult::ok(),
        Err(errors) => ValidationResult::from_errors(error_messages(&errors)),
    }
}

/// Convert a failed validation into a client error.
pub fn validation_error(result: &ValidationResult) -> ClientError {
    if result.errors.is_empty() {
        ClientError::Validation("Validation failed".into())
    } else {
        ClientError::Validation(result.errors.join(", "))
    }
}

/// Validate before any network call, failing fast.
pub fn ensure_valid<T: Validate>(value: &T) -> Result<(), ClientError> {
    let result = validate_all(value);
    if result.valid {
        Ok(())
    } else {
        Err(validation_error(&result))
    }
}

//! Normalization failure model.
//!
//! Failures are data, not control flow: every problem found in an item is
//! collected into one [`ValidationFailure`] so the ingestion collaborator can
//! decide to skip, log, or quarantine the item. Nothing here panics and a bad
//! item never aborts its batch.

use serde_json::Value;
use thiserror::Error;

/// Class of a single field-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldErrorKind {
    #[error("missing required field")]
    MissingRequiredField,
    #[error("value not in the allowed set")]
    InvalidEnumValue,
    #[error("unknown ISO 3166-1 alpha-2 code")]
    InvalidCountryCode,
    #[error("vat block names more than one country")]
    AmbiguousVatBlock,
    #[error("value has the wrong shape")]
    TypeMismatch,
}

/// One field-level failure: which field, what kind, and the offending value
/// as it appeared in the payload (`Null` when the field was absent).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {kind} (got {value})")]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
    pub value: Value,
}

impl FieldError {
    pub fn new(field: &'static str, kind: FieldErrorKind, value: Value) -> Self {
        Self { field, kind, value }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::new(field, FieldErrorKind::MissingRequiredField, Value::Null)
    }
}

/// Aggregated validation result for one rejected item (all-or-nothing: a
/// rejected item produces no record at all).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("item rejected with {} field error(s): {}", .errors.len(), summary(.errors))]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Whether any error of the given kind was recorded for `field`.
    pub fn has(&self, field: &str, kind: FieldErrorKind) -> bool {
        self.errors
            .iter()
            .any(|e| e.field == field && e.kind == kind)
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_every_offending_field() {
        let failure = ValidationFailure::new(vec![
            FieldError::missing("code"),
            FieldError::new(
                "packaging",
                FieldErrorKind::InvalidEnumValue,
                Value::String("XX".into()),
            ),
        ]);
        let text = failure.to_string();
        assert!(text.contains("2 field error(s)"));
        assert!(text.contains("code"));
        assert!(text.contains("packaging"));
    }

    #[test]
    fn has_matches_field_and_kind() {
        let failure = ValidationFailure::new(vec![FieldError::missing("unit_name")]);
        assert!(failure.has("unit_name", FieldErrorKind::MissingRequiredField));
        assert!(!failure.has("unit_name", FieldErrorKind::TypeMismatch));
        assert!(!failure.has("code", FieldErrorKind::MissingRequiredField));
    }
}

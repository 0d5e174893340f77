//! Core error types for the duty roster
//!
//! Validation errors are collected per field so a caller can surface them inline.

use std::collections::BTreeMap;
use thiserror::Error;

/// Core error type for all roster operations
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Conflict: {message}")]
    Conflict { message: String },
}

impl RosterError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        RosterError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }
}

/// Validation errors collection
///
/// Fields are kept in a sorted map so `full_messages` is stable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: BTreeMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a collection holding one field error
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// Messages joined for a single-line notification
    pub fn to_sentence(&self) -> String {
        summarize(&self.base_errors, &self.errors)
    }

    /// `Ok(())` when empty, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn summarize(base_errors: &[String], errors: &BTreeMap<String, Vec<String>>) -> String {
    let mut messages = base_errors.to_vec();
    for (field, field_messages) in errors {
        for msg in field_messages {
            messages.push(format!("{} {}", field, msg));
        }
    }
    messages.join(", ")
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sentence())
    }
}

impl std::error::Error for ValidationErrors {}

/// HTTP status code mapping for errors
impl RosterError {
    pub fn status_code(&self) -> u16 {
        match self {
            RosterError::NotFound { .. } => 404,
            RosterError::Validation(_) => 422,
            RosterError::Conflict { .. } => 409,
            RosterError::Database(_) | RosterError::Internal(_) => 500,
            RosterError::Config(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RosterError::NotFound { .. } => "not_found",
            RosterError::Validation(_) => "validation_failed",
            RosterError::Database(_) => "database_error",
            RosterError::Internal(_) => "internal_error",
            RosterError::Config(_) => "configuration_error",
            RosterError::Conflict { .. } => "conflict",
        }
    }

    /// Whether retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, RosterError::Database(_) | RosterError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("workSchedule", "can't be blank");
        errors.add("employee", "can't be blank");
        errors.add_base("Roster is locked");

        assert_eq!(
            errors.full_messages(),
            vec![
                "Roster is locked".to_string(),
                "employee can't be blank".to_string(),
                "workSchedule can't be blank".to_string(),
            ]
        );
        assert!(errors.has_error("employee"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(RosterError::not_found("DutySchedule", 7).status_code(), 404);
        assert_eq!(
            RosterError::Validation(ValidationErrors::single("name", "can't be blank"))
                .error_code(),
            "validation_failed"
        );
        assert_eq!(
            RosterError::Conflict { message: "duplicate date".into() }.status_code(),
            409
        );
        assert!(RosterError::Database("connection reset".into()).is_transient());
        assert!(!RosterError::not_found("DutySchedule", 7).is_transient());
    }
}

//! Service result type
//!
//! Outcome of a service call: a value or collected errors, plus an optional
//! message for the one-shot notification shown to the user.

use roster_core::error::{RosterError, ValidationErrors};
use std::fmt;

#[derive(Debug, Clone)]
pub struct ServiceResult<T> {
    success: bool,
    result: Option<T>,
    errors: ValidationErrors,
    message: Option<String>,
}

impl<T> ServiceResult<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
            message: None,
        }
    }

    pub fn success_with_message(result: T, message: impl Into<String>) -> Self {
        Self::success(result).with_message(message)
    }

    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
            message: None,
        }
    }

    /// Failure with a single field error
    pub fn failure_with_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::failure(ValidationErrors::single(field, message))
    }

    /// Failure with an error not tied to a field
    pub fn failure_with_base_error(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        Self::failure(errors)
    }

    /// Failure carrying a roster error; validation errors keep their fields
    pub fn from_error(err: RosterError) -> Self {
        match err {
            RosterError::Validation(errors) => Self::failure(errors),
            other => Self::failure_with_base_error(other.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn take_result(&mut self) -> Option<T> {
        self.result.take()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.full_messages()
    }

    /// Message for a notification: the explicit message, else the errors
    pub fn notification_text(&self) -> String {
        match (&self.message, self.success) {
            (Some(message), _) => message.clone(),
            (None, true) => "Saved".to_string(),
            (None, false) => self.errors.to_sentence(),
        }
    }

    /// Map the result if successful
    pub fn map<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ServiceResult {
            success: self.success,
            result: if self.success { self.result.map(f) } else { None },
            errors: self.errors,
            message: self.message,
        }
    }

    /// Chain with another service call if successful
    pub fn and_then<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> ServiceResult<U>,
    {
        match (self.success, self.result) {
            (true, Some(result)) => f(result),
            _ => ServiceResult::failure(self.errors),
        }
    }
}

impl<T> From<Result<T, ValidationErrors>> for ServiceResult<T> {
    fn from(result: Result<T, ValidationErrors>) -> Self {
        match result {
            Ok(value) => ServiceResult::success(value),
            Err(errors) => ServiceResult::failure(errors),
        }
    }
}

impl<T> From<ServiceResult<T>> for Result<T, ValidationErrors> {
    fn from(result: ServiceResult<T>) -> Self {
        if result.success {
            result.result.ok_or_else(|| {
                let mut errors = ValidationErrors::new();
                errors.add_base("Service succeeded but no result was returned");
                errors
            })
        } else {
            Err(result.errors)
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServiceResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.result, self.success) {
            (Some(result), true) => write!(f, "Success: {}", result),
            (None, true) => write!(f, "Success"),
            _ => write!(f, "Failure: {}", self.errors.full_messages().join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result() {
        let result = ServiceResult::success_with_message(42, "Created");
        assert!(result.is_success());
        assert_eq!(result.result(), Some(&42));
        assert_eq!(result.notification_text(), "Created");
    }

    #[test]
    fn test_failure_result() {
        let result: ServiceResult<i32> = ServiceResult::failure_with_error("name", "can't be blank");
        assert!(result.is_failure());
        assert!(result.result().is_none());
        assert!(result.errors().has_error("name"));
        assert_eq!(result.notification_text(), "name can't be blank");
    }

    #[test]
    fn test_from_error_keeps_fields() {
        let result: ServiceResult<()> =
            ServiceResult::from_error(RosterError::Validation(ValidationErrors::single("endDate", "is invalid")));
        assert!(result.errors().has_error("endDate"));

        let result: ServiceResult<()> = ServiceResult::from_error(RosterError::not_found("DutySchedule", 3));
        assert_eq!(result.full_messages(), vec!["Not found: DutySchedule with id=3"]);
    }

    #[test]
    fn test_map_and_chain() {
        let mapped = ServiceResult::success(21).map(|n| n * 2);
        assert_eq!(mapped.result(), Some(&42));

        let failed: ServiceResult<i32> = ServiceResult::failure_with_base_error("boom");
        let chained = failed.and_then(|n| ServiceResult::success(n.to_string()));
        assert!(chained.is_failure());
        assert_eq!(chained.full_messages(), vec!["boom"]);
    }

    #[test]
    fn test_into_result() {
        let ok: Result<i32, ValidationErrors> = ServiceResult::success(1).into();
        assert_eq!(ok, Ok(1));

        let err: Result<i32, ValidationErrors> = ServiceResult::failure_with_base_error("x").into();
        assert!(err.is_err());
    }
}

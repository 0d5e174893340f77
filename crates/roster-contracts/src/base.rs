//! Base contract system

use std::collections::HashSet;

use roster_core::error::ValidationErrors;
use validator::Validate;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;

    /// Check if an attribute is writable
    fn is_writable(&self, _attribute: &str) -> bool {
        true
    }
}

/// Run a model's `validator` rules and collect them as field errors
pub fn validate_model<T: Validate>(model: &T, errors: &mut ValidationErrors) {
    let Err(failures) = model.validate() else {
        return;
    };

    for (field, field_errors) in failures.field_errors() {
        for error in field_errors {
            let message = match (&error.message, error.code.as_ref()) {
                (Some(message), _) => message.to_string(),
                (None, "length") => "has an invalid length".to_string(),
                (None, code) => format!("is invalid ({})", code),
            };
            errors.add(field, message);
        }
    }
}

/// Change tracking for update contracts
#[derive(Debug, Default, Clone)]
pub struct ChangeTracker {
    changed_attributes: HashSet<String>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_changed(&mut self, attribute: impl Into<String>) {
        self.changed_attributes.insert(attribute.into());
    }

    /// Mark `attribute` when `before` and `after` differ
    pub fn compare<V: PartialEq>(&mut self, attribute: &str, before: &V, after: &V) {
        if before != after {
            self.mark_changed(attribute);
        }
    }

    pub fn is_changed(&self, attribute: &str) -> bool {
        self.changed_attributes.contains(attribute)
    }

    pub fn changed_attributes(&self) -> &HashSet<String> {
        &self.changed_attributes
    }
}

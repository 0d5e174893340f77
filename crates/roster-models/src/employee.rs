//! Employee model
//!
//! Only the fields the roster reads are modeled; the rest of the employee
//! profile belongs to the HR records screens.
//! Table: employees

use chrono::{DateTime, Utc};
use roster_core::traits::{Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employee entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub id: Option<Id>,

    pub personal_information: PersonalInformation,

    /// Home department
    pub department_id: Option<Id>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInformation {
    #[validate(length(max = 255))]
    pub first_name: String,

    #[validate(length(max = 255))]
    pub last_name: String,

    pub middle_name: Option<String>,
}

impl Employee {
    pub fn new(id: Id, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            personal_information: PersonalInformation {
                first_name: first_name.into(),
                last_name: last_name.into(),
                middle_name: None,
            },
            ..Default::default()
        }
    }

    /// Roster display name: "Lastname, F."
    pub fn display_name(&self) -> String {
        let info = &self.personal_information;
        let last = info.last_name.trim();
        let initial = info
            .first_name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>());

        match (last.is_empty(), initial) {
            (false, Some(initial)) => format!("{}, {}.", last, initial),
            (false, None) => last.to_string(),
            (true, Some(_)) => info.first_name.trim().to_string(),
            (true, None) => "Unknown".to_string(),
        }
    }
}

impl Identifiable for Employee {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Employee {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let employee = Employee::new(1, "maria", "Santos");
        assert_eq!(employee.display_name(), "Santos, M.");
    }

    #[test]
    fn test_display_name_missing_parts() {
        assert_eq!(Employee::new(1, "", "Reyes").display_name(), "Reyes");
        assert_eq!(Employee::new(1, "Ana", " ").display_name(), "Ana");
        assert_eq!(Employee::default().display_name(), "Unknown");
    }

    #[test]
    fn test_deserialize_partial_record() {
        let employee: Employee = serde_json::from_str(
            r#"{"id": 12, "personalInformation": {"firstName": "Liza", "lastName": "Cruz"}}"#,
        )
        .unwrap();
        assert_eq!(employee.id, Some(12));
        assert_eq!(employee.display_name(), "Cruz, L.");
    }
}

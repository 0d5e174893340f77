//! Department model
//!
//! Table: departments

use roster_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Hospital department, used to scope a duty roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Department {
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

impl Department {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }
}

impl Identifiable for Department {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

//! References to other records
//!
//! Upstream payloads carry a related record either as its bare id or as the
//! populated object. Both forms deserialize into [`Reference`], and callers ask
//! for [`Reference::id`] instead of inspecting the shape themselves.

use roster_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Id(Id),
    Populated(T),
}

impl<T: Identifiable> Reference<T> {
    /// The referenced id, whichever form was supplied
    pub fn id(&self) -> Option<Id> {
        match self {
            Reference::Id(id) => Some(*id),
            Reference::Populated(record) => record.id(),
        }
    }

    pub fn refers_to(&self, id: Id) -> bool {
        self.id() == Some(id)
    }

    /// Collapse to the bare-id form; `None` when a populated record has no id
    pub fn to_id_ref(&self) -> Option<Reference<T>> {
        self.id().map(Reference::Id)
    }
}

impl<T> Reference<T> {
    pub fn populated(&self) -> Option<&T> {
        match self {
            Reference::Id(_) => None,
            Reference::Populated(record) => Some(record),
        }
    }
}

impl<T> From<Id> for Reference<T> {
    fn from(id: Id) -> Self {
        Reference::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Department;

    #[test]
    fn test_bare_id_and_populated_forms() {
        let bare: Reference<Department> = serde_json::from_str("7").unwrap();
        let populated: Reference<Department> =
            serde_json::from_str(r#"{"id": 7, "name": "Emergency Room"}"#).unwrap();

        assert_eq!(bare.id(), Some(7));
        assert_eq!(populated.id(), Some(7));
        assert!(bare.populated().is_none());
        assert_eq!(populated.populated().map(|d| d.name.as_str()), Some("Emergency Room"));
    }

    #[test]
    fn test_to_id_ref() {
        let populated = Reference::Populated(Department::new(3, "Pharmacy"));
        assert_eq!(populated.to_id_ref(), Some(Reference::Id(3)));

        let unsaved: Reference<Department> = Reference::Populated(Department::default());
        assert_eq!(unsaved.to_id_ref(), None);
    }
}

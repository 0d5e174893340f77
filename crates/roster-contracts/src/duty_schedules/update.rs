//! Update contract for duty schedules

use roster_core::error::ValidationErrors;
use roster_core::traits::Id;
use roster_models::{DutySchedule, DutySchedulePayload};

use super::base::DutyScheduleBaseContract;
use crate::base::{ChangeTracker, Contract, ValidationResult};

/// Contract for saving an existing roster
///
/// A stored roster keeps the period it was created for.
pub struct UpdateDutyScheduleContract {
    base: DutyScheduleBaseContract,
    schedule_id: Id,
    changes: ChangeTracker,
}

impl UpdateDutyScheduleContract {
    pub fn new(schedule_id: Id) -> Self {
        Self {
            base: DutyScheduleBaseContract::new(),
            schedule_id,
            changes: ChangeTracker::new(),
        }
    }

    /// Record which attributes `payload` changes on `original`
    pub fn track(mut self, original: &DutySchedule, payload: &DutySchedulePayload) -> Self {
        self.changes.compare("name", &original.name, &payload.name);
        self.changes.compare("department", &original.department_id(), &payload.department);
        self.changes.compare("startDate", &original.start_date, &payload.start_date);
        self.changes.compare("endDate", &original.end_date, &payload.end_date);
        self
    }

    pub fn is_changed(&self, attribute: &str) -> bool {
        self.changes.is_changed(attribute)
    }

    pub fn schedule_id(&self) -> Id {
        self.schedule_id
    }

    fn validate_period_unchanged(&self, errors: &mut ValidationErrors) {
        for attribute in ["startDate", "endDate"] {
            if self.changes.is_changed(attribute) {
                errors.add(attribute, "cannot be changed after the roster is created");
            }
        }
    }
}

impl Contract<DutySchedulePayload> for UpdateDutyScheduleContract {
    fn validate(&self, payload: &DutySchedulePayload) -> ValidationResult {
        let mut errors = match self.base.validate(payload) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.schedule_id <= 0 {
            errors.add("id", "is invalid");
        }
        self.validate_period_unchanged(&mut errors);

        errors.into_result()
    }

    fn is_writable(&self, attribute: &str) -> bool {
        !matches!(attribute, "startDate" | "endDate")
    }
}

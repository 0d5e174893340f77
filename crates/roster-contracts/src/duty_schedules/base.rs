//! Base contract for duty schedule payloads

use std::collections::{BTreeSet, HashSet};

use roster_core::error::ValidationErrors;
use roster_models::{DutySchedule, DutySchedulePayload};

use super::MAX_REMARKS_LENGTH;
use crate::base::{validate_model, Contract, ValidationResult};

/// Checks shared by create and update
#[derive(Debug, Default, Clone, Copy)]
pub struct DutyScheduleBaseContract;

impl DutyScheduleBaseContract {
    pub fn new() -> Self {
        Self
    }

    /// Name present and within length
    pub fn validate_name(&self, payload: &DutySchedulePayload, errors: &mut ValidationErrors) {
        if payload.name.trim().is_empty() {
            errors.add("name", "can't be blank");
            return;
        }
        validate_model(&DutySchedule::draft(payload.name.clone(), payload.start_date, payload.end_date), errors);
    }

    pub fn validate_bounds(&self, payload: &DutySchedulePayload, errors: &mut ValidationErrors) {
        if !payload.date_range().is_valid() {
            errors.add("endDate", "must be on or after the start date");
        }
    }

    /// One non-empty entry per date, one shift per employee per entry
    pub fn validate_entries(&self, payload: &DutySchedulePayload, errors: &mut ValidationErrors) {
        let mut dates = BTreeSet::new();

        for entry in &payload.entries {
            if !dates.insert(entry.date) {
                errors.add("entries", format!("contain more than one entry for {}", entry.date));
            }
            if entry.employee_schedules.is_empty() {
                errors.add("entries", format!("contain an empty entry for {}", entry.date));
            }

            let mut employees = HashSet::new();
            for schedule in &entry.employee_schedules {
                if !employees.insert(schedule.employee) {
                    errors.add(
                        "entries",
                        format!("assign employee {} more than once on {}", schedule.employee, entry.date),
                    );
                }
                let too_long = schedule
                    .remarks
                    .as_ref()
                    .is_some_and(|r| r.chars().count() > MAX_REMARKS_LENGTH);
                if too_long {
                    errors.add(
                        "remarks",
                        format!("is too long (maximum is {} characters)", MAX_REMARKS_LENGTH),
                    );
                }
            }
        }
    }
}

impl Contract<DutySchedulePayload> for DutyScheduleBaseContract {
    fn validate(&self, payload: &DutySchedulePayload) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_name(payload, &mut errors);
        self.validate_bounds(payload, &mut errors);
        self.validate_entries(payload, &mut errors);

        errors.into_result()
    }
}

//! Create contract for duty schedules

use roster_core::config::CreateScope;
use roster_core::error::ValidationErrors;
use roster_models::DutySchedulePayload;

use super::base::DutyScheduleBaseContract;
use crate::base::{Contract, ValidationResult};

/// Contract for saving a new roster
///
/// With [`CreateScope::ActivePeriod`] every entry must fall inside the
/// payload's bounds; [`CreateScope::AllPeriods`] lets entries from other
/// periods through.
pub struct CreateDutyScheduleContract {
    base: DutyScheduleBaseContract,
    scope: CreateScope,
}

impl CreateDutyScheduleContract {
    pub fn new(scope: CreateScope) -> Self {
        Self {
            base: DutyScheduleBaseContract::new(),
            scope,
        }
    }

    fn validate_entries_in_period(&self, payload: &DutySchedulePayload, errors: &mut ValidationErrors) {
        if self.scope == CreateScope::AllPeriods {
            return;
        }

        let range = payload.date_range();
        for entry in payload.entries.iter().filter(|e| !range.contains(e.date)) {
            errors.add(
                "entries",
                format!(
                    "contain {} outside {} to {}",
                    entry.date, payload.start_date, payload.end_date
                ),
            );
        }
    }
}

impl Contract<DutySchedulePayload> for CreateDutyScheduleContract {
    fn validate(&self, payload: &DutySchedulePayload) -> ValidationResult {
        let mut errors = match self.base.validate(payload) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        self.validate_entries_in_period(payload, &mut errors);

        errors.into_result()
    }
}

//! Delete contract for duty schedules

use roster_core::error::ValidationErrors;
use roster_core::traits::Lockable;
use roster_models::DutySchedule;

use crate::base::{Contract, ValidationResult};

/// A finalized roster cannot be deleted
#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteDutyScheduleContract;

impl DeleteDutyScheduleContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<DutySchedule> for DeleteDutyScheduleContract {
    fn validate(&self, schedule: &DutySchedule) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if schedule.is_locked() {
            errors.add_base("Finalized duty schedules cannot be deleted");
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_finalized_schedule_is_kept() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 26).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 5, 25).unwrap();
        let mut schedule = DutySchedule::draft("May 2025", start, end);

        assert!(DeleteDutyScheduleContract::new().validate(&schedule).is_ok());

        schedule.is_finalized = true;
        let errors = DeleteDutyScheduleContract::new().validate(&schedule).unwrap_err();
        assert_eq!(errors.full_messages(), vec!["Finalized duty schedules cannot be deleted"]);
    }
}

//! Update service for duty schedules

use roster_contracts::{Contract, UpdateDutyScheduleContract};
use roster_core::error::RosterError;
use roster_core::traits::Id;
use roster_db::DutyScheduleRepository;
use roster_models::DutySchedulePayload;
use serde::{Deserialize, Serialize};

use crate::result::ServiceResult;

/// Response of a successful update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedDutySchedule {
    pub message: String,
}

/// Replace a stored roster's attributes and entries
pub struct UpdateDutyScheduleService<'a> {
    repo: &'a dyn DutyScheduleRepository,
    id: Id,
}

impl<'a> UpdateDutyScheduleService<'a> {
    pub fn new(repo: &'a dyn DutyScheduleRepository, id: Id) -> Self {
        Self { repo, id }
    }

    pub async fn call(self, payload: DutySchedulePayload) -> ServiceResult<UpdatedDutySchedule> {
        let original = match self.repo.find_by_id(self.id).await {
            Ok(Some(schedule)) => schedule,
            Ok(None) => return ServiceResult::from_error(RosterError::not_found("DutySchedule", self.id)),
            Err(err) => {
                tracing::warn!(schedule_id = self.id, error = %err, "Failed to load duty schedule");
                return ServiceResult::from_error(err.into());
            }
        };

        let contract = UpdateDutyScheduleContract::new(self.id).track(&original, &payload);
        if let Err(errors) = contract.validate(&payload) {
            tracing::debug!(schedule_id = self.id, errors = %errors, "Duty schedule payload rejected");
            return ServiceResult::failure(errors);
        }

        let name = payload.name.clone();
        match self.repo.update(self.id, payload).await {
            Ok(_) => {
                let message = format!("Duty schedule \"{}\" updated successfully", name);
                ServiceResult::success_with_message(UpdatedDutySchedule { message: message.clone() }, message)
            }
            Err(err) => {
                tracing::warn!(schedule_id = self.id, error = %err, "Failed to update duty schedule");
                ServiceResult::from_error(err.into())
            }
        }
    }
}

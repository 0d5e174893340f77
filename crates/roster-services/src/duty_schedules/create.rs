//! Create service for duty schedules

use roster_contracts::{Contract, CreateDutyScheduleContract};
use roster_core::config::CreateScope;
use roster_core::traits::Id;
use roster_db::DutyScheduleRepository;
use roster_models::DutySchedulePayload;
use serde::{Deserialize, Serialize};

use crate::result::ServiceResult;

/// Response of a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDutySchedule {
    pub id: Id,
    pub message: String,
}

/// Validate a new roster and store it
pub struct CreateDutyScheduleService<'a> {
    repo: &'a dyn DutyScheduleRepository,
    contract: CreateDutyScheduleContract,
}

impl<'a> CreateDutyScheduleService<'a> {
    pub fn new(repo: &'a dyn DutyScheduleRepository, scope: CreateScope) -> Self {
        Self {
            repo,
            contract: CreateDutyScheduleContract::new(scope),
        }
    }

    pub async fn call(self, payload: DutySchedulePayload) -> ServiceResult<CreatedDutySchedule> {
        if let Err(errors) = self.contract.validate(&payload) {
            tracing::debug!(errors = %errors, "Duty schedule payload rejected");
            return ServiceResult::failure(errors);
        }

        let name = payload.name.clone();
        match self.repo.create(payload).await {
            Ok(schedule) => match schedule.id {
                Some(id) => {
                    let message = format!("Duty schedule \"{}\" created successfully", name);
                    ServiceResult::success_with_message(CreatedDutySchedule { id, message: message.clone() }, message)
                }
                None => ServiceResult::failure_with_base_error("Duty schedule was stored without an id"),
            },
            Err(err) => {
                tracing::warn!(error = %err, "Failed to create duty schedule");
                ServiceResult::from_error(err.into())
            }
        }
    }
}

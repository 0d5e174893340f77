//! Delete service for duty schedules

use roster_contracts::{Contract, DeleteDutyScheduleContract};
use roster_core::error::RosterError;
use roster_core::traits::Id;
use roster_db::DutyScheduleRepository;

use crate::result::ServiceResult;

pub struct DeleteDutyScheduleService<'a> {
    repo: &'a dyn DutyScheduleRepository,
    contract: DeleteDutyScheduleContract,
}

impl<'a> DeleteDutyScheduleService<'a> {
    pub fn new(repo: &'a dyn DutyScheduleRepository) -> Self {
        Self {
            repo,
            contract: DeleteDutyScheduleContract::new(),
        }
    }

    pub async fn call(self, id: Id) -> ServiceResult<()> {
        let schedule = match self.repo.find_by_id(id).await {
            Ok(Some(schedule)) => schedule,
            Ok(None) => return ServiceResult::from_error(RosterError::not_found("DutySchedule", id)),
            Err(err) => return ServiceResult::from_error(err.into()),
        };

        if let Err(errors) = self.contract.validate(&schedule) {
            return ServiceResult::failure(errors);
        }

        match self.repo.delete(id).await {
            Ok(()) => ServiceResult::success_with_message((), "Duty schedule deleted"),
            Err(err) => {
                tracing::warn!(schedule_id = id, error = %err, "Failed to delete duty schedule");
                ServiceResult::from_error(err.into())
            }
        }
    }
}

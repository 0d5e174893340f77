//! Duty schedule services
//!
//! - create: contract-checked insert, answers `{id, message}`
//! - update: contract-checked replace, answers `{message}`
//! - delete: refused for finalized rosters
//!
//! [`DutyScheduleService`] bundles them over one repository.

mod create;
mod update;
mod delete;

use std::sync::Arc;

use roster_core::config::CreateScope;
use roster_core::error::RosterError;
use roster_core::result::RosterResult;
use roster_core::traits::Id;
use roster_db::{DutyScheduleRepository, PaginatedResult, Pagination};
use roster_models::{DutySchedule, DutySchedulePayload};

use crate::result::ServiceResult;

pub use create::{CreateDutyScheduleService, CreatedDutySchedule};
pub use update::{UpdateDutyScheduleService, UpdatedDutySchedule};
pub use delete::DeleteDutyScheduleService;

#[derive(Clone)]
pub struct DutyScheduleService {
    repo: Arc<dyn DutyScheduleRepository>,
    create_scope: CreateScope,
}

impl DutyScheduleService {
    pub fn new(repo: Arc<dyn DutyScheduleRepository>, create_scope: CreateScope) -> Self {
        Self { repo, create_scope }
    }

    pub fn create_scope(&self) -> CreateScope {
        self.create_scope
    }

    /// Stored roster by id; a missing roster is an error
    pub async fn load(&self, id: Id) -> RosterResult<DutySchedule> {
        let schedule = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| RosterError::not_found("DutySchedule", id))?;

        tracing::debug!(schedule_id = id, entries = schedule.entries.len(), "Duty schedule loaded");
        Ok(schedule)
    }

    pub async fn list(&self, pagination: Pagination) -> RosterResult<PaginatedResult<DutySchedule>> {
        let items = self.repo.list(pagination).await?;
        let total = self.repo.count().await?;
        Ok(PaginatedResult::new(items, total, pagination))
    }

    pub async fn create(&self, payload: DutySchedulePayload) -> ServiceResult<CreatedDutySchedule> {
        CreateDutyScheduleService::new(self.repo.as_ref(), self.create_scope)
            .call(payload)
            .await
    }

    pub async fn update(&self, id: Id, payload: DutySchedulePayload) -> ServiceResult<UpdatedDutySchedule> {
        UpdateDutyScheduleService::new(self.repo.as_ref(), id).call(payload).await
    }

    pub async fn delete(&self, id: Id) -> ServiceResult<()> {
        DeleteDutyScheduleService::new(self.repo.as_ref()).call(id).await
    }

    /// Set or clear the lock flag
    pub async fn set_finalized(&self, id: Id, finalized: bool) -> ServiceResult<DutySchedule> {
        match self.repo.set_finalized(id, finalized).await {
            Ok(schedule) => {
                tracing::info!(schedule_id = id, finalized, "Duty schedule lock changed");
                let message = if finalized {
                    "Duty schedule finalized"
                } else {
                    "Duty schedule reopened"
                };
                ServiceResult::success_with_message(schedule, message)
            }
            Err(err) => ServiceResult::from_error(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::test_support::MockRepo;
    use roster_db::{InMemoryDutyScheduleRepository, RepositoryError};
    use roster_models::{DutyEntryPayload, EmployeeSchedulePayload};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payload() -> DutySchedulePayload {
        DutySchedulePayload {
            name: "May 2025".to_string(),
            department: Some(2),
            start_date: date(2025, 4, 26),
            end_date: date(2025, 5, 25),
            entries: vec![
                DutyEntryPayload {
                    date: date(2025, 5, 1),
                    employee_schedules: vec![
                        EmployeeSchedulePayload {
                            employee: 10,
                            work_schedule: 1,
                            remarks: None,
                        },
                        EmployeeSchedulePayload {
                            employee: 11,
                            work_schedule: 2,
                            remarks: Some("relief".to_string()),
                        },
                    ],
                },
                DutyEntryPayload {
                    date: date(2025, 4, 27),
                    employee_schedules: vec![EmployeeSchedulePayload {
                        employee: 10,
                        work_schedule: 2,
                        remarks: None,
                    }],
                },
            ],
        }
    }

    fn memory_service() -> DutyScheduleService {
        DutyScheduleService::new(Arc::new(InMemoryDutyScheduleRepository::new()), CreateScope::ActivePeriod)
    }

    #[tokio::test]
    async fn test_create_then_load_round_trip() {
        let service = memory_service();
        let p = payload();

        let created = service.create(p.clone()).await;
        assert!(created.is_success());
        let response = created.result().unwrap().clone();
        assert_eq!(response.message, "Duty schedule \"May 2025\" created successfully");

        let loaded = service.load(response.id).await.unwrap();
        let expected = DutySchedule::from_payload(Some(response.id), &p);
        assert_eq!(loaded.assignment_tuples(), expected.assignment_tuples());
        assert_eq!(loaded.start_date, p.start_date);
        assert_eq!(loaded.department_id(), Some(2));
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let err = memory_service().load(404).await.unwrap_err();
        assert!(matches!(err, RosterError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_invalid_payload_is_not_persisted() {
        let repo = Arc::new(InMemoryDutyScheduleRepository::new());
        let service = DutyScheduleService::new(repo.clone(), CreateScope::ActivePeriod);
        let mut p = payload();
        p.entries[0].date = date(2025, 6, 1);

        let result = service.create(p).await;
        assert!(result.errors().has_error("entries"));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_update_answers_message_only() {
        let service = memory_service();
        let id = service.create(payload()).await.result().unwrap().id;

        let mut p = payload();
        p.entries.truncate(1);
        let updated = service.update(id, p).await;
        assert_eq!(
            updated.result().map(|r| r.message.as_str()),
            Some("Duty schedule \"May 2025\" updated successfully")
        );
        assert_eq!(service.load(id).await.unwrap().entries.len(), 1);

        let missing = service.update(id + 1, payload()).await;
        assert!(missing.is_failure());
    }

    #[tokio::test]
    async fn test_finalized_roster_cannot_be_deleted() {
        let service = memory_service();
        let id = service.create(payload()).await.result().unwrap().id;

        let finalized = service.set_finalized(id, true).await;
        assert!(finalized.result().unwrap().is_finalized);

        let refused = service.delete(id).await;
        assert!(refused.is_failure());

        service.set_finalized(id, false).await;
        assert!(service.delete(id).await.is_success());
        assert!(service.load(id).await.is_err());
    }

    #[tokio::test]
    async fn test_list_pages() {
        let service = memory_service();
        service.create(payload()).await;
        let mut june = payload();
        june.name = "June 2025".to_string();
        june.start_date = date(2025, 5, 26);
        june.end_date = date(2025, 6, 25);
        june.entries.clear();
        service.create(june).await;

        let page = service.list(Pagination::page(1, 1)).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].name, "June 2025");
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn test_persistence_failure_surfaces_as_failure() {
        let mut repo = MockRepo::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(RepositoryError::Database(sqlx::Error::PoolTimedOut)));

        let service = DutyScheduleService::new(Arc::new(repo), CreateScope::ActivePeriod);
        let result = service.create(payload()).await;

        assert!(result.is_failure());
        assert!(result.notification_text().starts_with("Database error"));
    }

    #[tokio::test]
    async fn test_update_conflict_maps_to_base_error() {
        let mut repo = MockRepo::new();
        let stored = DutySchedule::from_payload(Some(5), &payload());
        repo.expect_find_by_id()
            .withf(|id| *id == 5)
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_update()
            .returning(|_, _| Err(RepositoryError::Conflict("duplicate entry".to_string())));

        let service = DutyScheduleService::new(Arc::new(repo), CreateScope::ActivePeriod);
        let result = service.update(5, payload()).await;

        assert_eq!(result.full_messages(), vec!["Conflict: duplicate entry"]);
    }
}

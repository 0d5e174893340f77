//! Shared test doubles

use async_trait::async_trait;
use mockall::mock;
use roster_core::traits::Id;
use roster_db::{DutyScheduleRepository, Pagination, RepositoryResult};
use roster_models::{DutySchedule, DutySchedulePayload};

mock! {
    pub Repo {}

    #[async_trait]
    impl DutyScheduleRepository for Repo {
        async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<DutySchedule>>;
        async fn list(&self, pagination: Pagination) -> RepositoryResult<Vec<DutySchedule>>;
        async fn count(&self) -> RepositoryResult<i64>;
        async fn create(&self, payload: DutySchedulePayload) -> RepositoryResult<DutySchedule>;
        async fn update(&self, id: Id, payload: DutySchedulePayload) -> RepositoryResult<DutySchedule>;
        async fn delete(&self, id: Id) -> RepositoryResult<()>;
        async fn set_finalized(&self, id: Id, finalized: bool) -> RepositoryResult<DutySchedule>;
        async fn exists(&self, id: Id) -> RepositoryResult<bool>;
    }
}

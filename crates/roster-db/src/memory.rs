//! In-memory duty schedule repository
//!
//! Same contract as the PostgreSQL repository, including the unique date per
//! roster. Backs the service tests and callers running without a database.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use roster_core::traits::Id;
use roster_models::{DutySchedule, DutySchedulePayload};

use crate::repository::{DutyScheduleRepository, Pagination, RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
struct Store {
    next_id: Id,
    schedules: BTreeMap<Id, DutySchedule>,
}

#[derive(Debug, Default)]
pub struct InMemoryDutyScheduleRepository {
    store: RwLock<Store>,
}

impl InMemoryDutyScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with stored rosters; ids are kept
    pub fn with_schedules(schedules: impl IntoIterator<Item = DutySchedule>) -> Self {
        let repo = Self::new();
        {
            let mut store = repo.store.write();
            for schedule in schedules {
                let id = schedule.id.unwrap_or(store.next_id + 1);
                store.next_id = store.next_id.max(id);
                let mut schedule = schedule;
                schedule.id = Some(id);
                store.schedules.insert(id, schedule);
            }
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.store.read().schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().schedules.is_empty()
    }

    fn check_unique_dates(payload: &DutySchedulePayload) -> RepositoryResult<()> {
        let mut seen = BTreeSet::new();
        match payload.entries.iter().find(|e| !seen.insert(e.date)) {
            Some(entry) => Err(RepositoryError::Conflict(format!(
                "duplicate entry for {}",
                entry.date
            ))),
            None => Ok(()),
        }
    }

    fn materialize(id: Id, payload: &DutySchedulePayload) -> DutySchedule {
        let mut schedule = DutySchedule::from_payload(Some(id), payload);
        schedule.entries.retain(|e| !e.is_empty());
        schedule
    }
}

#[async_trait]
impl DutyScheduleRepository for InMemoryDutyScheduleRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<DutySchedule>> {
        Ok(self.store.read().schedules.get(&id).cloned())
    }

    async fn list(&self, pagination: Pagination) -> RepositoryResult<Vec<DutySchedule>> {
        let store = self.store.read();
        let mut schedules: Vec<_> = store.schedules.values().cloned().collect();
        schedules.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));

        Ok(schedules
            .into_iter()
            .skip(pagination.offset.max(0) as usize)
            .take(pagination.limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.store.read().schedules.len() as i64)
    }

    async fn create(&self, payload: DutySchedulePayload) -> RepositoryResult<DutySchedule> {
        Self::check_unique_dates(&payload)?;

        let mut store = self.store.write();
        store.next_id += 1;
        let id = store.next_id;

        let now = Utc::now();
        let mut schedule = Self::materialize(id, &payload);
        schedule.created_at = Some(now);
        schedule.updated_at = Some(now);
        store.schedules.insert(id, schedule.clone());

        tracing::info!(schedule_id = id, entries = schedule.entries.len(), "Duty schedule created");
        Ok(schedule)
    }

    async fn update(&self, id: Id, payload: DutySchedulePayload) -> RepositoryResult<DutySchedule> {
        Self::check_unique_dates(&payload)?;

        let mut store = self.store.write();
        let existing = store
            .schedules
            .get(&id)
            .ok_or_else(|| RepositoryError::not_found(id))?;

        let mut schedule = Self::materialize(id, &payload);
        schedule.is_finalized = existing.is_finalized;
        schedule.created_at = existing.created_at;
        schedule.updated_at = Some(Utc::now());
        store.schedules.insert(id, schedule.clone());

        tracing::info!(schedule_id = id, entries = schedule.entries.len(), "Duty schedule updated");
        Ok(schedule)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        match self.store.write().schedules.remove(&id) {
            Some(_) => {
                tracing::info!(schedule_id = id, "Duty schedule deleted");
                Ok(())
            }
            None => Err(RepositoryError::not_found(id)),
        }
    }

    async fn set_finalized(&self, id: Id, finalized: bool) -> RepositoryResult<DutySchedule> {
        let mut store = self.store.write();
        let schedule = store
            .schedules
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(id))?;

        schedule.is_finalized = finalized;
        schedule.updated_at = Some(Utc::now());
        Ok(schedule.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_models::{DutyEntryPayload, EmployeeSchedulePayload};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payload(name: &str, start: NaiveDate, end: NaiveDate) -> DutySchedulePayload {
        DutySchedulePayload {
            name: name.to_string(),
            department: Some(1),
            start_date: start,
            end_date: end,
            entries: vec![DutyEntryPayload {
                date: start,
                employee_schedules: vec![EmployeeSchedulePayload {
                    employee: 10,
                    work_schedule: 1,
                    remarks: None,
                }],
            }],
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryDutyScheduleRepository::new();
        let created = repo
            .create(payload("May 2025", date(2025, 4, 26), date(2025, 5, 25)))
            .await
            .unwrap();

        assert_eq!(created.id, Some(1));
        assert!(created.created_at.is_some());

        let found = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_id(2).await.unwrap().is_none());
        assert!(repo.exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_keeps_lock_and_creation_time() {
        let repo = InMemoryDutyScheduleRepository::new();
        let created = repo
            .create(payload("May 2025", date(2025, 4, 26), date(2025, 5, 25)))
            .await
            .unwrap();
        repo.set_finalized(1, true).await.unwrap();

        let mut changed = payload("May 2025 ER", date(2025, 4, 26), date(2025, 5, 25));
        changed.entries.clear();
        let updated = repo.update(1, changed).await.unwrap();

        assert_eq!(updated.name, "May 2025 ER");
        assert!(updated.entries.is_empty());
        assert!(updated.is_finalized);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let repo = InMemoryDutyScheduleRepository::new();
        let p = payload("May 2025", date(2025, 4, 26), date(2025, 5, 25));

        assert!(matches!(repo.update(9, p).await, Err(RepositoryError::NotFound(_))));
        assert!(matches!(repo.delete(9).await, Err(RepositoryError::NotFound(_))));
        assert!(matches!(repo.set_finalized(9, true).await, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_dates_conflict() {
        let repo = InMemoryDutyScheduleRepository::new();
        let mut p = payload("May 2025", date(2025, 4, 26), date(2025, 5, 25));
        p.entries.push(p.entries[0].clone());

        assert!(matches!(repo.create(p).await, Err(RepositoryError::Conflict(_))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryDutyScheduleRepository::new();
        repo.create(payload("May 2025", date(2025, 4, 26), date(2025, 5, 25)))
            .await
            .unwrap();
        repo.create(payload("June 2025", date(2025, 5, 26), date(2025, 6, 25)))
            .await
            .unwrap();
        repo.create(payload("April 2025", date(2025, 3, 26), date(2025, 4, 25)))
            .await
            .unwrap();

        let first_page = repo.list(Pagination::page(1, 2)).await.unwrap();
        let names: Vec<_> = first_page.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["June 2025", "May 2025"]);

        let second_page = repo.list(Pagination::page(2, 2)).await.unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(repo.count().await.unwrap(), 3);

        repo.delete(2).await.unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_seeded_ids_continue() {
        let mut seeded = DutySchedule::draft("March 2025", date(2025, 2, 26), date(2025, 3, 25));
        seeded.id = Some(41);
        let repo = InMemoryDutyScheduleRepository::with_schedules(vec![seeded]);

        let created = repo
            .create(payload("April 2025", date(2025, 3, 26), date(2025, 4, 25)))
            .await
            .unwrap();
        assert_eq!(created.id, Some(42));
    }
}

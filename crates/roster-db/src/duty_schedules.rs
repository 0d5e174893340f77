//! Duty schedule repository
//!
//! A roster lives in `duty_schedules`; each of its dates is one row of
//! `duty_schedule_entries` whose `employee_schedules` column holds the
//! assignments as JSONB with bare ids.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use roster_core::traits::Id;
use roster_models::{
    DutyEntry, DutyEntryPayload, DutySchedule, DutySchedulePayload, EmployeeSchedulePayload, Reference,
};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::repository::{DutyScheduleRepository, Pagination, RepositoryError, RepositoryResult};

/// Duty schedule database entity
#[derive(Debug, Clone, FromRow)]
pub struct DutyScheduleRow {
    pub id: i64,
    pub name: String,
    pub department_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_finalized: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One date of a roster
#[derive(Debug, Clone, FromRow)]
pub struct DutyEntryRow {
    pub duty_schedule_id: i64,
    pub date: NaiveDate,
    pub employee_schedules: Json<Vec<EmployeeSchedulePayload>>,
}

impl DutyScheduleRow {
    fn into_schedule(self, entries: Vec<DutyEntry>) -> DutySchedule {
        let mut schedule = DutySchedule::draft(self.name, self.start_date, self.end_date);
        schedule.id = Some(self.id);
        schedule.department = self.department_id.map(Reference::Id);
        schedule.entries = entries;
        schedule.is_finalized = self.is_finalized;
        schedule.created_at = Some(self.created_at);
        schedule.updated_at = Some(self.updated_at);
        schedule
    }
}

impl From<DutyEntryRow> for DutyEntry {
    fn from(row: DutyEntryRow) -> Self {
        let payload = DutyEntryPayload {
            date: row.date,
            employee_schedules: row.employee_schedules.0,
        };
        DutyEntry::from(&payload)
    }
}

const SCHEDULE_COLUMNS: &str =
    "id, name, department_id, start_date, end_date, is_finalized, created_at, updated_at";

/// PostgreSQL duty schedule repository
pub struct PgDutyScheduleRepository {
    pool: PgPool,
}

impl PgDutyScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Entries of the given rosters, grouped by roster and ordered by date
    async fn load_entries(&self, ids: &[Id]) -> RepositoryResult<HashMap<Id, Vec<DutyEntry>>> {
        let rows = sqlx::query_as::<_, DutyEntryRow>(
            r#"
            SELECT duty_schedule_id, date, employee_schedules
            FROM duty_schedule_entries
            WHERE duty_schedule_id = ANY($1)
            ORDER BY duty_schedule_id, date ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Id, Vec<DutyEntry>> = HashMap::new();
        for row in rows {
            grouped.entry(row.duty_schedule_id).or_default().push(row.into());
        }
        Ok(grouped)
    }

    async fn with_entries(&self, rows: Vec<DutyScheduleRow>) -> RepositoryResult<Vec<DutySchedule>> {
        let ids: Vec<Id> = rows.iter().map(|r| r.id).collect();
        let mut entries = self.load_entries(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let schedule_entries = entries.remove(&row.id).unwrap_or_default();
                row.into_schedule(schedule_entries)
            })
            .collect())
    }

    async fn insert_entries(
        tx: &mut Transaction<'_, Postgres>,
        schedule_id: Id,
        entries: &[DutyEntryPayload],
    ) -> RepositoryResult<()> {
        for entry in entries.iter().filter(|e| !e.employee_schedules.is_empty()) {
            sqlx::query(
                r#"
                INSERT INTO duty_schedule_entries (duty_schedule_id, date, employee_schedules)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(schedule_id)
            .bind(entry.date)
            .bind(Json(&entry.employee_schedules))
            .execute(&mut **tx)
            .await
            .map_err(RepositoryError::from_write)?;
        }
        Ok(())
    }
}

#[async_trait]
impl DutyScheduleRepository for PgDutyScheduleRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<DutySchedule>> {
        let row = sqlx::query_as::<_, DutyScheduleRow>(&format!(
            "SELECT {} FROM duty_schedules WHERE id = $1",
            SCHEDULE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_entries(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, pagination: Pagination) -> RepositoryResult<Vec<DutySchedule>> {
        let rows = sqlx::query_as::<_, DutyScheduleRow>(&format!(
            "SELECT {} FROM duty_schedules ORDER BY start_date DESC, id DESC LIMIT $1 OFFSET $2",
            SCHEDULE_COLUMNS
        ))
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&self.pool)
        .await?;

        self.with_entries(rows).await
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM duty_schedules")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, payload: DutySchedulePayload) -> RepositoryResult<DutySchedule> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DutyScheduleRow>(&format!(
            r#"
            INSERT INTO duty_schedules (name, department_id, start_date, end_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {}
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(&payload.name)
        .bind(payload.department)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::from_write)?;

        Self::insert_entries(&mut tx, row.id, &payload.entries).await?;
        tx.commit().await?;

        tracing::info!(
            schedule_id = row.id,
            entries = payload.entries.len(),
            "Duty schedule created"
        );
        Ok(stored(row.id, &payload, &row))
    }

    async fn update(&self, id: Id, payload: DutySchedulePayload) -> RepositoryResult<DutySchedule> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DutyScheduleRow>(&format!(
            r#"
            UPDATE duty_schedules SET
                name = $1,
                department_id = $2,
                start_date = $3,
                end_date = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(&payload.name)
        .bind(payload.department)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or_else(|| RepositoryError::not_found(id))?;

        sqlx::query("DELETE FROM duty_schedule_entries WHERE duty_schedule_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::insert_entries(&mut tx, id, &payload.entries).await?;
        tx.commit().await?;

        tracing::info!(
            schedule_id = id,
            entries = payload.entries.len(),
            "Duty schedule updated"
        );
        Ok(stored(id, &payload, &row))
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM duty_schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(id));
        }

        tracing::info!(schedule_id = id, "Duty schedule deleted");
        Ok(())
    }

    async fn set_finalized(&self, id: Id, finalized: bool) -> RepositoryResult<DutySchedule> {
        let updated = sqlx::query("UPDATE duty_schedules SET is_finalized = $1, updated_at = NOW() WHERE id = $2")
            .bind(finalized)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::not_found(id));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(id))
    }
}

/// Stored form of a just-written payload
fn stored(id: Id, payload: &DutySchedulePayload, row: &DutyScheduleRow) -> DutySchedule {
    let mut schedule = DutySchedule::from_payload(Some(id), payload);
    schedule.is_finalized = row.is_finalized;
    schedule.created_at = Some(row.created_at);
    schedule.updated_at = Some(row.updated_at);
    schedule.entries.retain(|e| !e.is_empty());
    schedule
}

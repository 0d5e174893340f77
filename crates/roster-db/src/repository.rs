//! Repository traits and shared types
//!
//! [`DutyScheduleRepository`] is the persistence adapter the services talk to.
//! Both the PostgreSQL and the in-memory implementation live in this crate.

use async_trait::async_trait;
use roster_core::error::{RosterError, ValidationErrors};
use roster_core::traits::Id;
use roster_models::{DutySchedule, DutySchedulePayload};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    pub fn not_found(id: Id) -> Self {
        RepositoryError::NotFound(format!("DutySchedule with id={}", id))
    }

    /// Unique violations become conflicts; everything else stays a database error
    pub fn from_write(err: sqlx::Error) -> Self {
        let unique_violation = err
            .as_database_error()
            .and_then(|e| e.code())
            .is_some_and(|code| code == "23505");

        if unique_violation {
            RepositoryError::Conflict(err.to_string())
        } else {
            RepositoryError::Database(err)
        }
    }
}

impl From<RepositoryError> for RosterError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => RosterError::NotFound {
                entity: "DutySchedule",
                field: "id",
                value: what,
            },
            RepositoryError::Database(e) => RosterError::Database(e.to_string()),
            RepositoryError::Validation(message) => {
                let mut errors = ValidationErrors::new();
                errors.add_base(message);
                RosterError::Validation(errors)
            }
            RepositoryError::Conflict(message) => RosterError::Conflict { message },
        }
    }
}

/// Persistence adapter for duty schedules
#[async_trait]
pub trait DutyScheduleRepository: Send + Sync {
    /// Find a roster with its entries
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<DutySchedule>>;

    /// Rosters ordered by start date, newest first
    async fn list(&self, pagination: Pagination) -> RepositoryResult<Vec<DutySchedule>>;

    async fn count(&self) -> RepositoryResult<i64>;

    /// Store a new roster; entries are written with it
    async fn create(&self, payload: DutySchedulePayload) -> RepositoryResult<DutySchedule>;

    /// Replace a roster's attributes and its full entry set
    async fn update(&self, id: Id, payload: DutySchedulePayload) -> RepositoryResult<DutySchedule>;

    async fn delete(&self, id: Id) -> RepositoryResult<()>;

    /// Set the externally owned lock flag
    async fn set_finalized(&self, id: Id, finalized: bool) -> RepositoryResult<DutySchedule>;

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// Pagination parameters for queries
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// 1-based page
    pub fn page(page: i64, per_page: i64) -> Self {
        Self {
            limit: per_page,
            offset: (page.max(1) - 1) * per_page,
        }
    }
}

/// Query result with pagination metadata
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            limit: pagination.limit,
            offset: pagination.offset,
        }
    }

    pub fn page(&self) -> i64 {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }

    pub fn total_pages(&self) -> i64 {
        if self.limit == 0 {
            1
        } else {
            (self.total + self.limit - 1) / self.limit
        }
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.limit < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }
}

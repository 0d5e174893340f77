//! # roster-db
//!
//! Persistence layer for duty rosters.
//!
//! - Connection pool management and the bundled schema
//! - The [`DutyScheduleRepository`] persistence adapter
//! - PostgreSQL and in-memory implementations of it
//!
//! ## Example
//!
//! ```ignore
//! use roster_core::config::AppConfig;
//! use roster_db::{Database, DutyScheduleRepository, PgDutyScheduleRepository};
//!
//! let config = AppConfig::from_env()?;
//! let db = Database::connect(&config.database).await?;
//!
//! let repo = PgDutyScheduleRepository::new(db.pool().clone());
//! let schedule = repo.find_by_id(1).await?;
//! ```

pub mod pool;
pub mod repository;
pub mod duty_schedules;
pub mod memory;

// Re-exports
pub use pool::Database;
pub use repository::{
    DutyScheduleRepository, Pagination, PaginatedResult, RepositoryError, RepositoryResult,
};
pub use duty_schedules::{DutyEntryRow, DutyScheduleRow, PgDutyScheduleRepository};
pub use memory::InMemoryDutyScheduleRepository;

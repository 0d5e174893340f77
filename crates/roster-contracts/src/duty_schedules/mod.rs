//! Duty schedule contracts
//!
//! - base: shape of a save payload (name, bounds, entries)
//! - create: base plus the create-scope rule for entry dates
//! - update: base plus the pinned period of a stored roster
//! - delete: finalized rosters stay

mod base;
mod create;
mod update;
mod delete;

pub use base::DutyScheduleBaseContract;
pub use create::CreateDutyScheduleContract;
pub use update::UpdateDutyScheduleContract;
pub use delete::DeleteDutyScheduleContract;

/// Longest accepted remarks text
pub const MAX_REMARKS_LENGTH: usize = 500;

//! # roster-contracts
//!
//! Contract validation for the duty roster.
//!
//! Contracts check a payload before it is handed to persistence. Every
//! violation is collected into one [`ValidationErrors`](roster_core::error::ValidationErrors)
//! so the caller can report them together.

pub mod base;
pub mod duty_schedules;

pub use base::*;
pub use duty_schedules::{
    CreateDutyScheduleContract, DeleteDutyScheduleContract, DutyScheduleBaseContract,
    UpdateDutyScheduleContract,
};

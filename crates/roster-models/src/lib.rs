//! # roster-models
//!
//! Domain models for the duty roster.
//!
//! Reference records (employees, work schedules, departments, holidays) are read-only
//! inputs supplied by the HR system; `DutySchedule` is the aggregate the roster builder
//! edits and persists.

pub use roster_core::traits::{Id, Identifiable, Lockable, Timestamped};

pub mod reference;
pub mod employee;
pub mod work_schedule;
pub mod department;
pub mod holiday;
pub mod duty_schedule;

pub use reference::Reference;
pub use employee::{Employee, PersonalInformation};
pub use work_schedule::{ScheduleType, WorkSchedule};
pub use department::Department;
pub use holiday::Holiday;
pub use duty_schedule::{
    DutyEntry, DutyEntryPayload, DutySchedule, DutySchedulePayload, EmployeeSchedule,
    EmployeeSchedulePayload,
};

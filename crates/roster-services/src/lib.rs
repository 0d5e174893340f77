//! # roster-services
//!
//! Business operations over stored duty schedules.
//!
//! Services check a payload against its contract before touching the
//! repository and answer with a [`ServiceResult`]. [`RosterSession`] drives a
//! single roster through editing and saving.

pub mod result;
pub mod duty_schedules;
pub mod context;
pub mod session;

#[cfg(test)]
mod test_support;

pub use result::ServiceResult;
pub use duty_schedules::{
    CreatedDutySchedule, DeleteDutyScheduleService, CreateDutyScheduleService, DutyScheduleService,
    UpdateDutyScheduleService, UpdatedDutySchedule,
};
pub use context::{load_holidays, load_reference_data, RosterContext};
pub use session::{Notification, NotificationKind, RosterSession, SaveRequest};

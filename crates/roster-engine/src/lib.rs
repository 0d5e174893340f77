//! # roster-engine
//!
//! The duty roster builder's logic, free of I/O:
//!
//! - [`period`]: 26th-to-25th pay periods and canonical date keys
//! - [`calendar`]: day grids with weekend and holiday flags
//! - [`assignments`]: per-date assignment store with one shift per employee per date
//! - [`navigator`]: month paging that keeps edits made in other periods
//! - [`state`]: the roster reducer tying the pieces together
//!
//! "Today" and the holiday table are always passed in, never read from ambient state.

pub mod period;
pub mod calendar;
pub mod assignments;
pub mod navigator;
pub mod clock;
pub mod state;

pub use period::{compute_period, date_in_timezone, format_date_key, parse_date_key, PayPeriod};
pub use calendar::{build_days, is_weekend, leading_blanks, CalendarDay, CalendarGrid, HolidayTable};
pub use assignments::{AssignmentChange, AssignmentStore, ReferenceData, ResolvedAssignment, ShiftDisplay};
pub use navigator::{NavigationOutcome, PeriodNavigator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use state::{reduce, RosterAction, RosterMode, RosterState, Transition};

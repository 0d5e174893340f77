//! Roster builder state and its reducer
//!
//! Every user interaction is a [`RosterAction`]. [`reduce`] maps a state and an
//! action to the next state without side effects; `today` is passed in so the
//! navigation floor stays deterministic.

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::config::CreateScope;
use roster_core::error::ValidationErrors;
use roster_core::traits::Id;
use roster_models::{DutySchedule, DutySchedulePayload, Reference};
use serde::{Deserialize, Serialize};

use crate::assignments::{AssignmentChange, AssignmentStore, ReferenceData, ResolvedAssignment, ShiftDisplay};
use crate::calendar::{CalendarGrid, HolidayTable};
use crate::navigator::{NavigationOutcome, PeriodNavigator};
use crate::period::PayPeriod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterMode {
    /// New roster, pageable month by month
    Create,
    /// Stored roster, pinned to its own dates
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterAction {
    AddAssignment {
        date: NaiveDate,
        employee_id: Option<Id>,
        work_schedule_id: Option<Id>,
        remarks: Option<String>,
    },
    RemoveAssignment {
        date: NaiveDate,
        employee_id: Id,
    },
    NextMonth,
    PreviousMonth,
    SetDepartment(Option<Id>),
}

/// What an applied action changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Assignment(AssignmentChange),
    Removed(bool),
    Navigation(NavigationOutcome),
    DepartmentChanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterState {
    id: Option<Id>,
    /// Stored name; create mode names the roster after its period
    loaded_name: Option<String>,
    department: Option<Id>,
    is_finalized: bool,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    navigator: PeriodNavigator,
}

impl RosterState {
    /// Fresh create-mode roster over the period containing `today`
    pub fn new_draft(today: NaiveDate) -> Self {
        Self {
            id: None,
            loaded_name: None,
            department: None,
            is_finalized: false,
            created_at: None,
            updated_at: None,
            navigator: PeriodNavigator::new_create(today),
        }
    }

    /// Edit-mode state over a loaded roster
    pub fn from_schedule(schedule: &DutySchedule) -> Self {
        Self {
            id: schedule.id,
            loaded_name: Some(schedule.name.clone()),
            department: schedule.department_id(),
            is_finalized: schedule.is_finalized,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
            navigator: PeriodNavigator::new_edit(
                schedule.start_date,
                schedule.end_date,
                schedule.entries.iter().cloned(),
            ),
        }
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn mode(&self) -> RosterMode {
        self.navigator.mode()
    }

    pub fn period(&self) -> &PayPeriod {
        self.navigator.period()
    }

    pub fn name(&self) -> String {
        match (&self.loaded_name, self.mode()) {
            (Some(name), RosterMode::Edit) => name.clone(),
            _ => self.period().label(),
        }
    }

    pub fn department(&self) -> Option<Id> {
        self.department
    }

    pub fn is_finalized(&self) -> bool {
        self.is_finalized
    }

    /// Assignments of the displayed period
    pub fn assignments(&self) -> &AssignmentStore {
        self.navigator.draft()
    }

    pub fn assignments_on(
        &self,
        date: NaiveDate,
        refs: &ReferenceData,
        display: &ShiftDisplay,
    ) -> Vec<ResolvedAssignment> {
        self.navigator.draft().get_assignments(date, refs, display)
    }

    pub fn grid(&self, holidays: &HolidayTable) -> CalendarGrid {
        CalendarGrid::build(self.period(), holidays)
    }

    /// Apply `action` in place
    ///
    /// Validation failures leave the state untouched.
    pub fn apply(&mut self, action: &RosterAction, today: NaiveDate) -> Result<Transition, ValidationErrors> {
        if let RosterAction::AddAssignment { date, .. } | RosterAction::RemoveAssignment { date, .. } = action {
            self.check_editable(*date)?;
        }

        let transition = match action {
            RosterAction::AddAssignment {
                date,
                employee_id,
                work_schedule_id,
                remarks,
            } => Transition::Assignment(self.navigator.draft_mut().add_or_update(
                *date,
                *employee_id,
                *work_schedule_id,
                remarks.clone(),
            )?),
            RosterAction::RemoveAssignment { date, employee_id } => {
                Transition::Removed(self.navigator.draft_mut().remove(*date, *employee_id))
            }
            RosterAction::NextMonth => Transition::Navigation(self.navigator.next_month()),
            RosterAction::PreviousMonth => Transition::Navigation(self.navigator.previous_month(today)),
            RosterAction::SetDepartment(department) => {
                self.department = *department;
                Transition::DepartmentChanged
            }
        };

        tracing::debug!(
            schedule_id = ?self.id,
            period = %self.period().label(),
            ?transition,
            "Applied roster action"
        );
        Ok(transition)
    }

    /// Create mode only edits the displayed period; edit mode edits any loaded date
    fn check_editable(&self, date: NaiveDate) -> Result<(), ValidationErrors> {
        if self.mode() == RosterMode::Create && !self.period().contains(date) {
            return Err(ValidationErrors::single("date", "is outside the displayed period"));
        }
        Ok(())
    }

    /// The in-memory aggregate, every accumulated entry included
    pub fn draft(&self) -> DutySchedule {
        let period = self.period();
        let mut schedule = DutySchedule::draft(self.name(), period.start_date, period.end_date);
        schedule.id = self.id;
        schedule.department = self.department.map(Reference::Id);
        schedule.entries = self.navigator.accumulated().into_entries();
        schedule.is_finalized = self.is_finalized;
        schedule.created_at = self.created_at;
        schedule.updated_at = self.updated_at;
        schedule
    }

    /// Save payload
    ///
    /// Edit mode always sends every entry. Create mode sends the displayed
    /// period's entries unless `scope` asks for everything accumulated.
    pub fn payload(&self, scope: CreateScope) -> DutySchedulePayload {
        let period = self.period();
        let entries = match (self.mode(), scope) {
            (RosterMode::Create, CreateScope::ActivePeriod) => {
                self.navigator.accumulated().subset(period.range())
            }
            _ => self.navigator.accumulated(),
        };

        DutySchedulePayload {
            name: self.name(),
            department: self.department,
            start_date: period.start_date,
            end_date: period.end_date,
            entries: entries.to_entries().iter().map(|e| e.to_payload()).collect(),
        }
    }
}

/// Next state for `action`; `state` is left as it was
pub fn reduce(state: &RosterState, action: &RosterAction, today: NaiveDate) -> Result<RosterState, ValidationErrors> {
    let mut next = state.clone();
    next.apply(action, today)?;
    Ok(next)
}

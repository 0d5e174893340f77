//! Assignment store
//!
//! Keeps one [`DutyEntry`] per date. Within an entry an employee appears at
//! most once; assigning an employee again replaces their shift in place.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use roster_core::error::ValidationErrors;
use roster_core::traits::Id;
use roster_core::types::{Color, DateRange};
use roster_models::{Department, DutyEntry, Employee, EmployeeSchedule, WorkSchedule};
use serde::{Deserialize, Serialize};

/// Reference lists the roster resolves ids against
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceData {
    pub employees: Vec<Employee>,
    pub work_schedules: Vec<WorkSchedule>,
    pub departments: Vec<Department>,
}

impl ReferenceData {
    pub fn new(
        employees: Vec<Employee>,
        work_schedules: Vec<WorkSchedule>,
        departments: Vec<Department>,
    ) -> Self {
        Self {
            employees,
            work_schedules,
            departments,
        }
    }

    pub fn employee(&self, id: Id) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == Some(id))
    }

    pub fn work_schedule(&self, id: Id) -> Option<&WorkSchedule> {
        self.work_schedules.iter().find(|w| w.id == Some(id))
    }

    pub fn department(&self, id: Id) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == Some(id))
    }

    /// Display color of a work schedule, or the neutral default
    pub fn color_for(&self, work_schedule_id: Option<Id>, display: &ShiftDisplay) -> Color {
        work_schedule_id
            .and_then(|id| self.work_schedule(id))
            .and_then(|w| w.shift_color.clone())
            .unwrap_or_else(|| display.default_color.clone())
    }
}

/// How shift times and colors are rendered
#[derive(Debug, Clone)]
pub struct ShiftDisplay {
    pub timezone: Tz,
    pub default_color: Color,
}

impl Default for ShiftDisplay {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Manila,
            default_color: Color::default(),
        }
    }
}

impl ShiftDisplay {
    pub fn new(timezone: Tz, default_color: Color) -> Self {
        Self {
            timezone,
            default_color,
        }
    }

    fn format_time(&self, time: Option<&DateTime<Utc>>) -> String {
        time.map(|t| t.with_timezone(&self.timezone).format("%I:%M %p").to_string())
            .unwrap_or_else(|| "--".to_string())
    }

    fn format_range(&self, from: Option<&DateTime<Utc>>, to: Option<&DateTime<Utc>>) -> String {
        format!("{} - {}", self.format_time(from), self.format_time(to))
    }

    /// "morning / afternoon" ranges for Standard schedules, one range otherwise
    pub fn time_range(&self, schedule: &WorkSchedule) -> String {
        if schedule.is_standard() {
            format!(
                "{} / {}",
                self.format_range(schedule.morning_in.as_ref(), schedule.morning_out.as_ref()),
                self.format_range(schedule.afternoon_in.as_ref(), schedule.afternoon_out.as_ref()),
            )
        } else {
            self.format_range(schedule.start_time.as_ref(), schedule.end_time.as_ref())
        }
    }
}

/// An assignment with its references resolved for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAssignment {
    pub employee_id: Option<Id>,
    pub employee_name: String,
    pub work_schedule_id: Option<Id>,
    pub shift_label: String,
    pub shift_time_range: String,
    pub shift_color: Color,
    pub remarks: Option<String>,
}

/// What `add_or_update` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentChange {
    Added,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentStore {
    entries: BTreeMap<NaiveDate, DutyEntry>,
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries
    ///
    /// Entries sharing a date are folded together, later assignments winning
    /// per employee, and empty entries are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = DutyEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            for schedule in entry.employee_schedules {
                store.upsert(entry.date, schedule);
            }
        }
        store
    }

    /// Date-ordered entries
    pub fn to_entries(&self) -> Vec<DutyEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn into_entries(self) -> Vec<DutyEntry> {
        self.entries.into_values().collect()
    }

    pub fn entry(&self, date: NaiveDate) -> Option<&DutyEntry> {
        self.entries.get(&date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.keys().copied()
    }

    /// Number of dates with assignments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn assignment_count(&self) -> usize {
        self.entries.values().map(|e| e.employee_schedules.len()).sum()
    }

    /// Assignments on `date`, resolved against the reference lists
    pub fn get_assignments(
        &self,
        date: NaiveDate,
        refs: &ReferenceData,
        display: &ShiftDisplay,
    ) -> Vec<ResolvedAssignment> {
        let Some(entry) = self.entries.get(&date) else {
            return Vec::new();
        };

        entry
            .employee_schedules
            .iter()
            .map(|schedule| {
                let employee_id = schedule.employee_id();
                let work_schedule_id = schedule.work_schedule_id();
                let employee = employee_id
                    .and_then(|id| refs.employee(id))
                    .or_else(|| schedule.employee.populated());
                let work_schedule = work_schedule_id
                    .and_then(|id| refs.work_schedule(id))
                    .or_else(|| schedule.work_schedule.populated());

                ResolvedAssignment {
                    employee_id,
                    employee_name: employee
                        .map(Employee::display_name)
                        .unwrap_or_else(|| "Unknown".to_string()),
                    work_schedule_id,
                    shift_label: work_schedule.map(|w| w.name.clone()).unwrap_or_default(),
                    shift_time_range: work_schedule
                        .map(|w| display.time_range(w))
                        .unwrap_or_default(),
                    shift_color: work_schedule
                        .and_then(|w| w.shift_color.clone())
                        .unwrap_or_else(|| display.default_color.clone()),
                    remarks: schedule.remarks.clone(),
                }
            })
            .collect()
    }

    /// Assign `employee_id` to `work_schedule_id` on `date`
    ///
    /// Both ids are required; nothing changes when either is missing.
    pub fn add_or_update(
        &mut self,
        date: NaiveDate,
        employee_id: Option<Id>,
        work_schedule_id: Option<Id>,
        remarks: Option<String>,
    ) -> Result<AssignmentChange, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if employee_id.is_none() {
            errors.add("employee", "must be selected");
        }
        if work_schedule_id.is_none() {
            errors.add("workSchedule", "must be selected");
        }
        let (Some(employee_id), Some(work_schedule_id)) = (employee_id, work_schedule_id) else {
            return Err(errors);
        };

        let remarks = remarks
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let change = self.upsert(date, EmployeeSchedule::new(employee_id, work_schedule_id, remarks));

        tracing::debug!(%date, employee_id, work_schedule_id, ?change, "Assignment stored");
        Ok(change)
    }

    fn upsert(&mut self, date: NaiveDate, schedule: EmployeeSchedule) -> AssignmentChange {
        let entry = self.entries.entry(date).or_insert_with(|| DutyEntry::new(date));
        let existing = schedule
            .employee_id()
            .and_then(|employee_id| entry.position_of(employee_id));

        match existing {
            Some(index) => {
                let current = &mut entry.employee_schedules[index];
                if current.work_schedule_id() == schedule.work_schedule_id()
                    && current.remarks == schedule.remarks
                {
                    AssignmentChange::Unchanged
                } else {
                    current.work_schedule = schedule.work_schedule;
                    current.remarks = schedule.remarks;
                    AssignmentChange::Updated
                }
            }
            None => {
                entry.employee_schedules.push(schedule);
                AssignmentChange::Added
            }
        }
    }

    /// Drop `employee_id` from `date`; returns whether anything was removed
    pub fn remove(&mut self, date: NaiveDate, employee_id: Id) -> bool {
        let Some(entry) = self.entries.get_mut(&date) else {
            return false;
        };
        let Some(index) = entry.position_of(employee_id) else {
            return false;
        };

        entry.employee_schedules.remove(index);
        if entry.is_empty() {
            self.entries.remove(&date);
        }
        tracing::debug!(%date, employee_id, "Assignment removed");
        true
    }

    /// Dates `employee_id` is on, with their shift
    pub fn assignments_for_employee(&self, employee_id: Id) -> Vec<(NaiveDate, &EmployeeSchedule)> {
        self.entries
            .values()
            .filter_map(|entry| {
                entry
                    .position_of(employee_id)
                    .map(|index| (entry.date, &entry.employee_schedules[index]))
            })
            .collect()
    }

    fn entries_in(&self, range: DateRange) -> impl Iterator<Item = (NaiveDate, DutyEntry)> + '_ {
        // BTreeMap::range panics on an inverted range
        let inner = range
            .is_valid()
            .then(|| self.entries.range(range.start_date..=range.end_date));
        inner
            .into_iter()
            .flatten()
            .map(|(date, entry)| (*date, entry.clone()))
    }

    /// Copy of the entries inside `range`
    pub fn subset(&self, range: DateRange) -> AssignmentStore {
        Self {
            entries: self.entries_in(range).collect(),
        }
    }

    /// Replace everything inside `range` with the entries of `other` inside `range`
    pub fn replace_range(&mut self, range: DateRange, other: &AssignmentStore) {
        self.entries.retain(|date, _| !range.contains(*date));
        self.entries.extend(other.entries_in(range));
    }
}

//! Duty schedule (roster) model
//!
//! Tables: duty_schedules, duty_schedule_entries

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::traits::{Id, Identifiable, Lockable, Timestamped};
use roster_core::types::DateRange;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Department, Employee, Reference, WorkSchedule};

/// Duty schedule aggregate
///
/// One roster covers one pay period. `entries` holds one [`DutyEntry`] per date
/// that has at least one assignment, ordered by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DutySchedule {
    #[serde(default)]
    pub id: Option<Id>,

    /// Period label, e.g. "May 2025"
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub department: Option<Reference<Department>>,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default)]
    pub entries: Vec<DutyEntry>,

    /// Lock flag owned by the approval workflow
    #[serde(default)]
    pub is_finalized: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Assignments for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub employee_schedules: Vec<EmployeeSchedule>,
}

/// One employee's shift on a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSchedule {
    pub employee: Reference<Employee>,
    pub work_schedule: Reference<WorkSchedule>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Body of a create or update request
///
/// Dates serialize as `YYYY-MM-DD` and references as bare ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutySchedulePayload {
    pub name: String,
    pub department: Option<Id>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub entries: Vec<DutyEntryPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyEntryPayload {
    pub date: NaiveDate,
    pub employee_schedules: Vec<EmployeeSchedulePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSchedulePayload {
    pub employee: Id,
    pub work_schedule: Id,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl EmployeeSchedule {
    pub fn new(employee: Id, work_schedule: Id, remarks: Option<String>) -> Self {
        Self {
            employee: Reference::Id(employee),
            work_schedule: Reference::Id(work_schedule),
            remarks,
        }
    }

    pub fn employee_id(&self) -> Option<Id> {
        self.employee.id()
    }

    pub fn work_schedule_id(&self) -> Option<Id> {
        self.work_schedule.id()
    }

    /// Wire form; `None` when either reference has no id
    pub fn to_payload(&self) -> Option<EmployeeSchedulePayload> {
        Some(EmployeeSchedulePayload {
            employee: self.employee_id()?,
            work_schedule: self.work_schedule_id()?,
            remarks: self.remarks.clone(),
        })
    }
}

impl From<&EmployeeSchedulePayload> for EmployeeSchedule {
    fn from(payload: &EmployeeSchedulePayload) -> Self {
        EmployeeSchedule::new(payload.employee, payload.work_schedule, payload.remarks.clone())
    }
}

impl DutyEntry {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            employee_schedules: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.employee_schedules.is_empty()
    }

    pub fn position_of(&self, employee_id: Id) -> Option<usize> {
        self.employee_schedules
            .iter()
            .position(|s| s.employee.refers_to(employee_id))
    }

    pub fn to_payload(&self) -> DutyEntryPayload {
        DutyEntryPayload {
            date: self.date,
            employee_schedules: self
                .employee_schedules
                .iter()
                .filter_map(EmployeeSchedule::to_payload)
                .collect(),
        }
    }
}

impl From<&DutyEntryPayload> for DutyEntry {
    fn from(payload: &DutyEntryPayload) -> Self {
        DutyEntry {
            date: payload.date,
            employee_schedules: payload.employee_schedules.iter().map(Into::into).collect(),
        }
    }
}

impl DutySchedule {
    /// Unsaved roster for a period
    pub fn draft(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            department: None,
            start_date,
            end_date,
            entries: Vec::new(),
            is_finalized: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Materialize a stored roster from a payload
    pub fn from_payload(id: Option<Id>, payload: &DutySchedulePayload) -> Self {
        let mut schedule = Self::draft(payload.name.clone(), payload.start_date, payload.end_date);
        schedule.id = id;
        schedule.department = payload.department.map(Reference::Id);
        schedule.entries = payload.entries.iter().map(Into::into).collect();
        schedule.sort_entries();
        schedule
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn department_id(&self) -> Option<Id> {
        self.department.as_ref().and_then(Reference::id)
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<&DutyEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn sort_entries(&mut self) {
        self.entries.sort_by_key(|e| e.date);
    }

    /// Flat (date, employee, work schedule, remarks) view, order independent
    pub fn assignment_tuples(&self) -> BTreeSet<(NaiveDate, Id, Id, Option<String>)> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry.employee_schedules.iter().filter_map(move |s| {
                    Some((
                        entry.date,
                        s.employee_id()?,
                        s.work_schedule_id()?,
                        s.remarks.clone(),
                    ))
                })
            })
            .collect()
    }

    pub fn assignment_count(&self) -> usize {
        self.entries.iter().map(|e| e.employee_schedules.len()).sum()
    }

    /// Payload carrying every entry of this roster
    pub fn to_payload(&self) -> DutySchedulePayload {
        DutySchedulePayload {
            name: self.name.clone(),
            department: self.department_id(),
            start_date: self.start_date,
            end_date: self.end_date,
            entries: self.entries.iter().map(DutyEntry::to_payload).collect(),
        }
    }
}

impl DutySchedulePayload {
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn assignment_count(&self) -> usize {
        self.entries.iter().map(|e| e.employee_schedules.len()).sum()
    }
}

impl Identifiable for DutySchedule {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for DutySchedule {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Lockable for DutySchedule {
    fn is_locked(&self) -> bool {
        self.is_finalized
    }
}

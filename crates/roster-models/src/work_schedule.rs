//! Work schedule (shift template) model
//!
//! Table: work_schedules

use chrono::{DateTime, Utc};
use roster_core::traits::{Id, Identifiable, Timestamped};
use roster_core::types::Color;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Shift template assignable to an employee on a date
///
/// Shift times are stored as UTC timestamps; only their time of day in the
/// display timezone is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkSchedule {
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,

    /// Split-shift times, used by `Standard` schedules
    pub morning_in: Option<DateTime<Utc>>,
    pub morning_out: Option<DateTime<Utc>>,
    pub afternoon_in: Option<DateTime<Utc>>,
    pub afternoon_out: Option<DateTime<Utc>>,

    /// Continuous-shift times, used by every other type
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,

    pub shift_color: Option<Color>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Kind of work schedule
///
/// The HR system only distinguishes "Standard" (four time fields) from
/// everything else, so any other label is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScheduleType {
    Standard,
    Other(String),
}

impl Default for ScheduleType {
    fn default() -> Self {
        ScheduleType::Standard
    }
}

impl From<String> for ScheduleType {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("standard") {
            ScheduleType::Standard
        } else {
            ScheduleType::Other(value)
        }
    }
}

impl From<ScheduleType> for String {
    fn from(value: ScheduleType) -> Self {
        match value {
            ScheduleType::Standard => "Standard".to_string(),
            ScheduleType::Other(label) => label,
        }
    }
}

impl WorkSchedule {
    pub fn new(id: Id, name: impl Into<String>, schedule_type: ScheduleType) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            schedule_type,
            ..Default::default()
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self.schedule_type, ScheduleType::Standard)
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.shift_color = Some(Color::new(color));
        self
    }
}

impl Identifiable for WorkSchedule {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for WorkSchedule {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_type_from_wire() {
        let standard: WorkSchedule =
            serde_json::from_str(r#"{"id": 1, "name": "Day", "type": "Standard"}"#).unwrap();
        let night: WorkSchedule =
            serde_json::from_str(r#"{"id": 2, "name": "Night", "type": "Shifting"}"#).unwrap();

        assert!(standard.is_standard());
        assert_eq!(night.schedule_type, ScheduleType::Other("Shifting".into()));
    }

    #[test]
    fn test_schedule_type_round_trips_label() {
        let json = serde_json::to_value(ScheduleType::Other("On-call".into())).unwrap();
        assert_eq!(json, serde_json::json!("On-call"));
    }

    #[test]
    fn test_validation_requires_name() {
        let schedule = WorkSchedule::new(1, "", ScheduleType::Standard);
        assert!(schedule.validate().is_err());
        assert!(WorkSchedule::new(1, "Day", ScheduleType::Standard).validate().is_ok());
    }
}

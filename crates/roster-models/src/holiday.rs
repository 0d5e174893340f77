//! Holiday reference data
//!
//! Holidays only annotate the calendar; they never block an assignment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named non-working day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// Regular and special non-working days observed in 2025
const HOLIDAYS_2025: &[(u32, u32, &str)] = &[
    (1, 1, "New Year's Day"),
    (1, 29, "Chinese New Year"),
    (4, 1, "Eid'l Fitr"),
    (4, 9, "Araw ng Kagitingan"),
    (4, 17, "Maundy Thursday"),
    (4, 18, "Good Friday"),
    (4, 19, "Black Saturday"),
    (5, 1, "Labor Day"),
    (6, 6, "Eid'l Adha"),
    (6, 12, "Independence Day"),
    (8, 21, "Ninoy Aquino Day"),
    (8, 25, "National Heroes Day"),
    (10, 31, "All Saints' Day Eve"),
    (11, 1, "All Saints' Day"),
    (11, 30, "Bonifacio Day"),
    (12, 8, "Feast of the Immaculate Conception"),
    (12, 24, "Christmas Eve"),
    (12, 25, "Christmas Day"),
    (12, 30, "Rizal Day"),
    (12, 31, "Last Day of the Year"),
];

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }

    /// Built-in table for 2025
    pub fn table_2025() -> Vec<Holiday> {
        HOLIDAYS_2025
            .iter()
            .filter_map(|&(month, day, name)| {
                NaiveDate::from_ymd_opt(2025, month, day).map(|date| Holiday::new(date, name))
            })
            .collect()
    }

    /// Parse a JSON list of `{"date": "YYYY-MM-DD", "name": "..."}`
    pub fn parse_list(json: &str) -> Result<Vec<Holiday>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

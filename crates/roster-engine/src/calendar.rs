//! Calendar grid builder
//!
//! Expands a period into calendar days for a seven-column, Sunday-first grid.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use roster_models::Holiday;
use serde::Serialize;

use crate::period::{format_date_key, PayPeriod};

/// Every date from `start` through `end`, stepping one calendar day
///
/// Empty when `start > end`.
pub fn build_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Sunday = 0 .. Saturday = 6
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// Empty cells before the first day in a Sunday-first grid
pub fn leading_blanks(start: NaiveDate) -> usize {
    weekday_index(start)
}

/// Holidays keyed by date
#[derive(Debug, Clone, Default)]
pub struct HolidayTable {
    by_date: BTreeMap<NaiveDate, String>,
}

impl HolidayTable {
    pub fn new(holidays: impl IntoIterator<Item = Holiday>) -> Self {
        Self {
            by_date: holidays.into_iter().map(|h| (h.date, h.name)).collect(),
        }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    pub fn name_for(&self, date: NaiveDate) -> Option<&str> {
        self.by_date.get(&date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Weekend or holiday
    pub fn should_highlight(&self, date: NaiveDate) -> bool {
        is_weekend(date) || self.is_holiday(date)
    }
}

impl FromIterator<Holiday> for HolidayTable {
    fn from_iter<I: IntoIterator<Item = Holiday>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// One annotated grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub key: String,
    pub weekday_index: usize,
    pub is_weekend: bool,
    pub holiday: Option<String>,
}

impl CalendarDay {
    pub fn is_holiday(&self) -> bool {
        self.holiday.is_some()
    }

    pub fn highlighted(&self) -> bool {
        self.is_weekend || self.is_holiday()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    pub leading_blanks: usize,
    pub days: Vec<CalendarDay>,
}

impl CalendarGrid {
    pub fn build(period: &PayPeriod, holidays: &HolidayTable) -> Self {
        let days = build_days(period.start_date, period.end_date)
            .into_iter()
            .map(|date| CalendarDay {
                date,
                key: format_date_key(date),
                weekday_index: weekday_index(date),
                is_weekend: is_weekend(date),
                holiday: holidays.name_for(date).map(str::to_string),
            })
            .collect();

        Self {
            leading_blanks: leading_blanks(period.start_date),
            days,
        }
    }

    /// Rows of seven cells; `None` pads the first and last rows
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut cells: Vec<Option<&CalendarDay>> = vec![None; self.leading_blanks];
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(<[_]>::to_vec).collect()
    }
}

//! Pay-period calculator
//!
//! A roster covers the 26th of the previous month through the 25th of the
//! reference month, and is named after the reference month.

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use roster_core::types::DateRange;
use serde::{Deserialize, Serialize};

/// Day of the previous month a period starts on
pub const PERIOD_START_DAY: u32 = 26;
/// Day of the reference month a period ends on
pub const PERIOD_END_DAY: u32 = 25;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPeriod {
    /// Date the period was derived from; names the period
    pub reference: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Period containing the 25th of `reference`'s month
///
/// `None` when the previous month falls outside chrono's date range.
pub fn compute_period(reference: NaiveDate) -> Option<PayPeriod> {
    let end_date = reference.with_day(PERIOD_END_DAY)?;
    let start_date = shift_months(end_date, -1)?.with_day(PERIOD_START_DAY)?;

    Some(PayPeriod {
        reference,
        start_date,
        end_date,
    })
}

impl PayPeriod {
    /// Period over explicit bounds, as loaded from a stored roster
    ///
    /// The end date names the period.
    pub fn from_bounds(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            reference: end_date,
            start_date,
            end_date,
        }
    }

    /// "Month YYYY" of the reference date
    pub fn label(&self) -> String {
        self.reference.format("%B %Y").to_string()
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range().contains(date)
    }

    pub fn num_days(&self) -> i64 {
        self.range().num_days()
    }

    /// Period `months` calendar months away; `None` past the representable range
    pub fn shifted(&self, months: i32) -> Option<PayPeriod> {
        shift_months(self.reference, months).and_then(compute_period)
    }
}

/// Canonical `YYYY-MM-DD` key for a calendar date
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT).ok()
}

/// Calendar date of `timestamp` as seen in `tz`
pub fn date_in_timezone<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// Move by whole calendar months, clamping the day to the target month's length
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

/// Months since year 0, for comparing (year, month) pairs
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

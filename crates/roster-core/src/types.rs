//! Common value types used throughout the roster

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Whether `date` falls within the range, both ends included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of calendar days covered; zero for an inverted range
    pub fn num_days(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1).max(0)
    }

    pub fn is_valid(&self) -> bool {
        self.start_date <= self.end_date
    }
}

/// Display color (hex code) for shifts and calendar markers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    /// Neutral gray used when a shift has no color configured
    pub const NEUTRAL: &'static str = "#9E9E9E";

    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Basic `#RGB` / `#RRGGBB` check
    pub fn is_valid_hex(&self) -> bool {
        let Some(digits) = self.0.strip_prefix('#') else {
            return false;
        };
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(Self::NEUTRAL.to_string())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_contains_both_ends() {
        let range = DateRange::new(date(2025, 4, 26), date(2025, 5, 25));
        assert!(range.contains(date(2025, 4, 26)));
        assert!(range.contains(date(2025, 5, 25)));
        assert!(!range.contains(date(2025, 5, 26)));
        assert_eq!(range.num_days(), 30);
    }

    #[test]
    fn test_inverted_range() {
        let range = DateRange::new(date(2025, 5, 25), date(2025, 4, 26));
        assert!(!range.is_valid());
        assert_eq!(range.num_days(), 0);
    }

    #[test]
    fn test_color() {
        assert!(Color::new("#1A67A3").is_valid_hex());
        assert!(Color::new("#fff").is_valid_hex());
        assert!(!Color::new("blue").is_valid_hex());
        assert_eq!(Color::default().as_str(), Color::NEUTRAL);
    }
}

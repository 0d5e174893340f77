//! Reference data and display settings a roster session renders with

use std::path::Path;

use roster_core::config::RosterConfig;
use roster_core::error::RosterError;
use roster_core::result::RosterResult;
use roster_engine::{HolidayTable, ReferenceData, ShiftDisplay, SystemClock};
use roster_models::Holiday;

#[derive(Debug, Clone, Default)]
pub struct RosterContext {
    pub refs: ReferenceData,
    pub holidays: HolidayTable,
    pub display: ShiftDisplay,
}

impl RosterContext {
    pub fn new(refs: ReferenceData, holidays: HolidayTable, display: ShiftDisplay) -> Self {
        Self {
            refs,
            holidays,
            display,
        }
    }

    /// Display timezone, default color and holiday table from configuration
    pub fn from_config(config: &RosterConfig, refs: ReferenceData) -> RosterResult<Self> {
        let timezone = config
            .timezone()
            .map_err(|e| RosterError::Config(e.to_string()))?;

        Ok(Self {
            refs,
            holidays: load_holidays(config.holidays_file.as_deref())?,
            display: ShiftDisplay::new(timezone, config.default_shift_color.clone()),
        })
    }

    /// Wall clock in the display timezone
    pub fn clock(&self) -> SystemClock {
        SystemClock::new(self.display.timezone)
    }
}

/// Holidays from a JSON file, or the built-in 2025 table when no file is set
pub fn load_holidays(path: Option<&str>) -> RosterResult<HolidayTable> {
    let Some(path) = path else {
        return Ok(HolidayTable::new(Holiday::table_2025()));
    };

    let json = std::fs::read_to_string(Path::new(path))
        .map_err(|e| RosterError::Config(format!("cannot read holidays file {}: {}", path, e)))?;
    let holidays = Holiday::parse_list(&json)
        .map_err(|e| RosterError::Config(format!("invalid holidays file {}: {}", path, e)))?;

    tracing::debug!(path, count = holidays.len(), "Holidays loaded");
    Ok(HolidayTable::new(holidays))
}

/// Employees, work schedules and departments from a JSON file
///
/// Without a file the lists are empty and every reference shows as unknown.
pub fn load_reference_data(path: Option<&str>) -> RosterResult<ReferenceData> {
    let Some(path) = path else {
        return Ok(ReferenceData::default());
    };

    let json = std::fs::read_to_string(Path::new(path))
        .map_err(|e| RosterError::Config(format!("cannot read reference file {}: {}", path, e)))?;
    let refs: ReferenceData = serde_json::from_str(&json)
        .map_err(|e| RosterError::Config(format!("invalid reference file {}: {}", path, e)))?;

    tracing::debug!(
        path,
        employees = refs.employees.len(),
        work_schedules = refs.work_schedules.len(),
        departments = refs.departments.len(),
        "Reference data loaded"
    );
    Ok(refs)
}

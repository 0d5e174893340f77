//! Period navigator
//!
//! Pages a create-mode roster month by month. Edits made in one period are
//! folded into an accumulator before leaving it, and the entered period sees
//! the accumulator's entries for its own dates. An edit-mode roster has no
//! accumulator: its draft holds every loaded entry.

use chrono::NaiveDate;
use roster_core::types::DateRange;
use roster_models::DutyEntry;

use crate::assignments::AssignmentStore;
use crate::period::{compute_period, month_index, PayPeriod};
use crate::state::RosterMode;

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Moved,
    /// Target month is before the current month
    FloorReached,
    /// Edit mode pins the period, or the calendar ran out
    Disabled,
}

/// Overwrite the accumulator's dates inside `range` with the draft's entries
pub fn merge_into(accumulator: &AssignmentStore, range: DateRange, draft: &AssignmentStore) -> AssignmentStore {
    let mut merged = accumulator.clone();
    merged.replace_range(range, draft);
    merged
}

/// Entries of the accumulator falling inside `range`
pub fn partition(accumulator: &AssignmentStore, range: DateRange) -> AssignmentStore {
    accumulator.subset(range)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodNavigator {
    mode: RosterMode,
    period: PayPeriod,
    draft: AssignmentStore,
    accumulator: AssignmentStore,
}

impl PeriodNavigator {
    /// Empty roster over the period containing `today`
    ///
    /// At the edge of the calendar, where no full period exists, the period
    /// shrinks to `today` alone.
    pub fn new_create(today: NaiveDate) -> Self {
        Self {
            mode: RosterMode::Create,
            period: compute_period(today).unwrap_or_else(|| PayPeriod::from_bounds(today, today)),
            draft: AssignmentStore::new(),
            accumulator: AssignmentStore::new(),
        }
    }

    /// Stored roster pinned to its own bounds
    pub fn new_edit(start_date: NaiveDate, end_date: NaiveDate, entries: impl IntoIterator<Item = DutyEntry>) -> Self {
        Self {
            mode: RosterMode::Edit,
            period: PayPeriod::from_bounds(start_date, end_date),
            draft: AssignmentStore::from_entries(entries),
            accumulator: AssignmentStore::new(),
        }
    }

    pub fn mode(&self) -> RosterMode {
        self.mode
    }

    pub fn period(&self) -> &PayPeriod {
        &self.period
    }

    /// Assignments of the displayed period; in edit mode every loaded entry
    pub fn draft(&self) -> &AssignmentStore {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut AssignmentStore {
        &mut self.draft
    }

    /// Every assignment made so far, the live draft included
    pub fn accumulated(&self) -> AssignmentStore {
        match self.mode {
            RosterMode::Edit => self.draft.clone(),
            RosterMode::Create => merge_into(&self.accumulator, self.period.range(), &self.draft),
        }
    }

    pub fn next_month(&mut self) -> NavigationOutcome {
        if self.mode == RosterMode::Edit {
            return NavigationOutcome::Disabled;
        }
        match self.period.shifted(1) {
            Some(target) => self.enter(target),
            None => NavigationOutcome::Disabled,
        }
    }

    /// Refused when the target month is earlier than `today`'s month
    pub fn previous_month(&mut self, today: NaiveDate) -> NavigationOutcome {
        if self.mode == RosterMode::Edit {
            return NavigationOutcome::Disabled;
        }
        match self.period.shifted(-1) {
            Some(target) if month_index(target.reference) >= month_index(today) => self.enter(target),
            _ => NavigationOutcome::FloorReached,
        }
    }

    fn enter(&mut self, target: PayPeriod) -> NavigationOutcome {
        self.accumulator = self.accumulated();
        self.draft = partition(&self.accumulator, target.range());

        tracing::debug!(
            from = %self.period.label(),
            to = %target.label(),
            visible = self.draft.len(),
            accumulated = self.accumulator.len(),
            "Navigated roster period"
        );
        self.period = target;
        NavigationOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_models::EmployeeSchedule;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_starts_on_period_of_today() {
        let navigator = PeriodNavigator::new_create(date(2025, 5, 15));
        assert_eq!(navigator.period().start_date, date(2025, 4, 26));
        assert_eq!(navigator.mode(), RosterMode::Create);
        assert!(navigator.draft().is_empty());
    }

    #[test]
    fn test_navigation_keeps_edits() {
        let today = date(2025, 5, 15);
        let mut navigator = PeriodNavigator::new_create(today);
        navigator
            .draft_mut()
            .add_or_update(date(2025, 5, 1), Some(10), Some(1), None)
            .unwrap();

        assert_eq!(navigator.next_month(), NavigationOutcome::Moved);
        assert_eq!(navigator.period().label(), "June 2025");
        assert!(navigator.draft().is_empty());
        navigator
            .draft_mut()
            .add_or_update(date(2025, 6, 3), Some(11), Some(2), None)
            .unwrap();

        assert_eq!(navigator.previous_month(today), NavigationOutcome::Moved);
        let entry = navigator.draft().entry(date(2025, 5, 1)).unwrap();
        assert_eq!(entry.employee_schedules, vec![EmployeeSchedule::new(10, 1, None)]);
        assert!(navigator.draft().entry(date(2025, 6, 3)).is_none());

        let all: Vec<_> = navigator.accumulated().dates().collect();
        assert_eq!(all, vec![date(2025, 5, 1), date(2025, 6, 3)]);
    }

    #[test]
    fn test_removal_survives_navigation() {
        let today = date(2025, 5, 15);
        let mut navigator = PeriodNavigator::new_create(today);
        navigator
            .draft_mut()
            .add_or_update(date(2025, 5, 1), Some(10), Some(1), None)
            .unwrap();
        navigator.next_month();
        navigator.previous_month(today);

        navigator.draft_mut().remove(date(2025, 5, 1), 10);
        navigator.next_month();
        navigator.previous_month(today);

        assert!(navigator.draft().is_empty());
        assert!(navigator.accumulated().is_empty());
    }

    #[test]
    fn test_previous_month_floor() {
        let today = date(2025, 5, 15);
        let mut navigator = PeriodNavigator::new_create(today);
        let before = navigator.clone();

        assert_eq!(navigator.previous_month(today), NavigationOutcome::FloorReached);
        assert_eq!(navigator, before);

        navigator.next_month();
        navigator.next_month();
        assert_eq!(navigator.previous_month(today), NavigationOutcome::Moved);
        assert_eq!(navigator.previous_month(today), NavigationOutcome::Moved);
        assert_eq!(navigator.previous_month(today), NavigationOutcome::FloorReached);
        assert_eq!(navigator.period().label(), "May 2025");
    }

    #[test]
    fn test_floor_across_year_boundary() {
        let today = date(2025, 12, 20);
        let mut navigator = PeriodNavigator::new_create(today);
        navigator.next_month();
        assert_eq!(navigator.period().label(), "January 2026");
        assert_eq!(navigator.previous_month(today), NavigationOutcome::Moved);
        assert_eq!(navigator.previous_month(today), NavigationOutcome::FloorReached);
    }

    #[test]
    fn test_edit_mode_is_pinned() {
        let entries = vec![DutyEntry {
            date: date(2025, 5, 1),
            employee_schedules: vec![EmployeeSchedule::new(10, 1, None)],
        }];
        let mut navigator = PeriodNavigator::new_edit(date(2025, 4, 26), date(2025, 5, 25), entries);

        assert_eq!(navigator.next_month(), NavigationOutcome::Disabled);
        assert_eq!(navigator.previous_month(date(2020, 1, 1)), NavigationOutcome::Disabled);
        assert_eq!(navigator.period().label(), "May 2025");
        assert_eq!(navigator.draft().assignment_count(), 1);
    }

    #[test]
    fn test_edit_mode_accumulated_is_the_draft() {
        let entries = vec![
            DutyEntry {
                date: date(2025, 5, 1),
                employee_schedules: vec![EmployeeSchedule::new(10, 1, None)],
            },
            DutyEntry {
                date: date(2025, 6, 3),
                employee_schedules: vec![EmployeeSchedule::new(11, 1, None)],
            },
        ];
        let mut navigator = PeriodNavigator::new_edit(date(2025, 4, 26), date(2025, 5, 25), entries);

        assert!(navigator.draft_mut().remove(date(2025, 6, 3), 11));
        navigator
            .draft_mut()
            .add_or_update(date(2025, 6, 4), Some(12), Some(1), None)
            .unwrap();

        let dates: Vec<_> = navigator.accumulated().dates().collect();
        assert_eq!(dates, vec![date(2025, 5, 1), date(2025, 6, 4)]);
    }

    #[test]
    fn test_merge_replaces_only_outgoing_range() {
        let mut accumulator = AssignmentStore::new();
        accumulator.add_or_update(date(2025, 5, 1), Some(1), Some(1), None).unwrap();
        accumulator.add_or_update(date(2025, 6, 1), Some(1), Some(1), None).unwrap();

        let mut draft = AssignmentStore::new();
        draft.add_or_update(date(2025, 5, 2), Some(2), Some(1), None).unwrap();

        let range = compute_period(date(2025, 5, 15)).unwrap().range();
        let merged = merge_into(&accumulator, range, &draft);
        let dates: Vec<_> = merged.dates().collect();
        assert_eq!(dates, vec![date(2025, 5, 2), date(2025, 6, 1)]);

        assert_eq!(partition(&merged, range).len(), 1);
        // inputs untouched
        assert_eq!(accumulator.len(), 2);
    }
}

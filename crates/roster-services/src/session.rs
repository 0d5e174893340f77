//! Roster builder session
//!
//! Holds one roster being built or edited and drives its save lifecycle.
//! While a save is in flight every mutating action is refused. The outcome
//! is kept as a notification until the caller takes it; a failed save leaves
//! the draft exactly as it was.

use std::sync::Arc;

use chrono::NaiveDate;
use roster_core::error::ValidationErrors;
use roster_core::result::RosterResult;
use roster_core::traits::Id;
use roster_engine::{
    CalendarGrid, Clock, ResolvedAssignment, RosterAction, RosterMode, RosterState, Transition,
};
use roster_models::DutySchedulePayload;
use serde::Serialize;

use crate::context::RosterContext;
use crate::duty_schedules::DutyScheduleService;
use crate::result::ServiceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Outcome of the last save, shown once
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// A save handed out by [`RosterSession::begin_save`]
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    /// Set when updating a stored roster
    pub id: Option<Id>,
    pub payload: DutySchedulePayload,
}

pub struct RosterSession {
    service: DutyScheduleService,
    clock: Arc<dyn Clock>,
    context: RosterContext,
    state: RosterState,
    saving: bool,
    notification: Option<Notification>,
}

impl RosterSession {
    /// New roster over the period containing today
    pub fn create(service: DutyScheduleService, clock: Arc<dyn Clock>, context: RosterContext) -> Self {
        let state = RosterState::new_draft(clock.today());
        Self {
            service,
            clock,
            context,
            state,
            saving: false,
            notification: None,
        }
    }

    /// Stored roster in edit mode
    pub async fn open(
        service: DutyScheduleService,
        clock: Arc<dyn Clock>,
        context: RosterContext,
        id: Id,
    ) -> RosterResult<Self> {
        let schedule = service.load(id).await?;
        Ok(Self {
            service,
            clock,
            context,
            state: RosterState::from_schedule(&schedule),
            saving: false,
            notification: None,
        })
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub fn context(&self) -> &RosterContext {
        &self.context
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn grid(&self) -> CalendarGrid {
        self.state.grid(&self.context.holidays)
    }

    pub fn assignments_on(&self, date: NaiveDate) -> Vec<ResolvedAssignment> {
        self.state
            .assignments_on(date, &self.context.refs, &self.context.display)
    }

    /// Apply a user action; refused while a save is in flight
    pub fn dispatch(&mut self, action: &RosterAction) -> Result<Transition, ValidationErrors> {
        if self.saving {
            let mut errors = ValidationErrors::new();
            errors.add_base("A save is in progress");
            return Err(errors);
        }
        self.state.apply(action, self.clock.today())
    }

    /// Notification of the last save, once
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    /// Mark a save in flight and hand out its payload; `None` if one already is
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        if self.saving {
            return None;
        }
        self.saving = true;

        let request = SaveRequest {
            id: match self.state.mode() {
                RosterMode::Edit => self.state.id(),
                RosterMode::Create => None,
            },
            payload: self.state.payload(self.service.create_scope()),
        };
        tracing::debug!(
            schedule_id = ?request.id,
            entries = request.payload.entries.len(),
            "Save started"
        );
        Some(request)
    }

    /// Record the outcome of a save started with [`begin_save`](Self::begin_save)
    ///
    /// On success the stored roster is reloaded into edit mode.
    pub async fn finish_save(&mut self, result: ServiceResult<Id>) -> bool {
        self.saving = false;
        let text = result.notification_text();

        let Some(&id) = result.result().filter(|_| result.is_success()) else {
            tracing::warn!(errors = %result.errors(), "Save failed");
            self.notification = Some(Notification::error(text));
            return false;
        };

        match self.service.load(id).await {
            Ok(schedule) => self.state = RosterState::from_schedule(&schedule),
            Err(err) => tracing::warn!(schedule_id = id, error = %err, "Saved roster could not be reloaded"),
        }
        self.notification = Some(Notification::success(text));
        true
    }

    /// Create or update, depending on the mode
    pub async fn save(&mut self) -> bool {
        let Some(request) = self.begin_save() else {
            return false;
        };

        let result = match request.id {
            Some(id) => self
                .service
                .update(id, request.payload)
                .await
                .map(|_| id),
            None => self
                .service
                .create(request.payload)
                .await
                .map(|created| created.id),
        };
        self.finish_save(result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRepo;
    use roster_core::config::CreateScope;
    use roster_db::{DutyScheduleRepository, InMemoryDutyScheduleRepository, RepositoryError};
    use roster_engine::{AssignmentChange, FixedClock, NavigationOutcome, ReferenceData};
    use roster_models::{Employee, ScheduleType, WorkSchedule};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(date(2025, 5, 15)))
    }

    fn context() -> RosterContext {
        let refs = ReferenceData::new(
            vec![Employee::new(10, "Maria", "Santos")],
            vec![WorkSchedule::new(1, "Day Shift", ScheduleType::Standard).with_color("#4CAF50")],
            vec![],
        );
        RosterContext {
            refs,
            ..RosterContext::default()
        }
    }

    fn add(d: NaiveDate, employee: Id) -> RosterAction {
        RosterAction::AddAssignment {
            date: d,
            employee_id: Some(employee),
            work_schedule_id: Some(1),
            remarks: None,
        }
    }

    fn memory_session(repo: Arc<InMemoryDutyScheduleRepository>) -> RosterSession {
        let service = DutyScheduleService::new(repo, CreateScope::ActivePeriod);
        RosterSession::create(service, clock(), context())
    }

    #[tokio::test]
    async fn test_create_save_switches_to_edit_mode() {
        let repo = Arc::new(InMemoryDutyScheduleRepository::new());
        let mut session = memory_session(repo.clone());
        session.dispatch(&add(date(2025, 5, 1), 10)).unwrap();

        assert!(session.save().await);
        let notification = session.take_notification().unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.message, "Duty schedule \"May 2025\" created successfully");
        assert!(session.take_notification().is_none());

        assert_eq!(session.state().mode(), RosterMode::Edit);
        assert_eq!(session.state().id(), Some(1));
        assert_eq!(repo.len(), 1);

        // a second save updates the same roster
        session.dispatch(&add(date(2025, 5, 2), 10)).unwrap();
        assert!(session.save().await);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().entries.len(), 2);
    }

    #[tokio::test]
    async fn test_actions_refused_while_saving() {
        let repo = Arc::new(InMemoryDutyScheduleRepository::new());
        let mut session = memory_session(repo);

        let request = session.begin_save().unwrap();
        assert!(request.id.is_none());
        assert!(session.is_saving());
        assert!(session.begin_save().is_none());

        let errors = session.dispatch(&add(date(2025, 5, 1), 10)).unwrap_err();
        assert_eq!(errors.full_messages(), vec!["A save is in progress"]);

        session.finish_save(ServiceResult::failure_with_base_error("offline")).await;
        assert!(!session.is_saving());
        assert_eq!(
            session.dispatch(&add(date(2025, 5, 1), 10)).unwrap(),
            Transition::Assignment(AssignmentChange::Added)
        );
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        let mut repo = MockRepo::new();
        repo.expect_create()
            .returning(|_| Err(RepositoryError::Database(sqlx::Error::PoolTimedOut)));
        let service = DutyScheduleService::new(Arc::new(repo), CreateScope::ActivePeriod);
        let mut session = RosterSession::create(service, clock(), context());

        session.dispatch(&add(date(2025, 5, 1), 10)).unwrap();
        let before = session.state().clone();

        assert!(!session.save().await);
        assert_eq!(session.state(), &before);
        assert!(!session.is_saving());

        let notification = session.take_notification().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(notification.message.starts_with("Database error"));
    }

    #[tokio::test]
    async fn test_open_missing_roster_fails() {
        let service = DutyScheduleService::new(Arc::new(InMemoryDutyScheduleRepository::new()), CreateScope::ActivePeriod);
        assert!(RosterSession::open(service, clock(), context(), 3).await.is_err());
    }

    #[tokio::test]
    async fn test_edit_session_renders_assignments() {
        let repo = Arc::new(InMemoryDutyScheduleRepository::new());
        let mut session = memory_session(repo.clone());
        session.dispatch(&add(date(2025, 5, 1), 10)).unwrap();
        session.save().await;

        let service = DutyScheduleService::new(repo, CreateScope::ActivePeriod);
        let mut reopened = RosterSession::open(service, clock(), context(), 1).await.unwrap();

        assert_eq!(
            reopened.dispatch(&RosterAction::NextMonth).unwrap(),
            Transition::Navigation(NavigationOutcome::Disabled)
        );
        let shown = reopened.assignments_on(date(2025, 5, 1));
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].employee_name, "Santos, M.");
        assert_eq!(shown[0].shift_color.as_str(), "#4CAF50");
        assert_eq!(reopened.grid().days.len(), 30);
    }
}

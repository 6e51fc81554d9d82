//! Session scheduling defaults and checks for new sessions.

use chrono::{DateTime, Duration, DurationRound, Timelike, Utc};

/// Default minutes before start at which check-in opens.
pub const DEFAULT_OPENS_BEFORE_MINUTES: i64 = 15;
/// Default minutes after start at which check-in closes.
pub const DEFAULT_CLOSES_AFTER_MINUTES: i64 = 30;
/// Upper bound for the opens-before offset.
pub const MAX_OPENS_BEFORE_MINUTES: i64 = 60;
/// Upper bound for the closes-after offset.
pub const MAX_CLOSES_AFTER_MINUTES: i64 = 120;

/// Start/end times plus the check-in window offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSchedule {
    /// Scheduled start.
    pub scheduled_start: DateTime<Utc>,
    /// Scheduled end.
    pub scheduled_end: DateTime<Utc>,
    /// Minutes before the start at which check-in opens.
    pub opens_before_minutes: i64,
    /// Minutes after the start at which check-in closes.
    pub closes_after_minutes: i64,
}

impl SessionSchedule {
    /// Form defaults relative to `now`.
    ///
    /// The start is ten minutes out, pushed up to the next five-minute mark;
    /// the session runs two hours.
    pub fn default_at(now: DateTime<Utc>) -> Self {
        let ahead = now + Duration::minutes(10);
        let rounded = (ahead.minute() / 5 + 1) * 5;
        let hour_start = ahead
            .duration_trunc(Duration::hours(1))
            .unwrap_or(ahead);
        let scheduled_start = hour_start + Duration::minutes(i64::from(rounded));
        Self {
            scheduled_start,
            scheduled_end: scheduled_start + Duration::hours(2),
            opens_before_minutes: DEFAULT_OPENS_BEFORE_MINUTES,
            closes_after_minutes: DEFAULT_CLOSES_AFTER_MINUTES,
        }
    }

    /// When check-in opens.
    pub fn checkin_opens_at(&self) -> DateTime<Utc> {
        self.scheduled_start - Duration::minutes(self.opens_before_minutes)
    }

    /// When check-in closes.
    pub fn checkin_closes_at(&self) -> DateTime<Utc> {
        self.scheduled_start + Duration::minutes(self.closes_after_minutes)
    }

    /// Validate the schedule for a new session named `name`.
    pub fn check(&self, name: &str, now: DateTime<Utc>) -> ScheduleCheck {
        let mut result = ScheduleCheck::default();
        if name.trim().is_empty() {
            result.errors.push("Please enter a session name".to_string());
        }
        if !(0..=MAX_OPENS_BEFORE_MINUTES).contains(&self.opens_before_minutes) {
            result.errors.push(format!(
                "Check-in must open between 0 and {MAX_OPENS_BEFORE_MINUTES} minutes before start"
            ));
        }
        if !(0..=MAX_CLOSES_AFTER_MINUTES).contains(&self.closes_after_minutes) {
            result.errors.push(format!(
                "Check-in must close between 0 and {MAX_CLOSES_AFTER_MINUTES} minutes after start"
            ));
        }
        if self.scheduled_end <= self.scheduled_start {
            result.errors.push("End time must be after start time".to_string());
        }
        if self.checkin_closes_at() <= self.checkin_opens_at() {
            result
                .errors
                .push("Check-in close time must be after open time".to_string());
        }
        if self.scheduled_start < now {
            result
                .warnings
                .push("Note: This session is scheduled in the past.".to_string());
        }
        result
    }
}

/// Outcome of [`SessionSchedule::check`]. Warnings never block creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleCheck {
    /// Problems that block creation.
    pub errors: Vec<String>,
    /// Advisory notes.
    pub warnings: Vec<String>,
}

impl ScheduleCheck {
    /// No blocking errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

//! Session lifecycle guard.
//!
//! Status changes only move forward:
//!
//! ```text
//! scheduled ──► active ──► closed
//!     │            │
//!     └──────┬─────┘
//!            ▼
//!        cancelled
//! ```
//!
//! `closed` and `cancelled` are terminal. A session whose status is unknown
//! allows nothing. A session whose course has been soft-deleted can no
//! longer be activated. The guard never touches the
//! network; the backend still has the final say and may reject a change the
//! guard allowed.

use saiv_core::AppError;
use thiserror::Error;

use super::status::SessionStatus;

/// Shown whenever the schedule action is offered.
pub const SCHEDULE_DISABLED_HINT: &str = "Sessions cannot be moved back to scheduled status";

/// Shown in place of the delete action for active and closed sessions.
pub const DELETE_BLOCKED_MESSAGE: &str =
    "This session cannot be deleted because it has/had active check-ins. Close or cancel it instead.";

/// Shown next to the delete action when deletion is permitted.
pub const DELETE_ALLOWED_HINT: &str =
    "Sessions can only be deleted if they are scheduled or cancelled (no attendance recorded).";

/// Shown for sessions whose course is inactive.
pub const COURSE_DELETED_WARNING: &str = "This session belongs to a deleted course. You cannot activate it. Restore the course first or cancel/close this session.";

/// Transitions allowed by the table, before the course check.
fn base_transitions(current: SessionStatus) -> &'static [SessionStatus] {
    match current {
        SessionStatus::Scheduled => &[SessionStatus::Active, SessionStatus::Cancelled],
        SessionStatus::Active => &[SessionStatus::Closed, SessionStatus::Cancelled],
        SessionStatus::Closed | SessionStatus::Cancelled | SessionStatus::Unknown => &[],
    }
}

/// Statuses `current` may move to.
///
/// `active` is withheld while the owning course is inactive. The result never
/// contains `scheduled`.
pub fn allowed_transitions(current: SessionStatus, course_is_active: bool) -> Vec<SessionStatus> {
    base_transitions(current)
        .iter()
        .copied()
        .filter(|next| course_is_active || *next != SessionStatus::Active)
        .collect()
}

/// Why a requested status change was refused locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionRejection {
    /// The session is closed or cancelled.
    #[error("This session is {current}. No further status changes are allowed.")]
    TerminalState {
        /// Current status.
        current: SessionStatus,
    },
    /// Activation requested while the owning course is inactive.
    #[error("The course for this session has been deleted. This session cannot be activated.")]
    CourseDeleted,
    /// The target is not reachable from the current status.
    #[error("Cannot change session status from {from} to {to}.")]
    InvalidTarget {
        /// Current status.
        from: SessionStatus,
        /// Requested status.
        to: SessionStatus,
    },
}

impl TransitionRejection {
    /// Short machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::TerminalState { .. } => "terminal state",
            Self::CourseDeleted => "course deleted",
            Self::InvalidTarget { .. } => "invalid target",
        }
    }
}

impl From<TransitionRejection> for AppError {
    fn from(rejection: TransitionRejection) -> Self {
        AppError::validation(rejection.to_string())
    }
}

/// Check a requested status change without performing it.
pub fn validate_transition(
    current: SessionStatus,
    requested: SessionStatus,
    course_is_active: bool,
) -> Result<(), TransitionRejection> {
    if current.is_terminal() {
        return Err(TransitionRejection::TerminalState { current });
    }
    if allowed_transitions(current, course_is_active).contains(&requested) {
        return Ok(());
    }
    if requested == SessionStatus::Active
        && !course_is_active
        && base_transitions(current).contains(&requested)
    {
        return Err(TransitionRejection::CourseDeleted);
    }
    Err(TransitionRejection::InvalidTarget {
        from: current,
        to: requested,
    })
}

/// Whether a session in `current` may be deleted.
///
/// Active and closed sessions are kept so that their attendance records
/// remain intact.
pub fn can_delete(current: SessionStatus) -> bool {
    matches!(current, SessionStatus::Scheduled | SessionStatus::Cancelled)
}

/// Which status actions to offer for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionActions {
    /// Current status.
    pub status: SessionStatus,
    /// Whether the owning course is active.
    pub course_is_active: bool,
    /// `scheduled -> active` is permitted.
    pub can_activate: bool,
    /// `active -> closed` is permitted.
    pub can_close: bool,
    /// `* -> cancelled` is permitted.
    pub can_cancel: bool,
    /// Always false.
    pub can_schedule: bool,
    /// Deletion is permitted.
    pub can_delete: bool,
}

impl SessionActions {
    /// Build the action set for a session.
    pub fn for_session(status: SessionStatus, course_is_active: bool) -> Self {
        let allowed = allowed_transitions(status, course_is_active);
        Self {
            status,
            course_is_active,
            can_activate: allowed.contains(&SessionStatus::Active),
            can_close: allowed.contains(&SessionStatus::Closed),
            can_cancel: allowed.contains(&SessionStatus::Cancelled),
            can_schedule: false,
            can_delete: can_delete(status),
        }
    }

    /// Whether the button for `target` is enabled.
    pub fn permits(&self, target: SessionStatus) -> bool {
        match target {
            SessionStatus::Scheduled => self.can_schedule,
            SessionStatus::Active => self.can_activate,
            SessionStatus::Closed => self.can_close,
            SessionStatus::Cancelled => self.can_cancel,
            SessionStatus::Unknown => false,
        }
    }

    /// Tooltip for the permanently disabled schedule action.
    pub fn schedule_hint(&self) -> &'static str {
        SCHEDULE_DISABLED_HINT
    }

    /// What the current status means for the instructor.
    pub fn explanation(&self) -> &'static str {
        match self.status {
            SessionStatus::Closed => {
                "This session is closed. Attendance has been finalized and cannot be changed."
            }
            SessionStatus::Cancelled => {
                "This session is cancelled. No further changes are allowed."
            }
            SessionStatus::Active => {
                "This session is active. Students can currently check in. Close it when the check-in period ends."
            }
            SessionStatus::Scheduled => {
                "This session is scheduled. Activate it to open check-in for students."
            }
            SessionStatus::Unknown => {
                "The status of this session is unknown. Refresh the page before changing it."
            }
        }
    }

    /// Text for the delete area.
    pub fn delete_message(&self) -> &'static str {
        if self.can_delete {
            DELETE_ALLOWED_HINT
        } else {
            DELETE_BLOCKED_MESSAGE
        }
    }

    /// Warning shown when the owning course has been deleted.
    pub fn course_warning(&self) -> Option<&'static str> {
        (!self.course_is_active).then_some(COURSE_DELETED_WARNING)
    }
}

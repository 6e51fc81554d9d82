//! Session domain entities.

pub mod lifecycle;
pub mod model;
pub mod schedule;
pub mod status;

pub use lifecycle::{
    SessionActions, TransitionRejection, allowed_transitions, can_delete, validate_transition,
};
pub use model::{CreateSession, Session, SessionStatusUpdate, SessionType};
pub use schedule::{ScheduleCheck, SessionSchedule};
pub use status::SessionStatus;

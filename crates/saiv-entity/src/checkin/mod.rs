//! Check-in domain entities.

pub mod model;
pub mod risk;
pub mod status;

pub use model::{CheckIn, ReviewCheckIn, RiskFactor};
pub use risk::RiskLevel;
pub use status::{CheckInStatus, ReviewDecision};

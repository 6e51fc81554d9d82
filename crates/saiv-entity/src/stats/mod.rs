//! Aggregates computed by the backend.

pub mod course;
pub mod health;
pub mod overview;
pub mod session;

pub use course::{CourseSessionSummary, CourseStats, SessionTrend};
pub use health::{HealthIndicator, HealthLevel};
pub use overview::{DailyTrend, OverviewStats};
pub use session::{RiskDistribution, SessionStats, TimelinePoint};

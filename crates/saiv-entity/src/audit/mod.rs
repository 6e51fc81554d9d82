//! Audit trail entities.

pub mod filter;
pub mod model;

pub use filter::{AuditFilter, KNOWN_ACTIONS, RESOURCE_TYPES, SuccessFilter};
pub use model::AuditLogEntry;

//! Form bodies and query strings accepted by the dashboard.

pub mod forms;
pub mod query;

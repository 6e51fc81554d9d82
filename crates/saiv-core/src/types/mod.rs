//! Shared value types used across SAIV crates.

pub mod pagination;
pub mod timestamp;

pub use pagination::{ListResponse, PageRequest, PageResponse};

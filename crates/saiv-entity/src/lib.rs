//! # saiv-entity
//!
//! Typed records for everything the SAIV backend returns or accepts:
//! sessions, courses, check-ins, enrollments, audit entries, statistics and
//! users. Records are deserialized once at the API boundary; missing fields
//! fall back to defaults there and nowhere else.
//!
//! The [`session::lifecycle`] module holds the session lifecycle guard, the
//! only component in the dashboard that enforces invariants of its own.

pub mod audit;
pub mod checkin;
pub mod course;
pub mod enrollment;
pub mod session;
pub mod stats;
pub mod user;

//! Enrollment domain entities.

pub mod model;

pub use model::{
    BulkEnrollRequest, BulkEnrollResult, CourseEnrollments, CreateEnrollment, EnrolledStudent,
    LOW_ATTENDANCE_THRESHOLD, parse_email_lines,
};

//! Enrollment aggregate (`matricula`)
//!
//! A learner's registration in a class. Read-only to the billing core.

pub mod model;
pub mod repository;

pub use model::Enrollment;
pub use repository::{EnrollmentCursor, EnrollmentRepository};

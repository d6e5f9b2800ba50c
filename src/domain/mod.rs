//! Domain layer: entities, value types and repository interfaces.

pub mod charge;
pub mod class;
pub mod enrollment;
pub mod fee_concept;
pub mod money;
pub mod repositories;

pub use charge::{Charge, ChargeRepository, ChargeStatus, NewCharge};
pub use class::{Class, ClassRepository};
pub use enrollment::{Enrollment, EnrollmentCursor, EnrollmentRepository};
pub use fee_concept::{ConceptKind, FeeConcept, FeeConceptRepository};
pub use repositories::{DomainResult, RepositoryProvider};

pub use crate::shared::errors::DomainError;

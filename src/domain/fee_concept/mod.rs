//! Fee concept aggregate (`concepto`)

pub mod model;
pub mod repository;

pub use model::{ConceptKind, FeeConcept};
pub use repository::FeeConceptRepository;

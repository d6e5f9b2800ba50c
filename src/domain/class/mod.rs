//! Class aggregate (`clase`)

pub mod model;
pub mod repository;

pub use model::Class;
pub use repository::ClassRepository;

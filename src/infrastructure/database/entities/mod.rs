//! Database entities module

pub mod cargo;
pub mod clase;
pub mod concepto;
pub mod matricula;

pub use cargo::Entity as Cargo;
pub use clase::Entity as Clase;
pub use concepto::Entity as Concepto;
pub use matricula::Entity as Matricula;

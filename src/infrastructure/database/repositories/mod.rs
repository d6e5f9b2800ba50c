//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod charge_repository;
pub mod class_repository;
pub mod enrollment_repository;
pub mod fee_concept_repository;
pub mod repository_provider;

pub use repository_provider::SeaOrmRepositoryProvider;

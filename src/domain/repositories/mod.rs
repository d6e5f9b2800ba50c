//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::charge::ChargeRepository;
use super::class::ClassRepository;
use super::enrollment::EnrollmentRepository;
use super::fee_concept::FeeConceptRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let clase = repos.classes().find_by_id("c1").await?;
///     let billed = repos.charges().exists_for("m1", "2024-Q1").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn enrollments(&self) -> &dyn EnrollmentRepository;
    fn classes(&self) -> &dyn ClassRepository;
    fn fee_concepts(&self) -> &dyn FeeConceptRepository;
    fn charges(&self) -> &dyn ChargeRepository;
}

//! Charge repository interface

use async_trait::async_trait;

use super::model::{Charge, NewCharge};
use crate::domain::DomainResult;

#[async_trait]
pub trait ChargeRepository: Send + Sync {
    /// Whether a charge already exists for this (enrollment, period) pair.
    async fn exists_for(&self, enrollment_id: &str, period_id: &str) -> DomainResult<bool>;

    async fn find_for_period(&self, period_id: &str) -> DomainResult<Vec<Charge>>;

    async fn count_for_period(&self, period_id: &str) -> DomainResult<u64>;

    /// Insert a charge. Fails with `DomainError::Conflict` when the pair
    /// is already billed.
    async fn create(&self, charge: NewCharge) -> DomainResult<Charge>;
}

//! Fee concept repository interface

use async_trait::async_trait;

use super::model::FeeConcept;
use crate::domain::DomainResult;

#[async_trait]
pub trait FeeConceptRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<FeeConcept>>;

    async fn save(&self, concept: FeeConcept) -> DomainResult<FeeConcept>;
}

//! Class repository interface

use async_trait::async_trait;

use super::model::Class;
use crate::domain::DomainResult;

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Class>>;

    async fn save(&self, class: Class) -> DomainResult<Class>;
}

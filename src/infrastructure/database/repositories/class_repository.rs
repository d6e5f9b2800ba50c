//! SeaORM implementation of ClassRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{Class, ClassRepository, DomainResult};
use crate::infrastructure::database::entities::clase;
use crate::infrastructure::database::new_record_id;

pub struct SeaOrmClassRepository {
    db: DatabaseConnection,
}

impl SeaOrmClassRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: clase::Model) -> Class {
    Class {
        id: m.id,
        name: m.nombre,
        // The frontend stores an unset relation as an empty string
        fee_concept_id: m.concepto_id.filter(|id| !id.is_empty()),
        created_at: m.created_at,
    }
}

#[async_trait]
impl ClassRepository for SeaOrmClassRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Class>> {
        let model = clase::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, c: Class) -> DomainResult<Class> {
        let model = clase::ActiveModel {
            id: Set(if c.id.is_empty() { new_record_id() } else { c.id }),
            nombre: Set(c.name),
            concepto_id: Set(c.fee_concept_id),
            created_at: Set(c.created_at),
        };
        let saved = model.insert(&self.db).await?;
        Ok(model_to_domain(saved))
    }
}

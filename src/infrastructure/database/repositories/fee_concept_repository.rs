//! SeaORM implementation of FeeConceptRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::warn;

use crate::domain::money::{from_minor_units, to_minor_units};
use crate::domain::{ConceptKind, DomainError, DomainResult, FeeConcept, FeeConceptRepository};
use crate::infrastructure::database::entities::concepto;
use crate::infrastructure::database::new_record_id;

pub struct SeaOrmFeeConceptRepository {
    db: DatabaseConnection,
}

impl SeaOrmFeeConceptRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: concepto::Model) -> FeeConcept {
    let kind = ConceptKind::parse(&m.tipo).unwrap_or_else(|| {
        warn!(concepto_id = %m.id, tipo = %m.tipo, "Unknown concept type, treating as mensual");
        ConceptKind::Monthly
    });
    FeeConcept {
        id: m.id,
        name: m.nombre,
        price: from_minor_units(m.precio_centavos),
        kind,
        created_at: m.created_at,
    }
}

#[async_trait]
impl FeeConceptRepository for SeaOrmFeeConceptRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<FeeConcept>> {
        let model = concepto::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, c: FeeConcept) -> DomainResult<FeeConcept> {
        let cents = to_minor_units(c.price).ok_or_else(|| {
            DomainError::Validation(format!("price not representable in cents: {}", c.price))
        })?;
        let model = concepto::ActiveModel {
            id: Set(if c.id.is_empty() { new_record_id() } else { c.id }),
            nombre: Set(c.name),
            precio_centavos: Set(cents),
            tipo: Set(c.kind.as_str().to_string()),
            created_at: Set(c.created_at),
        };
        let saved = model.insert(&self.db).await?;
        Ok(model_to_domain(saved))
    }
}

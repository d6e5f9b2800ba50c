//! SeaORM implementation of ChargeRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, warn};

use crate::domain::money::{from_minor_units, to_minor_units};
use crate::domain::{Charge, ChargeRepository, ChargeStatus, DomainError, DomainResult, NewCharge};
use crate::infrastructure::database::entities::cargo;
use crate::infrastructure::database::new_record_id;

pub struct SeaOrmChargeRepository {
    db: DatabaseConnection,
}

impl SeaOrmChargeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: cargo::Model) -> Charge {
    let status = ChargeStatus::parse(&m.estado).unwrap_or_else(|| {
        warn!(cargo_id = %m.id, estado = %m.estado, "Unknown charge state");
        ChargeStatus::default()
    });
    Charge {
        id: m.id,
        athlete_id: m.atleta_id,
        fee_concept_id: m.concepto_id,
        period_id: m.periodo_id,
        enrollment_id: m.matricula_id,
        total_amount: from_minor_units(m.monto_total_centavos),
        status,
        created_at: m.created_at,
    }
}

#[async_trait]
impl ChargeRepository for SeaOrmChargeRepository {
    async fn exists_for(&self, enrollment_id: &str, period_id: &str) -> DomainResult<bool> {
        let count = cargo::Entity::find()
            .filter(cargo::Column::MatriculaId.eq(enrollment_id))
            .filter(cargo::Column::PeriodoId.eq(period_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn find_for_period(&self, period_id: &str) -> DomainResult<Vec<Charge>> {
        let models = cargo::Entity::find()
            .filter(cargo::Column::PeriodoId.eq(period_id))
            .order_by_asc(cargo::Column::CreatedAt)
            .order_by_asc(cargo::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count_for_period(&self, period_id: &str) -> DomainResult<u64> {
        let count = cargo::Entity::find()
            .filter(cargo::Column::PeriodoId.eq(period_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn create(&self, c: NewCharge) -> DomainResult<Charge> {
        let cents = to_minor_units(c.total_amount).ok_or_else(|| {
            DomainError::Validation(format!("amount not representable in cents: {}", c.total_amount))
        })?;

        let model = cargo::ActiveModel {
            id: Set(new_record_id()),
            atleta_id: Set(c.athlete_id),
            concepto_id: Set(c.fee_concept_id),
            periodo_id: Set(c.period_id),
            matricula_id: Set(c.enrollment_id),
            monto_total_centavos: Set(cents),
            estado: Set(c.status.as_str().to_string()),
            created_at: Set(Utc::now()),
        };
        let saved = model.insert(&self.db).await?;
        debug!(
            cargo_id = %saved.id,
            matricula_id = %saved.matricula_id,
            periodo_id = %saved.periodo_id,
            "Charge created"
        );
        Ok(model_to_domain(saved))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{Enrollment, FeeConcept, RepositoryProvider};
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::testing::memory_db;

    async fn seeded() -> SeaOrmRepositoryProvider {
        let repos = SeaOrmRepositoryProvider::new(memory_db().await);
        repos
            .fee_concepts()
            .save(FeeConcept::new("k1", "Mensualidad", Decimal::from_str("50.00").unwrap()))
            .await
            .unwrap();
        repos
            .enrollments()
            .save(Enrollment::new("m1", "a1", "c1"))
            .await
            .unwrap();
        repos
    }

    fn new_charge(period: &str) -> NewCharge {
        NewCharge {
            athlete_id: "a1".into(),
            fee_concept_id: "k1".into(),
            period_id: period.into(),
            enrollment_id: "m1".into(),
            total_amount: Decimal::from_str("50.00").unwrap(),
            status: ChargeStatus::Pending,
        }
    }

    #[tokio::test]
    async fn create_then_exists_for_same_period_only() {
        let repos = seeded().await;
        let charges = repos.charges();

        let created = charges.create(new_charge("2024-Q1")).await.unwrap();
        assert_eq!(created.total_amount, Decimal::from_str("50.00").unwrap());
        assert_eq!(created.status, ChargeStatus::Pending);

        assert!(charges.exists_for("m1", "2024-Q1").await.unwrap());
        assert!(!charges.exists_for("m1", "2024-Q2").await.unwrap());
        assert_eq!(charges.count_for_period("2024-Q1").await.unwrap(), 1);
        let listed = charges.find_for_period("2024-Q1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
    }

    #[tokio::test]
    async fn second_insert_for_same_pair_is_a_conflict() {
        let repos = seeded().await;
        repos.charges().create(new_charge("2024-Q1")).await.unwrap();

        let err = repos.charges().create(new_charge("2024-Q1")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");
        assert_eq!(repos.charges().count_for_period("2024-Q1").await.unwrap(), 1);
    }
}

//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    ChargeRepository, ClassRepository, EnrollmentRepository, FeeConceptRepository,
    RepositoryProvider,
};

use super::charge_repository::SeaOrmChargeRepository;
use super::class_repository::SeaOrmClassRepository;
use super::enrollment_repository::SeaOrmEnrollmentRepository;
use super::fee_concept_repository::SeaOrmFeeConceptRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let page = repos.enrollments().find_active_page(None, 1000).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    enrollments: SeaOrmEnrollmentRepository,
    classes: SeaOrmClassRepository,
    fee_concepts: SeaOrmFeeConceptRepository,
    charges: SeaOrmChargeRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            enrollments: SeaOrmEnrollmentRepository::new(db.clone()),
            classes: SeaOrmClassRepository::new(db.clone()),
            fee_concepts: SeaOrmFeeConceptRepository::new(db.clone()),
            charges: SeaOrmChargeRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn enrollments(&self) -> &dyn EnrollmentRepository {
        &self.enrollments
    }

    fn classes(&self) -> &dyn ClassRepository {
        &self.classes
    }

    fn fee_concepts(&self) -> &dyn FeeConceptRepository {
        &self.fee_concepts
    }

    fn charges(&self) -> &dyn ChargeRepository {
        &self.charges
    }
}

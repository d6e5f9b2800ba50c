//! Charge generation for a billing period
//!
//! Walks every active enrollment and creates the missing `pendiente` charge
//! for the requested period. Running it twice for the same period is a
//! no-op the second time: enrollments already billed are skipped by the
//! existence check, and the unique index on (enrollment, period) catches
//! concurrent runs that slip past it.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    Charge, DomainError, DomainResult, Enrollment, EnrollmentCursor, NewCharge,
    RepositoryProvider,
};

/// Longest accepted period identifier
pub const MAX_PERIOD_ID_LEN: usize = 64;

/// Why an enrollment produced no charge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A charge for this enrollment and period already exists
    AlreadyBilled,
    ClassNotFound { class_id: String },
    ClassWithoutConcept { class_id: String },
    ConceptNotFound { concept_id: String },
    /// A read against the store failed for this enrollment
    LookupFailed(String),
    InsertFailed(String),
}

impl SkipReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyBilled => "already_billed",
            Self::ClassNotFound { .. } => "class_not_found",
            Self::ClassWithoutConcept { .. } => "class_without_concept",
            Self::ConceptNotFound { .. } => "concept_not_found",
            Self::LookupFailed(_) => "lookup_failed",
            Self::InsertFailed(_) => "insert_failed",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyBilled => write!(f, "already billed for this period"),
            Self::ClassNotFound { class_id } => write!(f, "class {} not found", class_id),
            Self::ClassWithoutConcept { class_id } => {
                write!(f, "class {} has no fee concept", class_id)
            }
            Self::ConceptNotFound { concept_id } => {
                write!(f, "fee concept {} not found", concept_id)
            }
            Self::LookupFailed(e) => write!(f, "lookup failed: {}", e),
            Self::InsertFailed(e) => write!(f, "insert failed: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEnrollment {
    pub enrollment_id: String,
    pub reason: SkipReason,
}

/// Outcome of one generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub period_id: String,
    /// Active enrollments examined
    pub scanned: usize,
    pub generated: Vec<Charge>,
    pub skipped: Vec<SkippedEnrollment>,
}

impl GenerationReport {
    fn new(period_id: &str) -> Self {
        Self {
            period_id: period_id.to_string(),
            ..Default::default()
        }
    }

    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }

    pub fn skipped_with(&self, code: &str) -> usize {
        self.skipped.iter().filter(|s| s.reason.code() == code).count()
    }
}

/// Validate and normalize a caller-supplied period id.
pub fn normalize_period_id(raw: &str) -> DomainResult<&str> {
    let period_id = raw.trim();
    if period_id.is_empty() {
        return Err(DomainError::Validation("periodo_id is required".to_string()));
    }
    if period_id.chars().count() > MAX_PERIOD_ID_LEN {
        return Err(DomainError::Validation(format!(
            "periodo_id must be at most {} characters",
            MAX_PERIOD_ID_LEN
        )));
    }
    Ok(period_id)
}

/// Service that creates missing charges for a period
pub struct ChargeGenerationService {
    repos: Arc<dyn RepositoryProvider>,
    page_size: u64,
}

impl ChargeGenerationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, page_size: u64) -> Self {
        Self {
            repos,
            page_size: page_size.max(1),
        }
    }

    /// Generate charges for every active enrollment not yet billed in
    /// `period_id`.
    ///
    /// Fails only on invalid input or when the charges or enrollments
    /// cannot be read at all. Problems with individual enrollments end up
    /// in [`GenerationReport::skipped`].
    pub async fn generate(&self, period_id: &str) -> DomainResult<GenerationReport> {
        let period_id = normalize_period_id(period_id)?;

        let existing = self.repos.charges().count_for_period(period_id).await?;
        info!(periodo_id = period_id, existing, "Generating charges");

        let mut report = GenerationReport::new(period_id);
        let mut cursor: Option<EnrollmentCursor> = None;

        loop {
            let page = self
                .repos
                .enrollments()
                .find_active_page(cursor.as_ref(), self.page_size)
                .await?;
            let fetched = page.len() as u64;

            for enrollment in &page {
                report.scanned += 1;
                match self.charge_enrollment(enrollment, period_id).await {
                    Ok(charge) => report.generated.push(charge),
                    Err(reason) => {
                        if reason == SkipReason::AlreadyBilled {
                            debug!(matricula_id = %enrollment.id, "Skipped: {}", reason);
                        } else {
                            warn!(
                                matricula_id = %enrollment.id,
                                reason = reason.code(),
                                "Skipped: {}",
                                reason
                            );
                        }
                        report.skipped.push(SkippedEnrollment {
                            enrollment_id: enrollment.id.clone(),
                            reason,
                        });
                    }
                }
            }

            match page.last() {
                Some(last) if fetched == self.page_size => {
                    cursor = Some(EnrollmentCursor::after(last));
                }
                _ => break,
            }
        }

        info!(
            periodo_id = period_id,
            scanned = report.scanned,
            generated = report.generated_count(),
            skipped = report.skipped.len(),
            "Charge generation finished"
        );

        Ok(report)
    }

    async fn charge_enrollment(
        &self,
        enrollment: &Enrollment,
        period_id: &str,
    ) -> Result<Charge, SkipReason> {
        let billed = self
            .repos
            .charges()
            .exists_for(&enrollment.id, period_id)
            .await
            .map_err(lookup_failed)?;
        if billed {
            return Err(SkipReason::AlreadyBilled);
        }

        let class = self
            .repos
            .classes()
            .find_by_id(&enrollment.class_id)
            .await
            .map_err(lookup_failed)?
            .ok_or_else(|| SkipReason::ClassNotFound {
                class_id: enrollment.class_id.clone(),
            })?;

        let concept_id = class
            .fee_concept_id
            .ok_or_else(|| SkipReason::ClassWithoutConcept {
                class_id: class.id.clone(),
            })?;

        let concept = self
            .repos
            .fee_concepts()
            .find_by_id(&concept_id)
            .await
            .map_err(lookup_failed)?
            .ok_or_else(|| SkipReason::ConceptNotFound {
                concept_id: concept_id.clone(),
            })?;

        let charge = NewCharge::for_enrollment(enrollment, &concept, period_id);
        match self.repos.charges().create(charge).await {
            Ok(created) => Ok(created),
            // Another run inserted the same pair after our existence check
            Err(DomainError::Conflict(_)) => Err(SkipReason::AlreadyBilled),
            Err(e) => Err(SkipReason::InsertFailed(e.to_string())),
        }
    }
}

fn lookup_failed(e: DomainError) -> SkipReason {
    SkipReason::LookupFailed(e.to_string())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use sea_orm::{ConnectionTrait, DatabaseConnection};

    use super::*;
    use crate::domain::{
        ChargeRepository, ChargeStatus, Class, ClassRepository, EnrollmentRepository, FeeConcept,
        FeeConceptRepository,
    };
    use crate::infrastructure::database::repositories::charge_repository::SeaOrmChargeRepository;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::testing::memory_db;

    fn price(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn setup() -> (DatabaseConnection, Arc<SeaOrmRepositoryProvider>) {
        let db = memory_db().await;
        let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        (db, repos)
    }

    async fn seed_priced_class(repos: &SeaOrmRepositoryProvider, class_id: &str, amount: &str) {
        let concept_id = format!("k-{class_id}");
        repos
            .fee_concepts()
            .save(FeeConcept::new(&concept_id, "Mensualidad", price(amount)))
            .await
            .unwrap();
        repos
            .classes()
            .save(Class::new(class_id, "Clase", Some(concept_id)))
            .await
            .unwrap();
    }

    async fn enroll(repos: &SeaOrmRepositoryProvider, id: &str, class_id: &str) {
        repos
            .enrollments()
            .save(Enrollment::new(id, format!("atleta-{id}"), class_id))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn generates_once_per_enrollment_and_period() {
        let (_db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "50.00").await;
        enroll(&repos, "E1", "C1").await;
        let service = ChargeGenerationService::new(repos.clone(), 1000);

        let first = service.generate("2024-Q1").await.unwrap();
        assert_eq!(first.generated_count(), 1);
        let charge = &first.generated[0];
        assert_eq!(charge.total_amount, price("50.00"));
        assert_eq!(charge.status, ChargeStatus::Pending);
        assert_eq!(charge.period_id, "2024-Q1");
        assert_eq!(charge.enrollment_id, "E1");
        assert_eq!(charge.athlete_id, "atleta-E1");
        assert_eq!(charge.fee_concept_id, "k-C1");

        let second = service.generate("2024-Q1").await.unwrap();
        assert_eq!(second.generated_count(), 0);
        assert_eq!(second.skipped_with("already_billed"), 1);

        let next_period = service.generate("2024-Q2").await.unwrap();
        assert_eq!(next_period.generated_count(), 1);

        assert_eq!(repos.charges().count_for_period("2024-Q1").await.unwrap(), 1);
        assert_eq!(repos.charges().count_for_period("2024-Q2").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn every_resolvable_enrollment_is_billed() {
        let (_db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "30.00").await;
        seed_priced_class(&repos, "C2", "45.50").await;
        for i in 0..4 {
            enroll(&repos, &format!("E{i}"), if i % 2 == 0 { "C1" } else { "C2" }).await;
        }

        let report = ChargeGenerationService::new(repos.clone(), 1000)
            .generate("2024-03")
            .await
            .unwrap();

        assert_eq!(report.scanned, 4);
        assert_eq!(report.generated_count(), 4);
        assert!(report.skipped.is_empty());
        let total: Decimal = report.generated.iter().map(|c| c.total_amount).sum();
        assert_eq!(total, price("151.00"));
    }

    #[tokio::test]
    async fn unresolvable_enrollments_are_skipped_without_failing() {
        let (_db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "50.00").await;
        repos
            .classes()
            .save(Class::new("C-free", "Sin costo", None))
            .await
            .unwrap();
        repos
            .classes()
            .save(Class::new("C-orphan", "Huérfana", Some("k-missing".into())))
            .await
            .unwrap();

        enroll(&repos, "ok", "C1").await;
        enroll(&repos, "no-class", "C-deleted").await;
        enroll(&repos, "no-concept", "C-free").await;
        enroll(&repos, "bad-concept", "C-orphan").await;

        let report = ChargeGenerationService::new(repos.clone(), 1000)
            .generate("2024-Q1")
            .await
            .unwrap();

        assert_eq!(report.generated_count(), 1);
        assert_eq!(report.generated[0].enrollment_id, "ok");
        assert_eq!(report.skipped.len(), 3);

        let reason_for = |id: &str| {
            report
                .skipped
                .iter()
                .find(|s| s.enrollment_id == id)
                .map(|s| s.reason.clone())
                .unwrap()
        };
        assert_eq!(
            reason_for("no-class"),
            SkipReason::ClassNotFound { class_id: "C-deleted".into() }
        );
        assert_eq!(
            reason_for("no-concept"),
            SkipReason::ClassWithoutConcept { class_id: "C-free".into() }
        );
        assert_eq!(
            reason_for("bad-concept"),
            SkipReason::ConceptNotFound { concept_id: "k-missing".into() }
        );
    }

    #[tokio::test]
    async fn inactive_enrollments_are_ignored() {
        let (_db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "50.00").await;
        repos
            .enrollments()
            .save(Enrollment::new("E-old", "a1", "C1").deactivated())
            .await
            .unwrap();

        let report = ChargeGenerationService::new(repos.clone(), 1000)
            .generate("2024-Q1")
            .await
            .unwrap();

        assert_eq!(report.scanned, 0);
        assert_eq!(report.generated_count(), 0);
    }

    #[tokio::test]
    async fn paginates_past_the_page_size() {
        let (_db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "10.00").await;
        for i in 0..5 {
            enroll(&repos, &format!("E{i}"), "C1").await;
        }

        let report = ChargeGenerationService::new(repos.clone(), 2)
            .generate("2024-Q1")
            .await
            .unwrap();

        assert_eq!(report.scanned, 5);
        assert_eq!(report.generated_count(), 5);
    }

    #[tokio::test]
    async fn exact_multiple_of_page_size_is_fully_scanned() {
        let (_db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "10.00").await;
        for i in 0..4 {
            enroll(&repos, &format!("E{i}"), "C1").await;
        }

        let report = ChargeGenerationService::new(repos.clone(), 2)
            .generate("2024-Q1")
            .await
            .unwrap();

        assert_eq!(report.scanned, 4);
        assert_eq!(report.generated_count(), 4);
    }

    #[tokio::test]
    async fn period_id_is_trimmed() {
        let (_db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "10.00").await;
        enroll(&repos, "E1", "C1").await;

        let report = ChargeGenerationService::new(repos.clone(), 1000)
            .generate("  2024-Q1 ")
            .await
            .unwrap();

        assert_eq!(report.period_id, "2024-Q1");
        assert!(repos.charges().exists_for("E1", "2024-Q1").await.unwrap());
    }

    #[tokio::test]
    async fn blank_or_oversized_period_is_rejected_before_any_write() {
        let (_db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "10.00").await;
        enroll(&repos, "E1", "C1").await;
        let service = ChargeGenerationService::new(repos.clone(), 1000);

        let err = service.generate("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let long = "x".repeat(MAX_PERIOD_ID_LEN + 1);
        let err = service.generate(&long).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert!(!repos.charges().exists_for("E1", "   ").await.unwrap());
        assert_eq!(repos.charges().count_for_period(&long).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_charges_table_is_a_storage_error() {
        let (db, repos) = setup().await;
        db.execute_unprepared("DROP TABLE cargos").await.unwrap();

        let err = ChargeGenerationService::new(repos, 1000)
            .generate("2024-Q1")
            .await
            .unwrap_err();
        assert!(err.is_storage(), "got {err:?}");
    }

    #[tokio::test]
    async fn unreadable_enrollments_is_a_storage_error() {
        let (db, repos) = setup().await;
        db.execute_unprepared("DROP TABLE matriculas").await.unwrap();

        let err = ChargeGenerationService::new(repos, 1000)
            .generate("2024-Q1")
            .await
            .unwrap_err();
        assert!(err.is_storage(), "got {err:?}");
    }

    /// Charge store with injectable faults on top of the real one.
    struct FaultyCharges {
        inner: SeaOrmChargeRepository,
        /// Existence check always misses, as if another run inserted the
        /// charge between our check and our insert.
        blind: bool,
        fail_check_for: Option<&'static str>,
        fail_insert_for: Option<&'static str>,
    }

    impl FaultyCharges {
        fn new(db: DatabaseConnection) -> Self {
            Self {
                inner: SeaOrmChargeRepository::new(db),
                blind: false,
                fail_check_for: None,
                fail_insert_for: None,
            }
        }
    }

    #[async_trait]
    impl ChargeRepository for FaultyCharges {
        async fn exists_for(&self, enrollment_id: &str, period_id: &str) -> DomainResult<bool> {
            if self.fail_check_for == Some(enrollment_id) {
                return Err(DomainError::Storage("database is locked".into()));
            }
            if self.blind {
                return Ok(false);
            }
            self.inner.exists_for(enrollment_id, period_id).await
        }

        async fn find_for_period(&self, period_id: &str) -> DomainResult<Vec<Charge>> {
            self.inner.find_for_period(period_id).await
        }

        async fn count_for_period(&self, period_id: &str) -> DomainResult<u64> {
            self.inner.count_for_period(period_id).await
        }

        async fn create(&self, charge: NewCharge) -> DomainResult<Charge> {
            if self.fail_insert_for == Some(charge.enrollment_id.as_str()) {
                return Err(DomainError::Storage("disk I/O error".into()));
            }
            self.inner.create(charge).await
        }
    }

    struct FaultyProvider {
        inner: Arc<SeaOrmRepositoryProvider>,
        charges: FaultyCharges,
    }

    impl RepositoryProvider for FaultyProvider {
        fn enrollments(&self) -> &dyn EnrollmentRepository {
            self.inner.enrollments()
        }

        fn classes(&self) -> &dyn ClassRepository {
            self.inner.classes()
        }

        fn fee_concepts(&self) -> &dyn FeeConceptRepository {
            self.inner.fee_concepts()
        }

        fn charges(&self) -> &dyn ChargeRepository {
            &self.charges
        }
    }

    #[tokio::test]
    async fn lost_race_is_reported_as_already_billed() {
        let (db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "50.00").await;
        enroll(&repos, "E1", "C1").await;
        ChargeGenerationService::new(repos.clone(), 1000)
            .generate("2024-Q1")
            .await
            .unwrap();

        let racing = Arc::new(FaultyProvider {
            inner: repos.clone(),
            charges: FaultyCharges {
                blind: true,
                ..FaultyCharges::new(db)
            },
        });
        let report = ChargeGenerationService::new(racing, 1000)
            .generate("2024-Q1")
            .await
            .unwrap();

        assert_eq!(report.generated_count(), 0);
        assert_eq!(report.skipped_with("already_billed"), 1);
        assert_eq!(repos.charges().count_for_period("2024-Q1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn failed_insert_skips_only_that_enrollment() {
        let (db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "50.00").await;
        for id in ["E1", "E2", "E3"] {
            enroll(&repos, id, "C1").await;
        }

        let provider = Arc::new(FaultyProvider {
            inner: repos.clone(),
            charges: FaultyCharges {
                fail_insert_for: Some("E2"),
                ..FaultyCharges::new(db)
            },
        });
        let report = ChargeGenerationService::new(provider, 1000)
            .generate("2024-Q1")
            .await
            .unwrap();

        assert_eq!(report.scanned, 3);
        assert_eq!(report.generated_count(), 2);
        assert_eq!(report.skipped_with("insert_failed"), 1);
        assert_eq!(report.skipped[0].enrollment_id, "E2");
        assert!(!repos.charges().exists_for("E2", "2024-Q1").await.unwrap());
        assert!(repos.charges().exists_for("E1", "2024-Q1").await.unwrap());
        assert!(repos.charges().exists_for("E3", "2024-Q1").await.unwrap());
    }

    #[tokio::test]
    async fn failed_existence_check_skips_only_that_enrollment() {
        let (db, repos) = setup().await;
        seed_priced_class(&repos, "C1", "50.00").await;
        for id in ["E1", "E2", "E3"] {
            enroll(&repos, id, "C1").await;
        }

        let provider = Arc::new(FaultyProvider {
            inner: repos.clone(),
            charges: FaultyCharges {
                fail_check_for: Some("E1"),
                ..FaultyCharges::new(db)
            },
        });
        let report = ChargeGenerationService::new(provider, 1000)
            .generate("2024-Q1")
            .await
            .unwrap();

        assert_eq!(report.generated_count(), 2);
        assert_eq!(report.skipped_with("lookup_failed"), 1);
        assert_eq!(report.skipped[0].enrollment_id, "E1");
        assert!(matches!(report.skipped[0].reason, SkipReason::LookupFailed(_)));
        assert!(!repos.charges().exists_for("E1", "2024-Q1").await.unwrap());
    }

    #[test]
    fn normalize_accepts_opaque_ids() {
        assert_eq!(normalize_period_id("2024-Q1").unwrap(), "2024-Q1");
        assert_eq!(normalize_period_id(" abc123 ").unwrap(), "abc123");
        assert!(normalize_period_id("").is_err());
    }

    #[test]
    fn skip_reason_codes_are_stable() {
        assert_eq!(SkipReason::AlreadyBilled.code(), "already_billed");
        assert_eq!(
            SkipReason::ConceptNotFound { concept_id: "k".into() }.to_string(),
            "fee concept k not found"
        );
    }
}

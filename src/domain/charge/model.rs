//! Charge domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Enrollment, FeeConcept};

/// Charge lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
}

impl ChargeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Paid => "pagado",
            Self::Cancelled => "anulado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pendiente" => Some(Self::Pending),
            "pagado" => Some(Self::Paid),
            "anulado" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored charge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge {
    pub id: String,
    pub athlete_id: String,
    pub fee_concept_id: String,
    pub period_id: String,
    pub enrollment_id: String,
    pub total_amount: Decimal,
    pub status: ChargeStatus,
    pub created_at: DateTime<Utc>,
}

/// Charge about to be inserted; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharge {
    pub athlete_id: String,
    pub fee_concept_id: String,
    pub period_id: String,
    pub enrollment_id: String,
    pub total_amount: Decimal,
    pub status: ChargeStatus,
}

impl NewCharge {
    /// Pending charge for `enrollment` in `period_id`, priced from `concept`.
    pub fn for_enrollment(enrollment: &Enrollment, concept: &FeeConcept, period_id: &str) -> Self {
        Self {
            athlete_id: enrollment.athlete_id.clone(),
            fee_concept_id: concept.id.clone(),
            period_id: period_id.to_string(),
            enrollment_id: enrollment.id.clone(),
            total_amount: concept.price,
            status: ChargeStatus::Pending,
        }
    }
}

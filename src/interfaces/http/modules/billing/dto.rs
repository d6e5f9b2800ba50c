//! Billing DTOs

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Charge;

/// Request to generate the charges of a billing period
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateChargesRequest {
    /// Opaque billing period identifier, e.g. `2024-Q1`. Surrounding
    /// whitespace is trimmed; at most 64 characters remain.
    #[validate(length(min = 1, message = "periodo_id is required"))]
    #[schema(example = "2024-Q1")]
    pub periodo_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateChargesResponse {
    #[schema(example = "Proceso completado")]
    pub message: String,
    /// Charges created by this call
    pub cargos_generados: usize,
}

impl GenerateChargesResponse {
    pub fn completed(generated: usize) -> Self {
        Self {
            message: "Proceso completado".to_string(),
            cargos_generados: generated,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChargeListQuery {
    /// Billing period to list
    pub periodo_id: Option<String>,
}

/// Stored charge
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChargeDto {
    pub id: String,
    pub atleta_id: String,
    pub concepto_id: String,
    pub periodo_id: String,
    pub matricula_id: String,
    #[schema(example = 50.0)]
    pub monto_total: f64,
    /// `pendiente`, `pagado` or `anulado`
    pub estado: String,
    pub created_at: DateTime<Utc>,
}

impl From<Charge> for ChargeDto {
    fn from(c: Charge) -> Self {
        Self {
            monto_total: c.total_amount.to_f64().unwrap_or_default(),
            estado: c.status.to_string(),
            id: c.id,
            atleta_id: c.athlete_id,
            concepto_id: c.fee_concept_id,
            periodo_id: c.period_id,
            matricula_id: c.enrollment_id,
            created_at: c.created_at,
        }
    }
}

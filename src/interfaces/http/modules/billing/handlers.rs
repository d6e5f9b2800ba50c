//! Billing REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::error;

use super::dto::{ChargeDto, ChargeListQuery, GenerateChargesRequest, GenerateChargesResponse};
use crate::application::{normalize_period_id, ChargeGenerationService};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{
    api_error, domain_error, ApiError, ApiResponse, ValidatedJson,
};

/// State for billing routes
#[derive(Clone)]
pub struct BillingState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub generator: Arc<ChargeGenerationService>,
}

#[utoipa::path(
    post,
    path = "/api/generar-deudas",
    tag = "Billing",
    request_body = GenerateChargesRequest,
    responses(
        (status = 200, description = "Charges generated", body = GenerateChargesResponse),
        (status = 400, description = "Missing or invalid periodo_id", body = ApiResponse<String>),
        (status = 500, description = "Record store unavailable", body = ApiResponse<String>)
    )
)]
/// Generate the missing charges for `periodo_id`.
///
/// The period id is trimmed before use, so `" 2024-Q1"` bills and stores
/// charges under `"2024-Q1"`. Length is checked on the trimmed value.
pub async fn generate_charges(
    State(state): State<BillingState>,
    ValidatedJson(req): ValidatedJson<GenerateChargesRequest>,
) -> Result<Json<GenerateChargesResponse>, ApiError> {
    match state.generator.generate(&req.periodo_id).await {
        Ok(report) => Ok(Json(GenerateChargesResponse::completed(
            report.generated_count(),
        ))),
        Err(e) => {
            if e.is_storage() {
                error!(periodo_id = %req.periodo_id, "Charge generation failed: {}", e);
            }
            Err(domain_error(e))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/cargos",
    tag = "Billing",
    params(ChargeListQuery),
    responses(
        (status = 200, description = "Charges of the period", body = ApiResponse<Vec<ChargeDto>>),
        (status = 400, description = "Missing periodo_id", body = ApiResponse<String>)
    )
)]
pub async fn list_charges(
    State(state): State<BillingState>,
    Query(query): Query<ChargeListQuery>,
) -> Result<Json<ApiResponse<Vec<ChargeDto>>>, ApiError> {
    let raw = query
        .periodo_id
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "periodo_id is required"))?;
    let period_id = normalize_period_id(&raw).map_err(domain_error)?;

    let charges = state
        .repos
        .charges()
        .find_for_period(period_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        charges.into_iter().map(ChargeDto::from).collect(),
    )))
}

//! Application services

mod charge_generation;

pub use charge_generation::{
    normalize_period_id, ChargeGenerationService, GenerationReport, SkipReason, SkippedEnrollment,
    MAX_PERIOD_ID_LEN,
};

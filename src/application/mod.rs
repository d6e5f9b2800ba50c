//! Application layer: use cases on top of the domain repositories.

pub mod services;

pub use services::{
    normalize_period_id, ChargeGenerationService, GenerationReport, SkipReason,
    SkippedEnrollment, MAX_PERIOD_ID_LEN,
};

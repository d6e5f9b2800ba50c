//! Class domain entity

use chrono::{DateTime, Utc};

/// A course or session; billed through its fee concept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub id: String,
    pub name: String,
    /// Fee concept reference (`concepto_id`). Classes may exist unpriced.
    pub fee_concept_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Class {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        fee_concept_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fee_concept_id,
            created_at: Utc::now(),
        }
    }
}

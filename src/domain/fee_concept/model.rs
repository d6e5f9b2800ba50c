//! Fee concept domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// How often a concept is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConceptKind {
    /// Billed every period
    #[default]
    Monthly,
    /// Billed on demand
    Optional,
}

impl ConceptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "mensual",
            Self::Optional => "opcional",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mensual" => Some(Self::Monthly),
            "opcional" => Some(Self::Optional),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A billable item with a price
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeConcept {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub kind: ConceptKind,
    pub created_at: DateTime<Utc>,
}

impl FeeConcept {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            kind: ConceptKind::Monthly,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_storage_names() {
        for kind in [ConceptKind::Monthly, ConceptKind::Optional] {
            assert_eq!(ConceptKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ConceptKind::parse("semanal"), None);
    }
}

//! Enrollment domain entity

use chrono::{DateTime, Utc};

/// Registration of an athlete in a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub id: String,
    pub active: bool,
    /// Learner reference (`atleta_id`)
    pub athlete_id: String,
    /// Class reference (`clase_id`)
    pub class_id: String,
    pub enrolled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(
        id: impl Into<String>,
        athlete_id: impl Into<String>,
        class_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            active: true,
            athlete_id: athlete_id.into(),
            class_id: class_id.into(),
            enrolled_at: Some(now),
            created_at: now,
        }
    }

    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}

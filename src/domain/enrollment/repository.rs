//! Enrollment repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::Enrollment;
use crate::domain::DomainResult;

/// Position in the active-enrollment listing: the last row already seen.
///
/// Listing order is `created_at` desc then `id` desc, so the next page
/// holds rows strictly after this key. Rows deactivated between pages do
/// not shift later rows out of reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentCursor {
    pub created_at: DateTime<Utc>,
    pub id: String,
}

impl EnrollmentCursor {
    pub fn after(enrollment: &Enrollment) -> Self {
        Self {
            created_at: enrollment.created_at,
            id: enrollment.id.clone(),
        }
    }
}

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Up to `limit` active enrollments following `after` (from the start
    /// when `None`), most recently created first.
    async fn find_active_page(
        &self,
        after: Option<&EnrollmentCursor>,
        limit: u64,
    ) -> DomainResult<Vec<Enrollment>>;

    /// Insert an enrollment. An empty `id` gets a generated one.
    async fn save(&self, enrollment: Enrollment) -> DomainResult<Enrollment>;
}

//! Audit columns present on every table.

use chrono::{DateTime, Utc};

/// Who created and last modified a row, and when.
///
/// `created_*` is written once on insert; `updated_*` stays `NULL` until the
/// first update. The identity comes from the request's
/// [`AuditContext`](crate::middleware::audit::AuditContext).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AuditFields {
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl AuditFields {
    /// Audit fields for a row inserted now by `auditor`.
    pub fn created_by(auditor: &str) -> Self {
        Self {
            created_at: Utc::now(),
            created_by: auditor.to_string(),
            updated_at: None,
            updated_by: None,
        }
    }

    /// Stamp an update by `auditor`.
    pub fn touch(&mut self, auditor: &str) {
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(auditor.to_string());
    }
}

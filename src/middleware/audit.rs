//! Audit identity middleware.
//!
//! This middleware runs on every request to:
//! 1. Read the `X-Audit-User` header, if any
//! 2. Fall back to the service's configured default auditor
//! 3. Inject an [`AuditContext`] into the request for the handlers

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Header carrying the identity to stamp on created/updated rows.
pub const AUDIT_USER_HEADER: &str = "x-audit-user";

/// Audit columns are 50 characters wide.
const MAX_AUDITOR_LEN: usize = 50;

/// Identity responsible for the writes of one request.
///
/// Handlers extract it with `Extension<AuditContext>` and pass it to every
/// service operation that writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    pub auditor: String,
}

impl AuditContext {
    pub fn new(auditor: impl Into<String>) -> Self {
        Self {
            auditor: auditor.into(),
        }
    }
}

/// Default identity used when a request does not name one.
#[derive(Debug, Clone)]
pub struct DefaultAuditor(pub String);

/// Audit middleware function.
///
/// A header that is missing, empty, not valid UTF-8 or longer than the audit
/// column falls back to the default.
pub async fn audit_context(
    State(default): State<DefaultAuditor>,
    mut request: Request,
    next: Next,
) -> Response {
    let auditor = request
        .headers()
        .get(AUDIT_USER_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty() && name.len() <= MAX_AUDITOR_LEN)
        .map(str::to_string)
        .unwrap_or(default.0);

    request.extensions_mut().insert(AuditContext::new(auditor));

    next.run(request).await
}

//! HTTP middleware components.
//!
//! Middleware run before (and after) the route handlers of every service.

/// Fills `apiPath` into error bodies
pub mod api_path;
/// Resolves the audit identity of each request
pub mod audit;

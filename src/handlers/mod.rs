//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Extracts the path parameter or JSON body
//! 2. Validates it at the boundary
//! 3. Delegates to the module's provisioning service
//! 4. Returns the JSON representation or an `AppError`

use std::sync::Arc;

use crate::{config::Config, models::info::ServiceInfo};

/// Accounts service endpoints
pub mod accounts;
/// Cards service endpoints
pub mod cards;
/// Unknown paths and methods
pub mod fallback;
/// Health check endpoint
pub mod health;
/// Build and contact info endpoints
pub mod info;
/// Loans service endpoints
pub mod loans;

/// State shared by every handler of one service.
#[derive(Clone)]
pub struct AppState<S> {
    pub service: S,
    pub build_version: Arc<str>,
    pub info: Arc<ServiceInfo>,
}

impl<S> AppState<S> {
    pub fn new(service: S, config: &Config) -> Self {
        Self {
            service,
            build_version: Arc::from(config.build_version.as_str()),
            info: Arc::new(config.info.clone()),
        }
    }
}

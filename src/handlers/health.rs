//! Health check endpoint for service monitoring.

use async_trait::async_trait;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::AppError,
    handlers::AppState,
    services::{
        account_service::AccountService, card_service::CardService, loan_service::LoanService,
    },
};

/// A service whose backing store can be checked for reachability.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn check_store(&self) -> Result<(), AppError>;
}

#[async_trait]
impl StoreHealth for AccountService {
    async fn check_store(&self) -> Result<(), AppError> {
        self.ping().await
    }
}

#[async_trait]
impl StoreHealth for CardService {
    async fn check_store(&self) -> Result<(), AppError> {
        self.ping().await
    }
}

#[async_trait]
impl StoreHealth for LoanService {
    async fn check_store(&self) -> Result<(), AppError> {
        self.ping().await
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Store connection status
    pub storage: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "storage": "connected",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// # Response (500 Internal Server Error)
///
/// If the store is unreachable, returns standard error response.
pub async fn health_check<S: StoreHealth>(
    State(state): State<AppState<S>>,
) -> Result<Json<HealthResponse>, AppError> {
    state.service.check_store().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        storage: "connected".to_string(),
        timestamp: Utc::now(),
    }))
}

//! Build version and contact info, identical across the three services.

use axum::{Json, extract::State};

use crate::{handlers::AppState, models::info::ServiceInfo};

/// Plain-text build version, e.g. `0.1.0`.
pub async fn build_info<S>(State(state): State<AppState<S>>) -> String {
    state.build_version.to_string()
}

pub async fn service_info<S>(State(state): State<AppState<S>>) -> Json<ServiceInfo> {
    Json(state.info.as_ref().clone())
}

//! Cards service HTTP handlers.
//!
//! - POST /cards/{mobile_number} - Issue a card
//! - GET /cards/{mobile_number} - Card details
//! - PUT /cards - Update limits and usage
//! - DELETE /cards/{mobile_number} - Remove the card

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppError,
    handlers::AppState,
    middleware::audit::AuditContext,
    models::card::CardDto,
    services::card_service::CardService,
    validation::check_mobile_number_param,
};

/// Issue a default credit card.
///
/// # Response (201)
///
/// ```json
/// {
///   "mobileNumber": "9876543210",
///   "cardNumber": "100123456789",
///   "cardType": "Credit Card",
///   "totalLimit": 100000,
///   "amountUsed": 0,
///   "availableAmount": 100000
/// }
/// ```
pub async fn create_card(
    State(state): State<AppState<CardService>>,
    Extension(audit): Extension<AuditContext>,
    Path(mobile_number): Path<String>,
) -> Result<(StatusCode, Json<CardDto>), AppError> {
    check_mobile_number_param(&mobile_number)?;

    let card = state.service.create(&mobile_number, &audit).await?;

    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn fetch_card(
    State(state): State<AppState<CardService>>,
    Path(mobile_number): Path<String>,
) -> Result<Json<CardDto>, AppError> {
    check_mobile_number_param(&mobile_number)?;

    Ok(Json(state.service.fetch(&mobile_number).await?))
}

/// Update the card selected by `mobileNumber`; responds `true`.
pub async fn update_card(
    State(state): State<AppState<CardService>>,
    Extension(audit): Extension<AuditContext>,
    payload: Result<Json<CardDto>, JsonRejection>,
) -> Result<Json<bool>, AppError> {
    let Json(dto) = payload?;
    dto.validate()?;

    Ok(Json(state.service.update(&dto, &audit).await?))
}

pub async fn delete_card(
    State(state): State<AppState<CardService>>,
    Path(mobile_number): Path<String>,
) -> Result<Json<bool>, AppError> {
    check_mobile_number_param(&mobile_number)?;

    Ok(Json(state.service.delete(&mobile_number).await?))
}

//! Accounts service HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /api/create - Provision a customer and account
//! - GET /api/fetch/{mobile_number} - Customer with embedded account
//! - PUT /api/update - Update account and customer contact fields
//! - DELETE /api/delete/{mobile_number} - Remove customer and account

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
    models::{customer::CustomerDto, status::StatusResponse},
    services::account_service::AccountService,
    validation::check_mobile_number_param,
};

/// Create a new customer with a default savings account.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Jane Doe",
///   "email": "jane@example.com",
///   "mobileNumber": "9876543210"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{ "statusCode": "201", "statusMsg": "Account created successfully" }`
/// - **Error (400)**: Malformed body or field validation failure
/// - **Error (409)**: A customer already holds the mobile number
pub async fn create_account(
    State(state): State<AppState<AccountService>>,
    Extension(audit): Extension<AuditContext>,
    payload: Result<Json<CustomerDto>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>), AppError> {
    let Json(dto) = payload?;
    dto.validate()?;

    state.service.create(&dto, &audit).await?;

    Ok((StatusCode::CREATED, Json(StatusResponse::created())))
}

/// Fetch a customer and their account by mobile number.
///
/// # Response
///
/// - **Success (200 OK)**: `CustomerDto` with `accountsDto`
/// - **Error (404)**: No customer holds the mobile number
pub async fn fetch_account(
    State(state): State<AppState<AccountService>>,
    Path(mobile_number): Path<String>,
) -> Result<Json<CustomerDto>, AppError> {
    check_mobile_number_param(&mobile_number)?;

    let customer = state.service.fetch(&mobile_number).await?;

    Ok(Json(customer))
}

/// Update an account and its owner's contact fields.
///
/// The account is selected by `accountsDto.accountNumber`.
pub async fn update_account(
    State(state): State<AppState<AccountService>>,
    Extension(audit): Extension<AuditContext>,
    payload: Result<Json<CustomerDto>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let Json(dto) = payload?;
    dto.validate()?;

    state.service.update(&dto, &audit).await?;

    Ok(Json(StatusResponse::processed()))
}

/// Delete the customer holding the mobile number, and their account.
pub async fn delete_account(
    State(state): State<AppState<AccountService>>,
    Path(mobile_number): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    check_mobile_number_param(&mobile_number)?;

    state.service.delete(&mobile_number).await?;

    Ok(Json(StatusResponse::processed()))
}

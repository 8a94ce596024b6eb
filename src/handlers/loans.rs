//! Loans service HTTP handlers.
//!
//! - POST /loans/{mobile_number} - Open a loan
//! - GET /loans/{mobile_number} - Loan details
//! - PUT /loans - Update amounts
//! - DELETE /loans/{mobile_number} - Remove the loan

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
    models::loan::LoanDto,
    services::loan_service::LoanService,
    validation::check_mobile_number_param,
};

/// Open a default home loan.
///
/// # Response (201)
///
/// ```json
/// {
///   "mobileNumber": "9876543210",
///   "loanNumber": "100987654321",
///   "loanType": "Home Loan",
///   "totalLoan": 100000,
///   "amountPaid": 0,
///   "outstandingAmount": 100000
/// }
/// ```
pub async fn create_loan(
    State(state): State<AppState<LoanService>>,
    Extension(audit): Extension<AuditContext>,
    Path(mobile_number): Path<String>,
) -> Result<(StatusCode, Json<LoanDto>), AppError> {
    check_mobile_number_param(&mobile_number)?;

    let loan = state.service.create(&mobile_number, &audit).await?;

    Ok((StatusCode::CREATED, Json(loan)))
}

pub async fn fetch_loan(
    State(state): State<AppState<LoanService>>,
    Path(mobile_number): Path<String>,
) -> Result<Json<LoanDto>, AppError> {
    check_mobile_number_param(&mobile_number)?;

    Ok(Json(state.service.fetch(&mobile_number).await?))
}

pub async fn update_loan(
    State(state): State<AppState<LoanService>>,
    Extension(audit): Extension<AuditContext>,
    payload: Result<Json<LoanDto>, JsonRejection>,
) -> Result<Json<bool>, AppError> {
    let Json(dto) = payload?;
    dto.validate()?;

    Ok(Json(state.service.update(&dto, &audit).await?))
}

pub async fn delete_loan(
    State(state): State<AppState<LoanService>>,
    Path(mobile_number): Path<String>,
) -> Result<Json<bool>, AppError> {
    check_mobile_number_param(&mobile_number)?;

    Ok(Json(state.service.delete(&mobile_number).await?))
}

//! Request-boundary validation rules shared by the three services.

use validator::{ValidationError, ValidationErrors};

use crate::error::AppError;

const MOBILE_NUMBER_MESSAGE: &str = "Mobile number must be exactly 10 digits";

/// A mobile number is exactly ten ASCII digits.
pub fn is_valid_mobile_number(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

/// `validator` custom rule for mobile number fields.
pub fn validate_mobile_number(value: &str) -> Result<(), ValidationError> {
    if is_valid_mobile_number(value) {
        return Ok(());
    }
    let mut error = ValidationError::new("mobile_number");
    error.message = Some(MOBILE_NUMBER_MESSAGE.into());
    Err(error)
}

/// Validate a mobile number taken from a URL path segment.
///
/// Produces the same field-level error body as a body field would.
pub fn check_mobile_number_param(value: &str) -> Result<(), AppError> {
    validate_mobile_number(value).map_err(|error| {
        let mut errors = ValidationErrors::new();
        errors.add("mobile_number", error);
        AppError::Validation(errors)
    })
}

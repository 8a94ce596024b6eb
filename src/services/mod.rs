//! Business logic services.
//!
//! One provisioning service per module. Services hold the read-check-write
//! logic and the entity/DTO mapping; HTTP handlers only parse, validate and
//! delegate.

pub mod account_service;
pub mod card_service;
pub mod loan_service;
pub mod record_number;

use crate::{
    error::AppError,
    repository::{StoreError, UniqueKey},
};

/// Map a store error raised while creating or re-keying a record.
///
/// A mobile-number or owner conflict means another request provisioned the
/// same number first; a record-number conflict that survived
/// [`record_number::allocate`] means every candidate was taken.
pub(crate) fn provisioning_error(
    err: StoreError,
    resource: &'static str,
    mobile_number: &str,
) -> AppError {
    match err {
        StoreError::Conflict(UniqueKey::MobileNumber | UniqueKey::Owner) => {
            AppError::already_exists(resource, mobile_number)
        }
        StoreError::Conflict(UniqueKey::RecordNumber) => AppError::Unexpected(format!(
            "no unused record number found after {} attempts",
            record_number::MAX_ALLOCATION_ATTEMPTS
        )),
        other => other.into(),
    }
}

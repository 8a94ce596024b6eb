//! Loan service - provisioning logic of the loans module.

use std::sync::Arc;

use crate::{
    error::AppError,
    middleware::audit::AuditContext,
    models::loan::{LoanDto, LoanUpdate, NewLoan},
    repository::LoanStore,
    services::{
        provisioning_error,
        record_number::{self, NumberSource, RandomNumbers},
    },
};

const LOAN: &str = "Loan";

#[derive(Clone)]
pub struct LoanService {
    store: Arc<dyn LoanStore>,
    numbers: Arc<dyn NumberSource>,
}

impl LoanService {
    pub fn new(store: Arc<dyn LoanStore>) -> Self {
        Self::with_numbers(store, Arc::new(RandomNumbers::LOAN))
    }

    pub fn with_numbers(store: Arc<dyn LoanStore>, numbers: Arc<dyn NumberSource>) -> Self {
        Self { store, numbers }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.store.ping().await?)
    }

    /// Open a default home loan for `mobile_number`.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists`: a loan already exists for this number
    /// - `Unexpected`: no free loan number was found
    #[tracing::instrument(skip(self, audit))]
    pub async fn create(
        &self,
        mobile_number: &str,
        audit: &AuditContext,
    ) -> Result<LoanDto, AppError> {
        if self.store.exists_by_mobile(mobile_number).await? {
            return Err(AppError::already_exists(LOAN, mobile_number));
        }

        let loan = record_number::allocate(self.numbers.as_ref(), |number| {
            self.store.insert(NewLoan::with_defaults(
                mobile_number,
                number.to_string(),
                &audit.auditor,
            ))
        })
        .await
        .map_err(|e| provisioning_error(e, LOAN, mobile_number))?;

        tracing::info!(loan_id = loan.loan_id, "Loan created");

        Ok(loan.into())
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, mobile_number: &str) -> Result<LoanDto, AppError> {
        let loan = self
            .store
            .find_by_mobile(mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found(LOAN, "mobileNumber", mobile_number))?;

        Ok(loan.into())
    }

    /// Overwrite type and amounts of the loan held by `dto.mobile_number`.
    /// Loan number and mobile number never change.
    #[tracing::instrument(skip(self, dto, audit), fields(mobile_number = %dto.mobile_number))]
    pub async fn update(&self, dto: &LoanDto, audit: &AuditContext) -> Result<bool, AppError> {
        let mut loan = self
            .store
            .find_by_mobile(&dto.mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found(LOAN, "mobileNumber", &dto.mobile_number))?;

        loan.apply(&LoanUpdate::from(dto), &audit.auditor);
        // The loan may have been deleted since it was read
        if !self.store.update(&loan).await? {
            return Err(AppError::not_found(LOAN, "mobileNumber", &dto.mobile_number));
        }

        tracing::info!(loan_id = loan.loan_id, "Loan updated");

        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, mobile_number: &str) -> Result<bool, AppError> {
        if !self.store.delete_by_mobile(mobile_number).await? {
            return Err(AppError::not_found(LOAN, "mobileNumber", mobile_number));
        }

        tracing::info!("Loan deleted");

        Ok(true)
    }
}

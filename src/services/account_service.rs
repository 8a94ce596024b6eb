//! Account service - provisioning logic of the accounts module.
//!
//! A customer and their account are always created, updated and deleted
//! together. The customer is resolved by mobile number; the account by its
//! owner on reads and by account number on updates.

use std::sync::Arc;

use crate::{
    error::AppError,
    middleware::audit::AuditContext,
    models::{account::AccountUpdate, customer::CustomerDto},
    repository::AccountStore,
    services::{
        provisioning_error,
        record_number::{self, NumberSource, RandomNumbers},
    },
};

const CUSTOMER: &str = "Customer";
const ACCOUNT: &str = "Account";

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    numbers: Arc<dyn NumberSource>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self::with_numbers(store, Arc::new(RandomNumbers::ACCOUNT))
    }

    pub fn with_numbers(store: Arc<dyn AccountStore>, numbers: Arc<dyn NumberSource>) -> Self {
        Self { store, numbers }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.store.ping().await?)
    }

    /// Provision a customer and a default savings account.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists`: a customer already holds this mobile number
    /// - `Unexpected`: no free account number was found
    #[tracing::instrument(skip(self, dto, audit), fields(mobile_number = %dto.mobile_number))]
    pub async fn create(
        &self,
        dto: &CustomerDto,
        audit: &AuditContext,
    ) -> Result<CustomerDto, AppError> {
        if self
            .store
            .find_customer_by_mobile(&dto.mobile_number)
            .await?
            .is_some()
        {
            return Err(AppError::already_exists(CUSTOMER, &dto.mobile_number));
        }

        let details = dto.details();
        let (customer, account) = record_number::allocate(self.numbers.as_ref(), |number| {
            self.store
                .insert_customer_with_account(&details, number, &audit.auditor)
        })
        .await
        .map_err(|e| provisioning_error(e, CUSTOMER, &dto.mobile_number))?;

        tracing::info!(
            customer_id = customer.customer_id,
            account_number = account.account_number,
            "Account created"
        );

        Ok(CustomerDto::from_parts(customer, account))
    }

    /// Customer details with the embedded account.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, mobile_number: &str) -> Result<CustomerDto, AppError> {
        let customer = self
            .store
            .find_customer_by_mobile(mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found(CUSTOMER, "mobileNumber", mobile_number))?;

        let account = self
            .store
            .find_account_by_customer(customer.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found(ACCOUNT, "customerId", customer.customer_id))?;

        Ok(CustomerDto::from_parts(customer, account))
    }

    /// Update the account selected by `dto.accounts_dto.account_number` and
    /// the contact fields of its owner.
    ///
    /// The payload's mobile number becomes the owner's mobile number. If
    /// another customer already holds it the update is rejected.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: the payload carries no account details
    /// - `NotFound`: no account with that number, or it has no owner
    /// - `AlreadyExists`: the new mobile number belongs to another customer
    #[tracing::instrument(skip(self, dto, audit), fields(mobile_number = %dto.mobile_number))]
    pub async fn update(&self, dto: &CustomerDto, audit: &AuditContext) -> Result<bool, AppError> {
        let account_dto = dto.accounts_dto.as_ref().ok_or_else(|| {
            AppError::InvalidRequest("accountsDto is required to update an account".to_string())
        })?;

        let mut account = self
            .store
            .find_account(account_dto.account_number)
            .await?
            .ok_or_else(|| {
                AppError::not_found(ACCOUNT, "accountNumber", account_dto.account_number)
            })?;

        let mut customer = self
            .store
            .find_customer(account.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found(CUSTOMER, "customerId", account.customer_id))?;

        account.apply(&AccountUpdate::from(account_dto), &audit.auditor);
        customer.apply(&dto.details(), &audit.auditor);

        let updated = self
            .store
            .update_customer_and_account(&customer, &account)
            .await
            .map_err(|e| provisioning_error(e, CUSTOMER, &dto.mobile_number))?;
        if !updated {
            return Err(AppError::not_found(
                ACCOUNT,
                "accountNumber",
                account.account_number,
            ));
        }

        tracing::info!(account_number = account.account_number, "Account updated");

        Ok(true)
    }

    /// Delete the customer holding `mobile_number` and their account.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, mobile_number: &str) -> Result<bool, AppError> {
        let customer = self
            .store
            .find_customer_by_mobile(mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found(CUSTOMER, "mobileNumber", mobile_number))?;

        if !self
            .store
            .delete_customer_and_account(customer.customer_id)
            .await?
        {
            return Err(AppError::not_found(CUSTOMER, "mobileNumber", mobile_number));
        }

        tracing::info!(customer_id = customer.customer_id, "Account deleted");

        Ok(true)
    }
}

//! Storage abstraction for the three services.
//!
//! Each service talks to its store through a trait so the same provisioning
//! logic runs against PostgreSQL in production and against the in-memory
//! store in local runs and tests. Every method that writes more than one row
//! does so atomically.

use std::fmt;

use async_trait::async_trait;

use crate::models::{
    account::Account,
    card::{Card, NewCard},
    customer::{Customer, CustomerDetails},
    loan::{Loan, NewLoan},
};

pub mod memory;
pub mod postgres;

/// Which unique constraint an insert or update collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    /// Customer/card/loan mobile number
    MobileNumber,
    /// Generated account/card/loan number
    RecordNumber,
    /// A second account for the same customer
    Owner,
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UniqueKey::MobileNumber => "mobile number",
            UniqueKey::RecordNumber => "record number",
            UniqueKey::Owner => "record owner",
        };
        f.write_str(name)
    }
}

/// Storage error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated on {0}")]
    Conflict(UniqueKey),

    /// Any other database failure.
    #[error(transparent)]
    Database(sqlx::Error),
}

/// Identity and record store of the accounts service.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Cheap connectivity check used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn find_customer_by_mobile(
        &self,
        mobile_number: &str,
    ) -> Result<Option<Customer>, StoreError>;

    async fn find_customer(&self, customer_id: i64) -> Result<Option<Customer>, StoreError>;

    async fn find_account_by_customer(
        &self,
        customer_id: i64,
    ) -> Result<Option<Account>, StoreError>;

    async fn find_account(&self, account_number: i64) -> Result<Option<Account>, StoreError>;

    /// Insert a customer and a default account numbered `account_number`
    /// for it, in one transaction.
    async fn insert_customer_with_account(
        &self,
        details: &CustomerDetails,
        account_number: i64,
        auditor: &str,
    ) -> Result<(Customer, Account), StoreError>;

    /// Persist the mutable columns of both rows in one transaction.
    ///
    /// Returns `false`, writing nothing, when either row no longer exists.
    async fn update_customer_and_account(
        &self,
        customer: &Customer,
        account: &Account,
    ) -> Result<bool, StoreError>;

    /// Remove the customer and every account it owns in one transaction.
    /// Returns `false` when the customer no longer exists.
    async fn delete_customer_and_account(&self, customer_id: i64) -> Result<bool, StoreError>;
}

/// Record store of the cards service. Cards are keyed by mobile number.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<Card>, StoreError>;

    async fn insert(&self, card: NewCard) -> Result<Card, StoreError>;

    /// Persist the mutable columns of `card`. Returns `false` when the card
    /// no longer exists.
    async fn update(&self, card: &Card) -> Result<bool, StoreError>;

    /// Returns `false` when no card exists for the number.
    async fn delete_by_mobile(&self, mobile_number: &str) -> Result<bool, StoreError>;
}

/// Record store of the loans service. Loans are keyed by mobile number.
#[async_trait]
pub trait LoanStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    async fn exists_by_mobile(&self, mobile_number: &str) -> Result<bool, StoreError>;

    async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<Loan>, StoreError>;

    async fn insert(&self, loan: NewLoan) -> Result<Loan, StoreError>;

    /// Returns `false` when the loan no longer exists.
    async fn update(&self, loan: &Loan) -> Result<bool, StoreError>;

    async fn delete_by_mobile(&self, mobile_number: &str) -> Result<bool, StoreError>;
}

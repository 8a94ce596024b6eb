//! In-memory store implementations.
//!
//! Used when a service runs without `*_DATABASE_URL` and by the test-suite.
//! They enforce the same unique constraints as the PostgreSQL schema, and
//! each method holds the lock for its whole read-check-write, so multi-row
//! writes are atomic here too.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{
    models::{
        account::Account,
        audit::AuditFields,
        card::{Card, NewCard},
        customer::{Customer, CustomerDetails},
        loan::{Loan, NewLoan},
    },
    repository::{AccountStore, CardStore, LoanStore, StoreError, UniqueKey},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Every method validates before it mutates, so a poisoned map is still consistent
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct AccountTables {
    last_customer_id: i64,
    customers: BTreeMap<i64, Customer>,
    /// Keyed by account number
    accounts: BTreeMap<i64, Account>,
}

/// In-memory customers and accounts.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    tables: Mutex<AccountTables>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_customer_by_mobile(
        &self,
        mobile_number: &str,
    ) -> Result<Option<Customer>, StoreError> {
        let tables = lock(&self.tables);
        Ok(tables
            .customers
            .values()
            .find(|c| c.mobile_number == mobile_number)
            .cloned())
    }

    async fn find_customer(&self, customer_id: i64) -> Result<Option<Customer>, StoreError> {
        Ok(lock(&self.tables).customers.get(&customer_id).cloned())
    }

    async fn find_account_by_customer(
        &self,
        customer_id: i64,
    ) -> Result<Option<Account>, StoreError> {
        let tables = lock(&self.tables);
        Ok(tables
            .accounts
            .values()
            .find(|a| a.customer_id == customer_id)
            .cloned())
    }

    async fn find_account(&self, account_number: i64) -> Result<Option<Account>, StoreError> {
        Ok(lock(&self.tables).accounts.get(&account_number).cloned())
    }

    async fn insert_customer_with_account(
        &self,
        details: &CustomerDetails,
        account_number: i64,
        auditor: &str,
    ) -> Result<(Customer, Account), StoreError> {
        let mut tables = lock(&self.tables);

        if tables
            .customers
            .values()
            .any(|c| c.mobile_number == details.mobile_number)
        {
            return Err(StoreError::Conflict(UniqueKey::MobileNumber));
        }
        if tables.accounts.contains_key(&account_number) {
            return Err(StoreError::Conflict(UniqueKey::RecordNumber));
        }

        tables.last_customer_id += 1;
        let customer = Customer {
            customer_id: tables.last_customer_id,
            name: details.name.clone(),
            email: details.email.clone(),
            mobile_number: details.mobile_number.clone(),
            audit: AuditFields::created_by(auditor),
        };
        let account = Account::new_default(account_number, customer.customer_id, auditor);

        tables.customers.insert(customer.customer_id, customer.clone());
        tables.accounts.insert(account_number, account.clone());

        Ok((customer, account))
    }

    async fn update_customer_and_account(
        &self,
        customer: &Customer,
        account: &Account,
    ) -> Result<bool, StoreError> {
        let mut tables = lock(&self.tables);

        if !tables.accounts.contains_key(&account.account_number)
            || !tables.customers.contains_key(&customer.customer_id)
        {
            return Ok(false);
        }
        if tables.customers.values().any(|c| {
            c.customer_id != customer.customer_id && c.mobile_number == customer.mobile_number
        }) {
            return Err(StoreError::Conflict(UniqueKey::MobileNumber));
        }

        if let Some(stored) = tables.accounts.get_mut(&account.account_number) {
            stored.account_type = account.account_type.clone();
            stored.branch_address = account.branch_address.clone();
            stored.audit.updated_at = account.audit.updated_at;
            stored.audit.updated_by = account.audit.updated_by.clone();
        }
        if let Some(stored) = tables.customers.get_mut(&customer.customer_id) {
            stored.name = customer.name.clone();
            stored.email = customer.email.clone();
            stored.mobile_number = customer.mobile_number.clone();
            stored.audit.updated_at = customer.audit.updated_at;
            stored.audit.updated_by = customer.audit.updated_by.clone();
        }

        Ok(true)
    }

    async fn delete_customer_and_account(&self, customer_id: i64) -> Result<bool, StoreError> {
        let mut tables = lock(&self.tables);
        tables.accounts.retain(|_, a| a.customer_id != customer_id);
        Ok(tables.customers.remove(&customer_id).is_some())
    }
}

/// Rows of a table keyed by mobile number with a unique record number,
/// shared by the card and loan stores.
#[derive(Debug)]
struct RecordTable<R> {
    last_id: i64,
    rows: BTreeMap<String, R>,
}

impl<R> Default for RecordTable<R> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

/// In-memory cards.
#[derive(Debug, Default)]
pub struct MemoryCardStore {
    table: Mutex<RecordTable<Card>>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<Card>, StoreError> {
        Ok(lock(&self.table).rows.get(mobile_number).cloned())
    }

    async fn insert(&self, card: NewCard) -> Result<Card, StoreError> {
        let mut table = lock(&self.table);

        if table.rows.contains_key(&card.mobile_number) {
            return Err(StoreError::Conflict(UniqueKey::MobileNumber));
        }
        if table.rows.values().any(|c| c.card_number == card.card_number) {
            return Err(StoreError::Conflict(UniqueKey::RecordNumber));
        }

        table.last_id += 1;
        let card = card.into_card(table.last_id);
        table.rows.insert(card.mobile_number.clone(), card.clone());

        Ok(card)
    }

    async fn update(&self, card: &Card) -> Result<bool, StoreError> {
        let mut table = lock(&self.table);
        let Some(stored) = table.rows.values_mut().find(|c| c.card_id == card.card_id) else {
            return Ok(false);
        };
        stored.card_type = card.card_type.clone();
        stored.total_limit = card.total_limit;
        stored.amount_used = card.amount_used;
        stored.available_amount = card.available_amount;
        stored.audit.updated_at = card.audit.updated_at;
        stored.audit.updated_by = card.audit.updated_by.clone();

        Ok(true)
    }

    async fn delete_by_mobile(&self, mobile_number: &str) -> Result<bool, StoreError> {
        Ok(lock(&self.table).rows.remove(mobile_number).is_some())
    }
}

/// In-memory loans.
#[derive(Debug, Default)]
pub struct MemoryLoanStore {
    table: Mutex<RecordTable<Loan>>,
}

impl MemoryLoanStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoanStore for MemoryLoanStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn exists_by_mobile(&self, mobile_number: &str) -> Result<bool, StoreError> {
        Ok(lock(&self.table).rows.contains_key(mobile_number))
    }

    async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<Loan>, StoreError> {
        Ok(lock(&self.table).rows.get(mobile_number).cloned())
    }

    async fn insert(&self, loan: NewLoan) -> Result<Loan, StoreError> {
        let mut table = lock(&self.table);

        if table.rows.contains_key(&loan.mobile_number) {
            return Err(StoreError::Conflict(UniqueKey::MobileNumber));
        }
        if table.rows.values().any(|l| l.loan_number == loan.loan_number) {
            return Err(StoreError::Conflict(UniqueKey::RecordNumber));
        }

        table.last_id += 1;
        let loan = loan.into_loan(table.last_id);
        table.rows.insert(loan.mobile_number.clone(), loan.clone());

        Ok(loan)
    }

    async fn update(&self, loan: &Loan) -> Result<bool, StoreError> {
        let mut table = lock(&self.table);
        let Some(stored) = table.rows.values_mut().find(|l| l.loan_id == loan.loan_id) else {
            return Ok(false);
        };
        stored.loan_type = loan.loan_type.clone();
        stored.total_loan = loan.total_loan;
        stored.amount_paid = loan.amount_paid;
        stored.outstanding_amount = loan.outstanding_amount;
        stored.audit.updated_at = loan.audit.updated_at;
        stored.audit.updated_by = loan.audit.updated_by.clone();

        Ok(true)
    }

    async fn delete_by_mobile(&self, mobile_number: &str) -> Result<bool, StoreError> {
        Ok(lock(&self.table).rows.remove(mobile_number).is_some())
    }
}

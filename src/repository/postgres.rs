//! PostgreSQL implementations of the store traits.
//!
//! Multi-row writes run inside a database transaction; dropping the
//! transaction on an early `?` return rolls it back.

use async_trait::async_trait;

use crate::{
    db::DbPool,
    models::{
        account::Account,
        card::{Card, NewCard},
        customer::{Customer, CustomerDetails},
        loan::{Loan, NewLoan},
    },
    repository::{AccountStore, CardStore, LoanStore, StoreError, UniqueKey},
};

/// Translate unique violations into [`StoreError::Conflict`] using the
/// constraint names declared in `migrations/`.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                let key = match db_err.constraint() {
                    Some("uq_customers_mobile_number")
                    | Some("uq_cards_mobile_number")
                    | Some("uq_loans_mobile_number") => Some(UniqueKey::MobileNumber),
                    Some("accounts_pkey")
                    | Some("uq_cards_card_number")
                    | Some("uq_loans_loan_number") => Some(UniqueKey::RecordNumber),
                    Some("uq_accounts_customer_id") => Some(UniqueKey::Owner),
                    _ => None,
                };
                if let Some(key) = key {
                    return StoreError::Conflict(key);
                }
            }
        }
        StoreError::Database(err)
    }
}

const CUSTOMER_COLUMNS: &str =
    "customer_id, name, email, mobile_number, created_at, created_by, updated_at, updated_by";

const ACCOUNT_COLUMNS: &str = "account_number, customer_id, account_type, branch_address, \
     created_at, created_by, updated_at, updated_by";

const CARD_COLUMNS: &str = "card_id, mobile_number, card_number, card_type, total_limit, \
     amount_used, available_amount, created_at, created_by, updated_at, updated_by";

const LOAN_COLUMNS: &str = "loan_id, mobile_number, loan_number, loan_type, total_loan, \
     amount_paid, outstanding_amount, created_at, created_by, updated_at, updated_by";

/// Customers and accounts tables of the accounts database.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_customer_by_mobile(
        &self,
        mobile_number: &str,
    ) -> Result<Option<Customer>, StoreError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE mobile_number = $1"
        ))
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn find_customer(&self, customer_id: i64) -> Result<Option<Customer>, StoreError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn find_account_by_customer(
        &self,
        customer_id: i64,
    ) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE customer_id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_account(&self, account_number: i64) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE account_number = $1"
        ))
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn insert_customer_with_account(
        &self,
        details: &CustomerDetails,
        account_number: i64,
        auditor: &str,
    ) -> Result<(Customer, Account), StoreError> {
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (name, email, mobile_number, created_at, created_by)
            VALUES ($1, $2, $3, NOW(), $4)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(&details.name)
        .bind(&details.email)
        .bind(&details.mobile_number)
        .bind(auditor)
        .fetch_one(&mut *tx)
        .await?;

        let defaults = Account::new_default(account_number, customer.customer_id, auditor);
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (account_number, customer_id, account_type, branch_address, created_at, created_by)
            VALUES ($1, $2, $3, $4, NOW(), $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(defaults.account_number)
        .bind(defaults.customer_id)
        .bind(&defaults.account_type)
        .bind(&defaults.branch_address)
        .bind(auditor)
        .fetch_one(&mut *tx)
        .await?;

        // Commit both rows atomically
        tx.commit().await?;

        Ok((customer, account))
    }

    async fn update_customer_and_account(
        &self,
        customer: &Customer,
        account: &Account,
    ) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let accounts = sqlx::query(
            r#"
            UPDATE accounts
            SET account_type = $1,
                branch_address = $2,
                updated_at = $3,
                updated_by = $4
            WHERE account_number = $5
            "#,
        )
        .bind(&account.account_type)
        .bind(&account.branch_address)
        .bind(account.audit.updated_at)
        .bind(&account.audit.updated_by)
        .bind(account.account_number)
        .execute(&mut *tx)
        .await?;
        if accounts.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Ok(false);
        }

        let customers = sqlx::query(
            r#"
            UPDATE customers
            SET name = $1,
                email = $2,
                mobile_number = $3,
                updated_at = $4,
                updated_by = $5
            WHERE customer_id = $6
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.mobile_number)
        .bind(customer.audit.updated_at)
        .bind(&customer.audit.updated_by)
        .bind(customer.customer_id)
        .execute(&mut *tx)
        .await?;
        if customers.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;

        Ok(true)
    }

    async fn delete_customer_and_account(&self, customer_id: i64) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM accounts WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        let customers = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(customers.rows_affected() > 0)
    }
}

/// Cards table of the cards database.
#[derive(Debug, Clone)]
pub struct PgCardStore {
    pool: DbPool,
}

impl PgCardStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardStore for PgCardStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<Card>, StoreError> {
        let card = sqlx::query_as::<_, Card>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE mobile_number = $1"
        ))
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    async fn insert(&self, card: NewCard) -> Result<Card, StoreError> {
        let card = sqlx::query_as::<_, Card>(&format!(
            r#"
            INSERT INTO cards (
                mobile_number,
                card_number,
                card_type,
                total_limit,
                amount_used,
                available_amount,
                created_at,
                created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(&card.mobile_number)
        .bind(&card.card_number)
        .bind(&card.card_type)
        .bind(card.total_limit)
        .bind(card.amount_used)
        .bind(card.available_amount)
        .bind(card.audit.created_at)
        .bind(&card.audit.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    async fn update(&self, card: &Card) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET card_type = $1,
                total_limit = $2,
                amount_used = $3,
                available_amount = $4,
                updated_at = $5,
                updated_by = $6
            WHERE card_id = $7
            "#,
        )
        .bind(&card.card_type)
        .bind(card.total_limit)
        .bind(card.amount_used)
        .bind(card.available_amount)
        .bind(card.audit.updated_at)
        .bind(&card.audit.updated_by)
        .bind(card.card_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_mobile(&self, mobile_number: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM cards WHERE mobile_number = $1")
            .bind(mobile_number)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Loans table of the loans database.
#[derive(Debug, Clone)]
pub struct PgLoanStore {
    pool: DbPool,
}

impl PgLoanStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanStore for PgLoanStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn exists_by_mobile(&self, mobile_number: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM loans WHERE mobile_number = $1)")
                .bind(mobile_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<Loan>, StoreError> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans WHERE mobile_number = $1"
        ))
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    async fn insert(&self, loan: NewLoan) -> Result<Loan, StoreError> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            r#"
            INSERT INTO loans (
                mobile_number,
                loan_number,
                loan_type,
                total_loan,
                amount_paid,
                outstanding_amount,
                created_at,
                created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {LOAN_COLUMNS}
            "#
        ))
        .bind(&loan.mobile_number)
        .bind(&loan.loan_number)
        .bind(&loan.loan_type)
        .bind(loan.total_loan)
        .bind(loan.amount_paid)
        .bind(loan.outstanding_amount)
        .bind(loan.audit.created_at)
        .bind(&loan.audit.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(loan)
    }

    async fn update(&self, loan: &Loan) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE loans
            SET loan_type = $1,
                total_loan = $2,
                amount_paid = $3,
                outstanding_amount = $4,
                updated_at = $5,
                updated_by = $6
            WHERE loan_id = $7
            "#,
        )
        .bind(&loan.loan_type)
        .bind(loan.total_loan)
        .bind(loan.amount_paid)
        .bind(loan.outstanding_amount)
        .bind(loan.audit.updated_at)
        .bind(&loan.audit.updated_by)
        .bind(loan.loan_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_mobile(&self, mobile_number: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM loans WHERE mobile_number = $1")
            .bind(mobile_number)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: database entity, one per customer
//! - `AccountDto`: the account part of the accounts-service payload
//! - `AccountUpdate`: the fields a client may change

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::audit::AuditFields;

/// Account type given to every new account.
pub const SAVINGS: &str = "Savings";

/// Branch address given to every new account.
pub const DEFAULT_BRANCH_ADDRESS: &str = "123 Main Street, New York";

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `accounts` table. `account_number` is the primary key and is
/// generated by the service, never by the client. `customer_id` is unique:
/// a customer holds exactly one account.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    /// Generated 10-digit account number
    pub account_number: i64,

    /// Owning customer
    pub customer_id: i64,

    pub account_type: String,

    pub branch_address: String,

    #[sqlx(flatten)]
    pub audit: AuditFields,
}

/// Account part of the accounts-service payload.
///
/// # JSON Example
///
/// ```json
/// {
///   "accountNumber": 1234567890,
///   "accountType": "Savings",
///   "branchAddress": "123 Main Street, New York"
/// }
/// ```
///
/// On update, `accountNumber` selects the account to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub account_number: i64,

    #[validate(length(min = 1, max = 100, message = "Account type cannot be empty"))]
    pub account_type: String,

    #[validate(length(min = 1, max = 200, message = "Branch address cannot be empty"))]
    pub branch_address: String,
}

/// Convert database Account to AccountDto (drops customer id and audit columns).
impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            account_number: account.account_number,
            account_type: account.account_type,
            branch_address: account.branch_address,
        }
    }
}

/// Mutable account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUpdate {
    pub account_type: String,
    pub branch_address: String,
}

impl From<&AccountDto> for AccountUpdate {
    fn from(dto: &AccountDto) -> Self {
        Self {
            account_type: dto.account_type.clone(),
            branch_address: dto.branch_address.clone(),
        }
    }
}

impl Account {
    /// A freshly provisioned account with default type and address.
    pub fn new_default(account_number: i64, customer_id: i64, auditor: &str) -> Self {
        Self {
            account_number,
            customer_id,
            account_type: SAVINGS.to_string(),
            branch_address: DEFAULT_BRANCH_ADDRESS.to_string(),
            audit: AuditFields::created_by(auditor),
        }
    }

    /// Overwrite the mutable fields; the account number and owner stay as they are.
    pub fn apply(&mut self, update: &AccountUpdate, auditor: &str) {
        self.account_type = update.account_type.clone();
        self.branch_address = update.branch_address.clone();
        self.audit.touch(auditor);
    }
}

//! Customer (identity) models for the accounts service.
//!
//! This module defines:
//! - `Customer`: database entity, one per mobile number
//! - `CustomerDetails`: the contact fields written on create and update
//! - `CustomerDto`: request/response body, optionally embedding the account

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    account::{Account, AccountDto},
    audit::AuditFields,
};
use crate::validation::validate_mobile_number;

/// Represents a row of the `customers` table.
///
/// `mobile_number` carries a unique constraint; it is the key every
/// accounts-service operation resolves the customer by.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

/// Contact fields owned by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
}

/// Request and response body of the accounts endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Jane Doe",
///   "email": "jane@example.com",
///   "mobileNumber": "9876543210",
///   "accountsDto": {
///     "accountNumber": 1234567890,
///     "accountType": "Savings",
///     "branchAddress": "123 Main Street, New York"
///   }
/// }
/// ```
///
/// # Validation
///
/// - `name`: 5 to 50 characters
/// - `email`: valid address
/// - `mobileNumber`: exactly 10 digits
/// - `accountsDto`: ignored on create, required on update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[validate(length(min = 5, max = 50, message = "Name should be between 5 and 50 characters"))]
    pub name: String,

    #[validate(email(message = "Email should be valid"))]
    pub email: String,

    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub accounts_dto: Option<AccountDto>,
}

impl Customer {
    /// Overwrite the contact fields.
    pub fn apply(&mut self, details: &CustomerDetails, auditor: &str) {
        self.name = details.name.clone();
        self.email = details.email.clone();
        self.mobile_number = details.mobile_number.clone();
        self.audit.touch(auditor);
    }
}

impl CustomerDto {
    /// Combined representation of a customer and their account.
    pub fn from_parts(customer: Customer, account: Account) -> Self {
        Self {
            name: customer.name,
            email: customer.email,
            mobile_number: customer.mobile_number,
            accounts_dto: Some(account.into()),
        }
    }

    /// Contact fields carried by this payload.
    pub fn details(&self) -> CustomerDetails {
        CustomerDetails {
            name: self.name.clone(),
            email: self.email.clone(),
            mobile_number: self.mobile_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, email: &str, mobile: &str) -> CustomerDto {
        CustomerDto {
            name: name.to_string(),
            email: email.to_string(),
            mobile_number: mobile.to_string(),
            accounts_dto: None,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(dto("Jane Doe", "jane@example.com", "9876543210").validate().is_ok());
    }

    #[test]
    fn each_rule_reports_its_field() {
        let errors = dto("Jo", "not-an-email", "12345").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("mobile_number"));
    }

    #[test]
    fn embedded_account_is_validated() {
        let mut payload = dto("Jane Doe", "jane@example.com", "9876543210");
        payload.accounts_dto = Some(AccountDto {
            account_number: 1_234_567_890,
            account_type: String::new(),
            branch_address: String::new(),
        });

        let errors = payload.validate().unwrap_err();

        assert!(errors.errors().contains_key("accounts_dto"));
        assert!(!errors.field_errors().contains_key("name"));
    }

    #[test]
    fn deserializes_camel_case_without_account() {
        let parsed: CustomerDto = serde_json::from_str(
            r#"{"name":"Jane Doe","email":"jane@example.com","mobileNumber":"9876543210"}"#,
        )
        .unwrap();
        assert_eq!(parsed.mobile_number, "9876543210");
        assert!(parsed.accounts_dto.is_none());
    }
}

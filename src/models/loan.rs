//! Loan data models and API request/response types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::audit::AuditFields;
use crate::validation::validate_mobile_number;

/// Loan type given to every new loan.
pub const HOME_LOAN: &str = "Home Loan";

/// Principal of every new loan.
pub const NEW_LOAN_LIMIT: i64 = 100_000;

/// Represents a row of the `loans` table.
///
/// Both `mobile_number` and `loan_number` carry unique constraints.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Loan {
    pub loan_id: i64,
    pub mobile_number: String,
    /// Generated 12-digit loan number
    pub loan_number: String,
    pub loan_type: String,
    pub total_loan: i64,
    pub amount_paid: i64,
    pub outstanding_amount: i64,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

/// Loan fields as inserted; the store assigns `loan_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoan {
    pub mobile_number: String,
    pub loan_number: String,
    pub loan_type: String,
    pub total_loan: i64,
    pub amount_paid: i64,
    pub outstanding_amount: i64,
    pub audit: AuditFields,
}

impl NewLoan {
    /// A fresh home loan with nothing paid yet.
    pub fn with_defaults(mobile_number: &str, loan_number: String, auditor: &str) -> Self {
        Self {
            mobile_number: mobile_number.to_string(),
            loan_number,
            loan_type: HOME_LOAN.to_string(),
            total_loan: NEW_LOAN_LIMIT,
            amount_paid: 0,
            outstanding_amount: NEW_LOAN_LIMIT,
            audit: AuditFields::created_by(auditor),
        }
    }

    pub fn into_loan(self, loan_id: i64) -> Loan {
        Loan {
            loan_id,
            mobile_number: self.mobile_number,
            loan_number: self.loan_number,
            loan_type: self.loan_type,
            total_loan: self.total_loan,
            amount_paid: self.amount_paid,
            outstanding_amount: self.outstanding_amount,
            audit: self.audit,
        }
    }
}

/// Request and response body of the loans endpoints.
///
/// # JSON Example
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
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoanDto {
    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,

    #[serde(default)]
    pub loan_number: String,

    #[validate(length(min = 1, max = 100, message = "Loan type cannot be empty"))]
    pub loan_type: String,

    #[validate(range(min = 0, message = "Total loan cannot be negative"))]
    pub total_loan: i64,

    #[validate(range(min = 0, message = "Amount paid cannot be negative"))]
    pub amount_paid: i64,

    #[validate(range(min = 0, message = "Outstanding amount cannot be negative"))]
    pub outstanding_amount: i64,
}

impl From<Loan> for LoanDto {
    fn from(loan: Loan) -> Self {
        Self {
            mobile_number: loan.mobile_number,
            loan_number: loan.loan_number,
            loan_type: loan.loan_type,
            total_loan: loan.total_loan,
            amount_paid: loan.amount_paid,
            outstanding_amount: loan.outstanding_amount,
        }
    }
}

/// Mutable loan fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanUpdate {
    pub loan_type: String,
    pub total_loan: i64,
    pub amount_paid: i64,
    pub outstanding_amount: i64,
}

impl From<&LoanDto> for LoanUpdate {
    fn from(dto: &LoanDto) -> Self {
        Self {
            loan_type: dto.loan_type.clone(),
            total_loan: dto.total_loan,
            amount_paid: dto.amount_paid,
            outstanding_amount: dto.outstanding_amount,
        }
    }
}

impl Loan {
    pub fn apply(&mut self, update: &LoanUpdate, auditor: &str) {
        self.loan_type = update.loan_type.clone();
        self.total_loan = update.total_loan;
        self.amount_paid = update.amount_paid;
        self.outstanding_amount = update.outstanding_amount;
        self.audit.touch(auditor);
    }
}

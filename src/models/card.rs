//! Card data models and API request/response types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::audit::AuditFields;
use crate::validation::validate_mobile_number;

/// Card type given to every new card.
pub const CREDIT_CARD: &str = "Credit Card";

/// Credit limit given to every new card.
pub const NEW_CARD_LIMIT: i64 = 100_000;

/// Represents a row of the `cards` table.
///
/// Both `mobile_number` and `card_number` carry unique constraints.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Card {
    /// Storage primary key, never exposed to clients
    pub card_id: i64,

    pub mobile_number: String,

    /// Generated 12-digit card number
    pub card_number: String,

    pub card_type: String,

    pub total_limit: i64,

    pub amount_used: i64,

    pub available_amount: i64,

    #[sqlx(flatten)]
    pub audit: AuditFields,
}

/// Card fields as inserted; the store assigns `card_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub mobile_number: String,
    pub card_number: String,
    pub card_type: String,
    pub total_limit: i64,
    pub amount_used: i64,
    pub available_amount: i64,
    pub audit: AuditFields,
}

impl NewCard {
    /// A fresh credit card with the full default limit available.
    pub fn with_defaults(mobile_number: &str, card_number: String, auditor: &str) -> Self {
        Self {
            mobile_number: mobile_number.to_string(),
            card_number,
            card_type: CREDIT_CARD.to_string(),
            total_limit: NEW_CARD_LIMIT,
            amount_used: 0,
            available_amount: NEW_CARD_LIMIT,
            audit: AuditFields::created_by(auditor),
        }
    }

    pub fn into_card(self, card_id: i64) -> Card {
        Card {
            card_id,
            mobile_number: self.mobile_number,
            card_number: self.card_number,
            card_type: self.card_type,
            total_limit: self.total_limit,
            amount_used: self.amount_used,
            available_amount: self.available_amount,
            audit: self.audit,
        }
    }
}

/// Request and response body of the cards endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "mobileNumber": "9876543210",
///   "cardNumber": "100123456789",
///   "cardType": "Credit Card",
///   "totalLimit": 100000,
///   "amountUsed": 0,
///   "availableAmount": 100000
/// }
/// ```
///
/// On update, `mobileNumber` selects the card and `cardNumber` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardDto {
    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,

    #[serde(default)]
    pub card_number: String,

    #[validate(length(min = 1, max = 100, message = "Card type cannot be empty"))]
    pub card_type: String,

    #[validate(range(min = 0, message = "Total limit cannot be negative"))]
    pub total_limit: i64,

    #[validate(range(min = 0, message = "Amount used cannot be negative"))]
    pub amount_used: i64,

    #[validate(range(min = 0, message = "Available amount cannot be negative"))]
    pub available_amount: i64,
}

impl From<Card> for CardDto {
    fn from(card: Card) -> Self {
        Self {
            mobile_number: card.mobile_number,
            card_number: card.card_number,
            card_type: card.card_type,
            total_limit: card.total_limit,
            amount_used: card.amount_used,
            available_amount: card.available_amount,
        }
    }
}

/// Mutable card fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardUpdate {
    pub card_type: String,
    pub total_limit: i64,
    pub amount_used: i64,
    pub available_amount: i64,
}

impl From<&CardDto> for CardUpdate {
    fn from(dto: &CardDto) -> Self {
        Self {
            card_type: dto.card_type.clone(),
            total_limit: dto.total_limit,
            amount_used: dto.amount_used,
            available_amount: dto.available_amount,
        }
    }
}

impl Card {
    /// Overwrite the mutable fields; mobile number and card number stay as they are.
    pub fn apply(&mut self, update: &CardUpdate, auditor: &str) {
        self.card_type = update.card_type.clone();
        self.total_limit = update.total_limit;
        self.amount_used = update.amount_used;
        self.available_amount = update.available_amount;
        self.audit.touch(auditor);
    }
}

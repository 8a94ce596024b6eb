//! Card service - provisioning logic of the cards module.
//!
//! Cards are keyed directly by mobile number; there is no customer table in
//! this module.

use std::sync::Arc;

use crate::{
    error::AppError,
    middleware::audit::AuditContext,
    models::card::{CardDto, CardUpdate, NewCard},
    repository::CardStore,
    services::{
        provisioning_error,
        record_number::{self, NumberSource, RandomNumbers},
    },
};

const CARD: &str = "Card";

#[derive(Clone)]
pub struct CardService {
    store: Arc<dyn CardStore>,
    numbers: Arc<dyn NumberSource>,
}

impl CardService {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self::with_numbers(store, Arc::new(RandomNumbers::CARD))
    }

    pub fn with_numbers(store: Arc<dyn CardStore>, numbers: Arc<dyn NumberSource>) -> Self {
        Self { store, numbers }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.store.ping().await?)
    }

    /// Issue a default credit card for `mobile_number`.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists`: a card is already issued for this number
    /// - `Unexpected`: no free card number was found
    #[tracing::instrument(skip(self, audit))]
    pub async fn create(
        &self,
        mobile_number: &str,
        audit: &AuditContext,
    ) -> Result<CardDto, AppError> {
        if self.store.find_by_mobile(mobile_number).await?.is_some() {
            return Err(AppError::already_exists(CARD, mobile_number));
        }

        let card = record_number::allocate(self.numbers.as_ref(), |number| {
            self.store.insert(NewCard::with_defaults(
                mobile_number,
                number.to_string(),
                &audit.auditor,
            ))
        })
        .await
        .map_err(|e| provisioning_error(e, CARD, mobile_number))?;

        tracing::info!(card_id = card.card_id, "Card created");

        Ok(card.into())
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, mobile_number: &str) -> Result<CardDto, AppError> {
        let card = self
            .store
            .find_by_mobile(mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found(CARD, "mobileNumber", mobile_number))?;

        Ok(card.into())
    }

    /// Overwrite type, limit and usage of the card issued for
    /// `dto.mobile_number`. Card number and mobile number never change.
    #[tracing::instrument(skip(self, dto, audit), fields(mobile_number = %dto.mobile_number))]
    pub async fn update(&self, dto: &CardDto, audit: &AuditContext) -> Result<bool, AppError> {
        let mut card = self
            .store
            .find_by_mobile(&dto.mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found(CARD, "mobileNumber", &dto.mobile_number))?;

        card.apply(&CardUpdate::from(dto), &audit.auditor);
        // The card may have been deleted since it was read
        if !self.store.update(&card).await? {
            return Err(AppError::not_found(CARD, "mobileNumber", &dto.mobile_number));
        }

        tracing::info!(card_id = card.card_id, "Card updated");

        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, mobile_number: &str) -> Result<bool, AppError> {
        if !self.store.delete_by_mobile(mobile_number).await? {
            return Err(AppError::not_found(CARD, "mobileNumber", mobile_number));
        }

        tracing::info!("Card deleted");

        Ok(true)
    }
}

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use bank_provisioning::{
    error::AppError,
    models::card::{CREDIT_CARD, Card, CardDto, NEW_CARD_LIMIT, NewCard},
    repository::{CardStore, StoreError, memory::MemoryCardStore},
    services::card_service::CardService,
};
use common::{MOBILE, OTHER_MOBILE, SequenceNumbers, auditor};

fn service_with(numbers: &[i64]) -> (CardService, Arc<MemoryCardStore>) {
    common::init_tracing();
    let store = Arc::new(MemoryCardStore::new());
    let service = CardService::with_numbers(store.clone(), Arc::new(SequenceNumbers::new(numbers)));
    (service, store)
}

#[tokio::test]
async fn create_issues_default_credit_card() {
    let (service, _) = service_with(&[100_123_456_789]);

    let card = service.create(MOBILE, &auditor("CARDS_MS")).await.unwrap();

    assert_eq!(card.mobile_number, MOBILE);
    assert_eq!(card.card_number, "100123456789");
    assert_eq!(card.card_type, CREDIT_CARD);
    assert_eq!(card.total_limit, NEW_CARD_LIMIT);
    assert_eq!(card.amount_used, 0);
    assert_eq!(card.available_amount, NEW_CARD_LIMIT);
    assert_eq!(service.fetch(MOBILE).await.unwrap(), card);
}

#[tokio::test]
async fn random_card_numbers_have_twelve_digits() {
    let service = CardService::new(Arc::new(MemoryCardStore::new()));

    let card = service.create(MOBILE, &auditor("CARDS_MS")).await.unwrap();

    assert_eq!(card.card_number.len(), 12);
    assert!(card.card_number.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn second_card_for_same_mobile_is_rejected() {
    let (service, _) = service_with(&[100_000_000_001, 100_000_000_002]);
    let audit = auditor("CARDS_MS");

    service.create(MOBILE, &audit).await.unwrap();
    let err = service.create(MOBILE, &audit).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        format!("Card already exists with given mobile number {MOBILE}")
    );
}

#[tokio::test]
async fn fetch_unknown_card_is_not_found() {
    let (service, _) = service_with(&[100_000_000_001]);

    let err = service.fetch(MOBILE).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        format!("Card not found with the given input data mobileNumber : '{MOBILE}'")
    );
}

#[tokio::test]
async fn update_keeps_card_number() {
    let (service, store) = service_with(&[100_123_456_789]);
    service.create(MOBILE, &auditor("CARDS_MS")).await.unwrap();

    let mut dto = service.fetch(MOBILE).await.unwrap();
    dto.card_number = "999999999999".to_string();
    dto.amount_used = 2_500;
    dto.available_amount = 97_500;

    assert!(service.update(&dto, &auditor("card-desk")).await.unwrap());

    let card = store.find_by_mobile(MOBILE).await.unwrap().unwrap();
    assert_eq!(card.card_number, "100123456789");
    assert_eq!(card.amount_used, 2_500);
    assert_eq!(card.available_amount, 97_500);
    assert_eq!(card.total_limit, NEW_CARD_LIMIT);
    assert_eq!(card.audit.created_by, "CARDS_MS");
    assert_eq!(card.audit.updated_by.as_deref(), Some("card-desk"));
}

#[tokio::test]
async fn update_unknown_card_is_not_found() {
    let (service, _) = service_with(&[100_123_456_789]);
    service.create(MOBILE, &auditor("CARDS_MS")).await.unwrap();

    let mut dto = service.fetch(MOBILE).await.unwrap();
    dto.mobile_number = OTHER_MOBILE.to_string();

    assert!(matches!(
        service.update(&dto, &auditor("CARDS_MS")).await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let (service, _) = service_with(&[100_123_456_789]);
    service.create(MOBILE, &auditor("CARDS_MS")).await.unwrap();

    assert!(service.delete(MOBILE).await.unwrap());

    assert!(matches!(
        service.fetch(MOBILE).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(MOBILE).await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn colliding_card_number_is_retried() {
    let (service, _) = service_with(&[100_000_000_001, 100_000_000_001, 100_000_000_002]);
    let audit = auditor("CARDS_MS");

    service.create(MOBILE, &audit).await.unwrap();
    let card = service.create(OTHER_MOBILE, &audit).await.unwrap();

    assert_eq!(card.card_number, "100000000002");
}

#[tokio::test]
async fn exhausted_card_numbers_are_unexpected() {
    let (service, store) = service_with(&[100_000_000_001]);
    let audit = auditor("CARDS_MS");
    service.create(MOBILE, &audit).await.unwrap();

    let err = service.create(OTHER_MOBILE, &audit).await.unwrap_err();

    assert!(matches!(err, AppError::Unexpected(_)));
    assert!(store.find_by_mobile(OTHER_MOBILE).await.unwrap().is_none());
}

/// Hands out the card and deletes it in the same step, as a concurrent
/// delete landing between an update's read and write would.
struct VanishingCardStore(MemoryCardStore);

#[async_trait]
impl CardStore for VanishingCardStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.0.ping().await
    }

    async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<Card>, StoreError> {
        let card = self.0.find_by_mobile(mobile_number).await?;
        self.0.delete_by_mobile(mobile_number).await?;
        Ok(card)
    }

    async fn insert(&self, card: NewCard) -> Result<Card, StoreError> {
        self.0.insert(card).await
    }

    async fn update(&self, card: &Card) -> Result<bool, StoreError> {
        self.0.update(card).await
    }

    async fn delete_by_mobile(&self, mobile_number: &str) -> Result<bool, StoreError> {
        self.0.delete_by_mobile(mobile_number).await
    }
}

#[tokio::test]
async fn update_of_card_deleted_after_read_is_not_found() {
    common::init_tracing();
    let inner = MemoryCardStore::new();
    inner
        .insert(NewCard::with_defaults(MOBILE, "100123456789".to_string(), "CARDS_MS"))
        .await
        .unwrap();
    let store = Arc::new(VanishingCardStore(inner));
    let service = CardService::new(store.clone());

    let mut dto = CardDto::from(
        store.0.find_by_mobile(MOBILE).await.unwrap().unwrap(),
    );
    dto.amount_used = 500;
    let err = service.update(&dto, &auditor("CARDS_MS")).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
    assert!(store.0.find_by_mobile(MOBILE).await.unwrap().is_none());
}

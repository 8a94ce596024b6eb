//! Record number generation and allocation.
//!
//! A candidate number is `base + random(0..span)`, which gives a fixed-width
//! number but no uniqueness guarantee. Uniqueness comes from the store's
//! unique constraint: a colliding insert is retried with a fresh candidate.

use std::future::Future;

use rand::Rng;

use crate::repository::{StoreError, UniqueKey};

/// Attempts made before giving up on finding an unused record number.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Source of candidate record numbers.
pub trait NumberSource: Send + Sync {
    fn next_number(&self) -> i64;
}

/// Uniformly random numbers in `base..base + span`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomNumbers {
    base: i64,
    span: i64,
}

impl RandomNumbers {
    /// 10-digit account numbers.
    pub const ACCOUNT: RandomNumbers = RandomNumbers::new(1_000_000_000, 900_000_000);
    /// 12-digit card numbers.
    pub const CARD: RandomNumbers = RandomNumbers::new(100_000_000_000, 900_000_000);
    /// 12-digit loan numbers.
    pub const LOAN: RandomNumbers = RandomNumbers::new(100_000_000_000, 900_000_000);

    pub const fn new(base: i64, span: i64) -> Self {
        Self { base, span }
    }
}

impl NumberSource for RandomNumbers {
    fn next_number(&self) -> i64 {
        self.base + rand::rng().random_range(0..self.span)
    }
}

/// Run `insert` with fresh candidates until it stops reporting a
/// record-number collision.
///
/// Any other error is returned as soon as it happens. After
/// [`MAX_ALLOCATION_ATTEMPTS`] collisions the last collision is returned.
pub async fn allocate<T, F, Fut>(
    numbers: &dyn NumberSource,
    mut insert: F,
) -> Result<T, StoreError>
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let mut attempt = 1;
    loop {
        let candidate = numbers.next_number();
        match insert(candidate).await {
            Err(StoreError::Conflict(UniqueKey::RecordNumber))
                if attempt < MAX_ALLOCATION_ATTEMPTS =>
            {
                tracing::warn!(candidate, attempt, "Record number already taken, retrying");
                attempt += 1;
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_numbers_have_ten_digits() {
        for _ in 0..1_000 {
            let n = RandomNumbers::ACCOUNT.next_number();
            assert_eq!(n.to_string().len(), 10, "{n}");
        }
    }

    #[test]
    fn card_and_loan_numbers_have_twelve_digits() {
        for _ in 0..1_000 {
            assert_eq!(RandomNumbers::CARD.next_number().to_string().len(), 12);
            assert_eq!(RandomNumbers::LOAN.next_number().to_string().len(), 12);
        }
    }

    #[tokio::test]
    async fn stops_after_max_attempts() {
        let mut calls = 0;
        let result: Result<(), StoreError> = allocate(&RandomNumbers::CARD, |_| {
            calls += 1;
            async { Err(StoreError::Conflict(UniqueKey::RecordNumber)) }
        })
        .await;

        assert!(matches!(
            result,
            Err(StoreError::Conflict(UniqueKey::RecordNumber))
        ));
        assert_eq!(calls, MAX_ALLOCATION_ATTEMPTS);
    }

    #[tokio::test]
    async fn other_conflicts_are_not_retried() {
        let mut calls = 0;
        let result: Result<(), StoreError> = allocate(&RandomNumbers::LOAN, |_| {
            calls += 1;
            async { Err(StoreError::Conflict(UniqueKey::MobileNumber)) }
        })
        .await;

        assert!(matches!(
            result,
            Err(StoreError::Conflict(UniqueKey::MobileNumber))
        ));
        assert_eq!(calls, 1);
    }
}

use crate::domain::id::PaymentId;
use crate::domain::payment::AuthorizationOutcome;
use crate::domain::ports::PaymentStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payment outcomes.
///
/// Uses `Arc<RwLock<HashMap<PaymentId, AuthorizationOutcome>>>` so clones share
/// the same records. Records live as long as the process.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<PaymentId, AuthorizationOutcome>>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, outcome: AuthorizationOutcome) -> Result<()> {
        let mut payments = self.payments.write().await;
        payments.insert(outcome.id, outcome);
        Ok(())
    }

    async fn get(&self, id: PaymentId) -> Result<Option<AuthorizationOutcome>> {
        let payments = self.payments.read().await;
        Ok(payments.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentStatus;

    fn outcome(status: PaymentStatus) -> AuthorizationOutcome {
        AuthorizationOutcome {
            id: PaymentId::generate(),
            status,
            card_number: "8877".to_string(),
            expiry_month: 4,
            expiry_year: 2030,
            currency: "EUR".to_string(),
            amount: 1050,
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = InMemoryPaymentStore::new();
        let stored = outcome(PaymentStatus::Authorized);

        store.insert(stored.clone()).await.unwrap();
        for _ in 0..3 {
            assert_eq!(store.get(stored.id).await.unwrap(), Some(stored.clone()));
        }
        assert!(store.get(PaymentId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = InMemoryPaymentStore::new();
        let first = outcome(PaymentStatus::Authorized);
        let mut second = first.clone();
        second.status = PaymentStatus::Declined;

        store.insert(first.clone()).await.unwrap();
        store.insert(second.clone()).await.unwrap();

        assert_eq!(store.get(first.id).await.unwrap(), Some(second));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        let store = InMemoryPaymentStore::new();
        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    let o = outcome(PaymentStatus::Unauthorized);
                    store.insert(o.clone()).await.unwrap();
                    o
                })
            })
            .collect();

        for handle in handles {
            let inserted = handle.await.unwrap();
            assert_eq!(store.get(inserted.id).await.unwrap(), Some(inserted));
        }
        assert_eq!(store.len().await, 50);
    }
}

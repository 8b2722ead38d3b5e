use super::in_memory::InMemoryPaymentStore;
use crate::domain::id::PaymentId;
use crate::domain::payment::AuthorizationOutcome;
use crate::domain::ports::{PaymentStore, PaymentStoreBox};
use crate::error::Result;
use async_trait::async_trait;

/// In-memory cache in front of an optional persistent backend.
///
/// Writes go to the backend first and are cached only once the backend has
/// accepted them, so a failed write is never visible to a later recall.
/// Lookups that miss the cache fall through to the backend.
pub struct CachedPaymentStore {
    cache: InMemoryPaymentStore,
    backend: Option<PaymentStoreBox>,
}

impl CachedPaymentStore {
    /// A store with no backend; records live for the process lifetime only.
    pub fn in_memory() -> Self {
        Self {
            cache: InMemoryPaymentStore::new(),
            backend: None,
        }
    }

    pub fn with_backend(backend: PaymentStoreBox) -> Self {
        Self {
            cache: InMemoryPaymentStore::new(),
            backend: Some(backend),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.backend.is_some()
    }
}

#[async_trait]
impl PaymentStore for CachedPaymentStore {
    async fn insert(&self, outcome: AuthorizationOutcome) -> Result<()> {
        if let Some(backend) = &self.backend {
            backend.insert(outcome.clone()).await?;
        }
        self.cache.insert(outcome).await
    }

    async fn get(&self, id: PaymentId) -> Result<Option<AuthorizationOutcome>> {
        if let Some(found) = self.cache.get(id).await? {
            return Ok(Some(found));
        }
        match &self.backend {
            Some(backend) => {
                tracing::debug!(payment_id = %id, "cache miss, querying persistent store");
                backend.get(id).await
            }
            None => Ok(None),
        }
    }
}

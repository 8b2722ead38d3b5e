use crate::domain::id::PaymentId;
use crate::domain::payment::AuthorizationOutcome;
use crate::domain::ports::PaymentStore;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing payment outcomes.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent store implementation using RocksDB.
///
/// One row per outcome in the `payments` column family. Keys are the 16 raw
/// bytes of the payment id; since ids are UUIDv7, key order is creation order.
/// Values are the outcome serialized as JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `payments` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn payments_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_PAYMENTS)
            .ok_or_else(|| GatewayError::Storage("payments column family not found".to_string()))
    }
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn insert(&self, outcome: AuthorizationOutcome) -> Result<()> {
        let cf = self.payments_cf()?;
        let value = serde_json::to_vec(&outcome)
            .map_err(|e| GatewayError::Storage(format!("serialization error: {}", e)))?;

        self.db.put_cf(cf, outcome.id.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, id: PaymentId) -> Result<Option<AuthorizationOutcome>> {
        let cf = self.payments_cf()?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => {
                let outcome = serde_json::from_slice(&bytes).map_err(|e| {
                    GatewayError::Storage(format!("deserialization error: {}", e))
                })?;
                Ok(Some(outcome))
            }
            None => Ok(None),
        }
    }
}

use super::id::PaymentId;
use super::payment::{AuthorizationOutcome, PaymentRequest};
use crate::error::{BankError, Result};
use async_trait::async_trait;

/// The external party that approves or declines a card charge.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(
        &self,
        req: &PaymentRequest,
    ) -> std::result::Result<AuthorizationOutcome, BankError>;
}

/// Keyed record of completed payment outcomes.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert(&self, outcome: AuthorizationOutcome) -> Result<()>;
    async fn get(&self, id: PaymentId) -> Result<Option<AuthorizationOutcome>>;
}

pub type AuthorizerBox = Box<dyn Authorizer>;
pub type PaymentStoreBox = Box<dyn PaymentStore>;

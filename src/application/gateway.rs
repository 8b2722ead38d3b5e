use crate::config::GatewayConfig;
use crate::domain::id::PaymentId;
use crate::domain::payment::{AuthorizationOutcome, PaymentRequest};
use crate::domain::ports::{AuthorizerBox, PaymentStoreBox};
use crate::domain::validation::Validator;
use crate::error::{GatewayError, Result, describe_decode_error};

/// The submission and recall pipeline.
///
/// `PaymentGateway` owns the validator, the bank and the store. It holds no
/// mutable state of its own, so one instance can be shared behind an `Arc`
/// by any number of concurrent callers.
pub struct PaymentGateway {
    validator: Validator,
    bank: AuthorizerBox,
    store: PaymentStoreBox,
}

impl PaymentGateway {
    /// Creates a new `PaymentGateway` instance.
    ///
    /// # Arguments
    ///
    /// * `config` - Startup configuration; only the accepted currencies are read here.
    /// * `bank` - The authorizer payments are forwarded to.
    /// * `store` - Where outcomes are recorded and recalled from.
    pub fn new(config: &GatewayConfig, bank: AuthorizerBox, store: PaymentStoreBox) -> Self {
        Self {
            validator: Validator::new(config.known_currencies.clone()),
            bank,
            store,
        }
    }

    /// Decodes a JSON payment request and submits it.
    pub async fn submit_json(&self, body: &[u8]) -> Result<AuthorizationOutcome> {
        let req: PaymentRequest = serde_json::from_slice(body).map_err(|e| {
            let reason = describe_decode_error(&e);
            tracing::warn!(error = %reason, "malformed payment request");
            GatewayError::MalformedRequest(reason)
        })?;
        self.submit(req).await
    }

    /// Validates `req`, asks the bank to authorize it and records the outcome.
    ///
    /// Stops at the first failing step. Nothing is recorded unless the bank
    /// answered.
    pub async fn submit(&self, req: PaymentRequest) -> Result<AuthorizationOutcome> {
        tracing::info!("incoming payment request");

        if let Err(e) = self.validator.validate(&req) {
            tracing::warn!(field = e.field, reason = %e.reason, "invalid payment request");
            return Err(e.into());
        }

        let outcome = match self.bank.authorize(&req).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, transport = e.is_transport(), "bank request failed");
                return Err(e.into());
            }
        };

        if let Err(e) = self.store.insert(outcome.clone()).await {
            tracing::error!(payment_id = %outcome.id, error = %e, "failed to record payment");
            return Err(match e {
                GatewayError::Storage(_) => e,
                other => GatewayError::Storage(other.to_string()),
            });
        }

        tracing::info!(
            payment_id = %outcome.id,
            card = %outcome.card_number,
            status = %outcome.status,
            "processed payment"
        );
        Ok(outcome)
    }

    /// Looks up a previously recorded outcome by its string id.
    pub async fn recall(&self, raw_id: &str) -> Result<AuthorizationOutcome> {
        let id = PaymentId::parse(raw_id)?;
        self.recall_id(id).await
    }

    pub async fn recall_id(&self, id: PaymentId) -> Result<AuthorizationOutcome> {
        tracing::info!(payment_id = %id, "recall request");
        match self.store.get(id).await? {
            Some(outcome) => Ok(outcome),
            None => {
                tracing::info!(payment_id = %id, "payment not found");
                Err(GatewayError::NotFound(id))
            }
        }
    }
}

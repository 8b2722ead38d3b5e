use crate::config::GatewayConfig;
use crate::domain::id::PaymentId;
use crate::domain::payment::{
    AuthorizationOutcome, PaymentRequest, PaymentStatus, mask_card_number,
};
use crate::domain::ports::Authorizer;
use crate::error::{BankError, describe_decode_error};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body POSTed to the bank.
#[derive(Serialize, PartialEq, Eq)]
pub struct BankWireRequest<'a> {
    pub card_number: &'a str,
    /// `MM/YYYY`
    pub expiry_date: String,
    pub currency: &'a str,
    pub amount: u32,
    pub cvv: &'a str,
}

impl<'a> BankWireRequest<'a> {
    pub fn from_request(req: &'a PaymentRequest) -> Self {
        Self {
            card_number: &req.card_number,
            expiry_date: format!("{:02}/{}", req.expiry_month, req.expiry_year),
            currency: &req.currency,
            amount: req.amount,
            cvv: &req.cvv,
        }
    }

    /// JSON rendering fit for logs: masked card number, no CVV.
    pub fn redacted(&self) -> serde_json::Value {
        serde_json::json!({
            "card_number": mask_card_number(self.card_number),
            "expiry_date": self.expiry_date,
            "currency": self.currency,
            "amount": self.amount,
            "cvv": "***",
        })
    }
}

/// Body the bank answers with. Unknown fields are ignored.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct BankWireResponse {
    pub authorized: bool,
    #[serde(default)]
    pub authorization_code: Option<String>,
}

/// [`Authorizer`] talking JSON over HTTP to the acquiring bank.
///
/// Makes exactly one attempt per call. Timeouts and connection failures are
/// reported as [`BankError::Transport`].
#[derive(Clone)]
pub struct HttpBank {
    url: String,
    client: reqwest::Client,
}

impl HttpBank {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, BankError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BankError::Transport)?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, BankError> {
        Self::new(config.bank_url.clone(), config.bank_timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(&self, wire: &BankWireRequest<'_>) -> Result<BankWireResponse, BankError> {
        tracing::debug!(url = %self.url, payload = %wire.redacted(), "sending authorization request");

        let resp = self
            .client
            .post(&self.url)
            .json(wire)
            .send()
            .await
            .map_err(BankError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BankError::InvalidResponse(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(BankError::Transport)?;
        serde_json::from_slice(&body)
            .map_err(|e| BankError::MalformedResponse(describe_decode_error(&e)))
    }
}

#[async_trait]
impl Authorizer for HttpBank {
    async fn authorize(&self, req: &PaymentRequest) -> Result<AuthorizationOutcome, BankError> {
        let wire = BankWireRequest::from_request(req);
        let answer = self.send(&wire).await?;

        let id = PaymentId::generate();
        let status = PaymentStatus::from_authorized(answer.authorized);
        tracing::debug!(
            payment_id = %id,
            %status,
            has_authorization_code = answer.authorization_code.is_some(),
            "bank answered"
        );
        Ok(AuthorizationOutcome::new(id, status, req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            card_number: "123456789".to_string(),
            expiry_month: 2,
            expiry_year: 2031,
            currency: "GBP".to_string(),
            amount: 100,
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn test_wire_request_format() {
        let req = request();
        let wire = BankWireRequest::from_request(&req);
        assert_eq!(
            serde_json::to_string(&wire).unwrap(),
            r#"{"card_number":"123456789","expiry_date":"02/2031","currency":"GBP","amount":100,"cvv":"123"}"#
        );
    }

    #[test]
    fn test_redacted_payload_hides_card_data() {
        let req = request();
        let rendered = BankWireRequest::from_request(&req).redacted().to_string();
        assert!(!rendered.contains("123456789"));
        assert!(!rendered.contains("\"123\""));
        assert!(rendered.contains("6789"));
        assert!(rendered.contains("02/2031"));
    }

    #[test]
    fn test_wire_response_tolerates_extra_fields() {
        let resp: BankWireResponse =
            serde_json::from_str(r#"{"authorized":false,"reason":"the authorizer was having lunch"}"#)
                .unwrap();
        assert_eq!(
            resp,
            BankWireResponse {
                authorized: false,
                authorization_code: None
            }
        );
    }
}

use crate::domain::id::{IdParseError, PaymentId};
use crate::domain::validation::ValidationError;
use serde_json::error::Category;
use thiserror::Error;

/// Failures of the outbound call to the authorizing bank.
#[derive(Error, Debug)]
pub enum BankError {
    /// The bank could not be reached, or did not answer within the timeout.
    #[error("bank request error: {0}")]
    Transport(#[source] reqwest::Error),
    /// The bank answered with a non-success status. The body is not inspected.
    #[error("invalid response from the bank (status {0})")]
    InvalidResponse(u16),
    /// The bank answered 2xx but the body did not decode.
    #[error("malformed response from the bank: {0}")]
    MalformedResponse(String),
}

impl BankError {
    pub fn is_transport(&self) -> bool {
        matches!(self, BankError::Transport(_))
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("malformed payment request: {0}")]
    MalformedRequest(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("bank request failed: {0}")]
    Bank(#[from] BankError),
    #[error("storage failure: {0}")]
    Storage(String),
    #[error(transparent)]
    InvalidId(#[from] IdParseError),
    #[error("payment {0} not found")]
    NotFound(PaymentId),
}

impl GatewayError {
    /// HTTP-style status code a caller should see for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::MalformedRequest(_)
            | GatewayError::Validation(_)
            | GatewayError::Bank(_)
            | GatewayError::InvalidId(_) => 400,
            GatewayError::NotFound(_) => 404,
            GatewayError::Storage(_) => 500,
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for GatewayError {
    fn from(e: rocksdb::Error) -> Self {
        GatewayError::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Describes a JSON decode failure by its kind and position only.
///
/// serde_json quotes the offending value in its own message, and in a payment
/// request that value can be a card number or a CVV.
pub fn describe_decode_error(e: &serde_json::Error) -> String {
    let kind = match e.classify() {
        Category::Io => "io",
        Category::Syntax => "syntax",
        Category::Data => "data",
        Category::Eof => "truncated input",
    };
    format!("{} error at line {} column {}", kind, e.line(), e.column())
}

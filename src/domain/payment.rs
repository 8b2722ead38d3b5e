use super::id::PaymentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of trailing card-number characters kept after the bank call.
pub const MASKED_DIGITS: usize = 4;

/// An incoming card-payment authorization request.
///
/// Holds the full card number and CVV, so it only lives for the duration of
/// one submission. `Debug` never prints either of them.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentRequest {
    pub card_number: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    pub currency: String,
    /// Amount in minor units of `currency`.
    pub amount: u32,
    pub cvv: String,
}

impl fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentRequest")
            .field("card_number", &mask_card_number(&self.card_number))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("currency", &self.currency)
            .field("amount", &self.amount)
            .field("cvv", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Authorized,
    Unauthorized,
    Declined,
}

impl PaymentStatus {
    pub fn from_authorized(authorized: bool) -> Self {
        if authorized {
            PaymentStatus::Authorized
        } else {
            PaymentStatus::Unauthorized
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Authorized => "Authorized",
            PaymentStatus::Unauthorized => "Unauthorized",
            PaymentStatus::Declined => "Declined",
        };
        f.write_str(s)
    }
}

/// The recorded result of one payment, as returned to callers and stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationOutcome {
    pub id: PaymentId,
    pub status: PaymentStatus,
    /// Last four characters of the card number.
    pub card_number: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    pub currency: String,
    pub amount: u32,
}

impl AuthorizationOutcome {
    /// Builds the outcome for `request`, copying everything but the card
    /// number from the request and masking the card number.
    pub fn new(id: PaymentId, status: PaymentStatus, request: &PaymentRequest) -> Self {
        Self {
            id,
            status,
            card_number: mask_card_number(&request.card_number),
            expiry_month: request.expiry_month,
            expiry_year: request.expiry_year,
            currency: request.currency.clone(),
            amount: request.amount,
        }
    }
}

/// Returns the last four characters of `card_number`, or the whole string
/// when it is shorter than that.
pub fn mask_card_number(card_number: &str) -> String {
    let count = card_number.chars().count();
    card_number
        .chars()
        .skip(count.saturating_sub(MASKED_DIGITS))
        .collect()
}

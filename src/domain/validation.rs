//! Request validation.
//!
//! Each rule is a standalone function so it can be tested on its own.
//! [`Validator::validate`] runs them in a fixed order and reports the first
//! failure only.

use super::payment::PaymentRequest;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use thiserror::Error;

pub const CARD_NUMBER_LEN: std::ops::RangeInclusive<usize> = 14..=19;
pub const CVV_LEN: std::ops::RangeInclusive<usize> = 3..=4;
pub const EXPIRY_YEAR: std::ops::RangeInclusive<u32> = 1000..=9999;

/// A single failed validation rule.
///
/// Messages never echo the offending value, so they are safe to return to
/// callers and to log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

type Rule = std::result::Result<(), ValidationError>;

fn all_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_card_number(card_number: &str) -> Rule {
    if !all_digits(card_number) {
        return Err(ValidationError::new(
            "card_number",
            "must contain decimal digits only",
        ));
    }
    if !CARD_NUMBER_LEN.contains(&card_number.len()) {
        return Err(ValidationError::new(
            "card_number",
            format!(
                "must be between {} and {} digits long",
                CARD_NUMBER_LEN.start(),
                CARD_NUMBER_LEN.end()
            ),
        ));
    }
    Ok(())
}

pub fn validate_cvv(cvv: &str) -> Rule {
    if !all_digits(cvv) {
        return Err(ValidationError::new("cvv", "must contain decimal digits only"));
    }
    if !CVV_LEN.contains(&cvv.len()) {
        return Err(ValidationError::new(
            "cvv",
            format!(
                "must be between {} and {} digits long",
                CVV_LEN.start(),
                CVV_LEN.end()
            ),
        ));
    }
    Ok(())
}

pub fn validate_currency(currency: &str, known: &BTreeSet<String>) -> Rule {
    if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(ValidationError::new("currency", "must be a 3-letter code"));
    }
    if !known.contains(currency) {
        return Err(ValidationError::new("currency", "is not a supported currency"));
    }
    Ok(())
}

pub fn validate_amount(amount: u32) -> Rule {
    if amount == 0 {
        return Err(ValidationError::new("amount", "must be positive"));
    }
    Ok(())
}

pub fn validate_expiry_month(month: u32) -> Rule {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::new("expiry_month", "must be between 1 and 12"));
    }
    Ok(())
}

pub fn validate_expiry_year(year: u32) -> Rule {
    if !EXPIRY_YEAR.contains(&year) {
        return Err(ValidationError::new("expiry_year", "must be a 4-digit year"));
    }
    Ok(())
}

/// The first instant of (`year`, `month`) in UTC must be strictly after `now`,
/// which rules out the current month as well as any past one.
pub fn validate_expiry_in_future(month: u32, year: u32, now: DateTime<Utc>) -> Rule {
    let first_of_month = i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, 1))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ValidationError::new("expiry_date", "is not a valid month"))?;

    if first_of_month <= now {
        return Err(ValidationError::new("expiry_date", "must be in the future"));
    }
    Ok(())
}

/// Validates payment requests against a fixed set of accepted currencies.
#[derive(Debug, Clone)]
pub struct Validator {
    known_currencies: BTreeSet<String>,
}

impl Validator {
    pub fn new(known_currencies: BTreeSet<String>) -> Self {
        Self { known_currencies }
    }

    pub fn validate(&self, req: &PaymentRequest) -> Rule {
        self.validate_at(req, Utc::now())
    }

    /// Like [`Validator::validate`], with an explicit clock reading for the
    /// expiry check.
    pub fn validate_at(&self, req: &PaymentRequest, now: DateTime<Utc>) -> Rule {
        validate_card_number(&req.card_number)?;
        validate_expiry_month(req.expiry_month)?;
        validate_expiry_year(req.expiry_year)?;
        validate_expiry_in_future(req.expiry_month, req.expiry_year, now)?;
        validate_currency(&req.currency, &self.known_currencies)?;
        validate_amount(req.amount)?;
        validate_cvv(&req.cvv)?;
        Ok(())
    }
}

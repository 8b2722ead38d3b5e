use crate::application::gateway::PaymentGateway;
use crate::domain::payment::PaymentRequest;
use crate::error::GatewayError;
use axum::body::Bytes;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

pub type AppState = Arc<PaymentGateway>;

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}

pub fn router(gateway: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/payments", post(create_payment))
        .route("/payments/{payment_id}", get(get_payment))
        .route("/recall", get(recall))
        .route("/make_payment", post(make_payment))
        .with_state(gateway)
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// Takes the raw body so decode errors get the same `{"error": ...}` shape as
/// every other failure.
pub async fn create_payment(State(gateway): State<AppState>, body: Bytes) -> Response {
    match gateway.submit_json(&body).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_payment(
    State(gateway): State<AppState>,
    Path(payment_id): Path<String>,
) -> Response {
    match gateway.recall(&payment_id).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct RecallQuery {
    pub payment_id: Option<String>,
}

pub async fn recall(State(gateway): State<AppState>, Query(query): Query<RecallQuery>) -> Response {
    let Some(payment_id) = query.payment_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "invalid recall request: missing payment_id"})),
        )
            .into_response();
    };
    match gateway.recall(&payment_id).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Fields posted by the HTML payment form. Every value arrives as text and
/// `amount` is in major units, e.g. `12.34`.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub currency: String,
    pub amount: String,
    pub cvv: String,
}

impl PaymentForm {
    pub fn into_request(self) -> Result<PaymentRequest, GatewayError> {
        Ok(PaymentRequest {
            expiry_month: parse_number("expiry_month", &self.expiry_month)?,
            expiry_year: parse_number("expiry_year", &self.expiry_year)?,
            amount: minor_units(&self.amount)?,
            card_number: self.card_number,
            currency: self.currency,
            cvv: self.cvv,
        })
    }
}

fn parse_number(field: &str, value: &str) -> Result<u32, GatewayError> {
    value
        .trim()
        .parse()
        .map_err(|_| GatewayError::MalformedRequest(format!("{} is not a number", field)))
}

/// Converts a decimal amount in major units into minor units.
///
/// Fractions of a minor unit are rejected rather than truncated.
pub fn minor_units(value: &str) -> Result<u32, GatewayError> {
    let invalid = || GatewayError::MalformedRequest("amount is not a valid amount".to_string());
    let major = Decimal::from_str(value.trim()).map_err(|_| invalid())?;
    let minor = major
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(invalid)?;
    if !minor.fract().is_zero() {
        return Err(invalid());
    }
    minor.to_u32().ok_or_else(invalid)
}

/// Form counterpart of `POST /payments`; feeds the same submission flow.
pub async fn make_payment(
    State(gateway): State<AppState>,
    Form(form): Form<PaymentForm>,
) -> Response {
    let req = match form.into_request() {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(error = %e, "malformed payment form");
            return e.into_response();
        }
    };
    match gateway.submit(req).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units() {
        assert_eq!(minor_units("12.34").unwrap(), 1234);
        assert_eq!(minor_units("7").unwrap(), 700);
        assert_eq!(minor_units(" 0.5 ").unwrap(), 50);
        assert_eq!(minor_units("0").unwrap(), 0);
    }

    #[test]
    fn test_minor_units_rejects_bad_amounts() {
        for bad in ["", "abc", "1.234", "-5", "99999999999"] {
            let err = minor_units(bad).unwrap_err();
            assert!(matches!(err, GatewayError::MalformedRequest(_)), "{:?}", bad);
        }
    }

    #[test]
    fn test_form_into_request() {
        let form = PaymentForm {
            card_number: "2222405343248877".to_string(),
            expiry_month: "4".to_string(),
            expiry_year: "2030".to_string(),
            currency: "GBP".to_string(),
            amount: "1.05".to_string(),
            cvv: "123".to_string(),
        };
        let req = form.into_request().unwrap();
        assert_eq!(req.expiry_month, 4);
        assert_eq!(req.expiry_year, 2030);
        assert_eq!(req.amount, 105);
        assert_eq!(req.card_number, "2222405343248877");
    }

    #[test]
    fn test_form_with_bad_month() {
        let form = PaymentForm {
            expiry_month: "April".to_string(),
            ..PaymentForm::default()
        };
        let err = form.into_request().unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed payment request: expiry_month is not a number"
        );
    }
}

#![allow(dead_code)]

use card_gateway::application::gateway::PaymentGateway;
use card_gateway::config::GatewayConfig;
use card_gateway::infrastructure::bank::HttpBank;
use card_gateway::infrastructure::in_memory::InMemoryPaymentStore;
use chrono::{Datelike, Utc};
use serde_json::{Value, json};
use std::time::Duration;

pub const CARD_NUMBER: &str = "2222405343248877";

/// A year that keeps any expiry month in the future.
pub fn future_year() -> u32 {
    (Utc::now().year() + 1) as u32
}

pub fn valid_request_json() -> Value {
    json!({
        "card_number": CARD_NUMBER,
        "expiry_month": 12,
        "expiry_year": future_year(),
        "currency": "GBP",
        "amount": 100,
        "cvv": "123"
    })
}

/// The body the bank should receive for [`valid_request_json`].
pub fn expected_wire_json() -> Value {
    json!({
        "card_number": CARD_NUMBER,
        "expiry_date": format!("12/{}", future_year()),
        "currency": "GBP",
        "amount": 100,
        "cvv": "123"
    })
}

pub fn bank_config(url: String) -> GatewayConfig {
    GatewayConfig::default()
        .with_bank_url(url)
        .with_bank_timeout(Duration::from_secs(2))
}

/// A gateway talking to the bank at `bank_url`, with a store the test can inspect.
pub fn gateway_for(bank_url: String) -> (PaymentGateway, InMemoryPaymentStore) {
    let config = bank_config(bank_url);
    let bank = HttpBank::from_config(&config).expect("Failed to build bank client");
    let store = InMemoryPaymentStore::new();
    let gateway = PaymentGateway::new(&config, Box::new(bank), Box::new(store.clone()));
    (gateway, store)
}

/// URL of a local port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/payments", addr)
}

//! Application layer orchestrating validation, the bank call and storage.
//!
//! This module defines the `PaymentGateway`, the entry point for submitting
//! payments and recalling their outcomes.

pub mod gateway;

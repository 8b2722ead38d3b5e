//! Core payment types and the ports the application layer depends on.

pub mod id;
pub mod payment;
pub mod ports;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid payment id {input:?}: {reason}")]
pub struct IdParseError {
    input: String,
    reason: String,
}

/// Identifier of a processed payment.
///
/// Backed by a version 7 UUID, so ids sort by creation time both as strings
/// and as their 16-byte big-endian representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Mints a fresh id.
    ///
    /// `Uuid::now_v7` keeps a process-wide counter, so ids minted concurrently
    /// or within the same millisecond stay unique and ordered.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn parse(input: &str) -> Result<Self, IdParseError> {
        Uuid::try_parse(input.trim())
            .map(Self)
            .map_err(|e| IdParseError {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PaymentId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

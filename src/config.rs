use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BANK_URL: &str = "http://localhost:8080/payments";
pub const DEFAULT_BANK_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CURRENCIES: [&str; 3] = ["USD", "GBP", "EUR"];

/// Startup configuration for the gateway.
///
/// Built once by the binary (or a test) and handed to the components that
/// need it.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Endpoint the bank client POSTs authorization requests to.
    pub bank_url: String,
    /// Upper bound on a single bank round-trip.
    pub bank_timeout: Duration,
    pub known_currencies: BTreeSet<String>,
    /// Path of the persistent store, if one should be used.
    pub db_path: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bank_url: DEFAULT_BANK_URL.to_string(),
            bank_timeout: DEFAULT_BANK_TIMEOUT,
            known_currencies: DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect(),
            db_path: None,
        }
    }
}

impl GatewayConfig {
    pub fn with_bank_url(mut self, url: impl Into<String>) -> Self {
        self.bank_url = url.into();
        self
    }

    pub fn with_bank_timeout(mut self, timeout: Duration) -> Self {
        self.bank_timeout = timeout;
        self
    }

    /// Replaces the accepted currencies. Codes are upper-cased.
    pub fn with_currencies<I, S>(mut self, currencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.known_currencies = currencies
            .into_iter()
            .map(|c| c.as_ref().trim().to_ascii_uppercase())
            .collect();
        self
    }

    pub fn with_db_path(mut self, path: Option<PathBuf>) -> Self {
        self.db_path = path;
        self
    }
}

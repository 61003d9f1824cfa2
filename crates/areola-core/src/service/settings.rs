use std::collections::HashMap;

/// Environment-driven configuration for the sweep service client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Base URL of the sweep service; defaults to the local backend.
    pub endpoint: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ServiceSettings {
    pub(crate) const ENDPOINT_ENV: &'static str = "AREOLA_ENDPOINT";
    pub(crate) const TIMEOUT_ENV: &'static str = "AREOLA_TIMEOUT_SECS";

    /// Load settings from environment variables.
    ///
    /// * `AREOLA_ENDPOINT`     — Base URL of the sweep service.
    /// * `AREOLA_TIMEOUT_SECS` — Per-request timeout (default 30).
    pub fn from_env() -> Self {
        Self::from_map(std::env::vars().collect())
    }

    fn from_map(vars: HashMap<String, String>) -> Self {
        let endpoint = vars
            .get(Self::ENDPOINT_ENV)
            .cloned()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let timeout_secs = vars
            .get(Self::TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            endpoint,
            timeout_secs,
        }
    }
}

mod settings;

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::sweep::SweepResponse;

pub use settings::ServiceSettings;

/// Failures at the sweep service boundary.
///
/// Both kinds are caught at the controller and degrade to "no state change";
/// they never escape to the presentation layer as a panic.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The request could not complete or the body was not JSON at all.
    #[error("sweep request failed: {detail}")]
    Network { detail: String },
    /// JSON arrived but did not match the sweep result contract.
    #[error("sweep response malformed: {detail}")]
    MalformedData { detail: String },
}

impl SweepError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network {
            detail: err.to_string(),
        }
    }

    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::MalformedData {
            detail: err.to_string(),
        }
    }
}

/// Client abstraction over the external fraud-sweep service.
///
/// The scoring itself lives behind this trait; the crate only renders what
/// the service returns.
#[async_trait]
pub trait SweepService: Send + Sync {
    /// Sweep the server-held dataset (no payload).
    async fn run_sweep(&self) -> Result<SweepResponse, SweepError>;

    /// Sweep an uploaded transaction dump.
    async fn upload_sweep(
        &self,
        file_name: &str,
        payload: Vec<u8>,
    ) -> Result<SweepResponse, SweepError>;
}

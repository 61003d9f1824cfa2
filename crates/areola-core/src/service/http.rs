use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::debug;

use super::{ServiceSettings, SweepError, SweepService};
use crate::sweep::SweepResponse;

const DEFAULT_ENDPOINT: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Multipart field name the upload endpoint expects.
const UPLOAD_FIELD: &str = "file";

/// HTTP client for the external sweep service.
///
/// Endpoint selection is solely the caller's presence or absence of an
/// uploaded file: no payload hits `GET /run_sweep`, a payload hits
/// `POST /upload_sweep`. Requests are not retried and cannot be cancelled
/// once in flight.
#[derive(Debug, Clone)]
pub struct HttpSweepService {
    http: Client,
    run_url: String,
    upload_url: String,
}

impl HttpSweepService {
    pub fn new(settings: &ServiceSettings) -> Result<Self> {
        let base = settings
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let base = base.trim_end_matches('/').to_string();
        let http = Client::builder()
            .user_agent("areola/0.1")
            .timeout(Duration::from_secs(
                settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()
            .context("failed to build sweep service HTTP client")?;
        Ok(Self {
            http,
            run_url: format!("{base}/run_sweep"),
            upload_url: format!("{base}/upload_sweep"),
        })
    }

    async fn decode(response: Response) -> Result<SweepResponse, SweepError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SweepError::Network {
                detail: format!("sweep service returned {status}: {body}"),
            });
        }
        let body = response.text().await.map_err(SweepError::network)?;
        // Not-JSON-at-all is a transport-level failure; JSON that misses
        // contract fields is malformed data.
        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|err| SweepError::network(format!("response was not JSON: {err}")))?;
        serde_json::from_value(value).map_err(SweepError::malformed)
    }
}

#[async_trait]
impl SweepService for HttpSweepService {
    async fn run_sweep(&self) -> Result<SweepResponse, SweepError> {
        debug!(url = %self.run_url, "requesting server-side sweep");
        let response = self
            .http
            .get(&self.run_url)
            .send()
            .await
            .map_err(SweepError::network)?;
        Self::decode(response).await
    }

    async fn upload_sweep(
        &self,
        file_name: &str,
        payload: Vec<u8>,
    ) -> Result<SweepResponse, SweepError> {
        debug!(url = %self.upload_url, file_name, bytes = payload.len(), "uploading sweep payload");
        let part = Part::bytes(payload).file_name(file_name.to_string());
        let form = Form::new().part(UPLOAD_FIELD, part);
        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(SweepError::network)?;
        Self::decode(response).await
    }
}

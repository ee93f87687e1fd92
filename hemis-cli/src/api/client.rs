//! HTTP client for the registry API

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde_json::Value;

use super::operations::{CreateOutcome, RecordType, extract_created_id, flatten_validation_errors};

/// Record persistence seam. The uploader only depends on this trait, so it
/// tests against an in-memory store instead of a live registry.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Submit one record for creation.
    ///
    /// `Err` means the registry could not be reached or answered
    /// unintelligibly (a run-fatal condition); rejections come back as
    /// `Ok(CreateOutcome::Rejected)`.
    async fn create(&self, record_type: RecordType, payload: Value) -> Result<CreateOutcome>;
}

/// [`RecordStore`] over the registry's REST API: bearer-token JSON POSTs to
/// the collection endpoint of each record type.
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl RegistryClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: token.into(),
        }
    }
}

#[async_trait]
impl RecordStore for RegistryClient {
    async fn create(&self, record_type: RecordType, payload: Value) -> Result<CreateOutcome> {
        let url = format!("{}/{}", self.base_url, record_type.endpoint());
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Failed to reach registry API at {}", url))?;

        let status = response.status();
        if status.is_success() {
            let body: Value = response
                .json()
                .await
                .with_context(|| format!("Invalid JSON in {} response from {}", status, url))?;
            return Ok(CreateOutcome::Created {
                id: extract_created_id(&body),
            });
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Ok(CreateOutcome::Rejected {
                reason: flatten_validation_errors(&body),
            });
        }

        // Other non-success statuses are opaque per-record failures
        let body = response.text().await.unwrap_or_default();
        let summary = body.trim();
        let reason = if summary.is_empty() {
            format!("registry returned {}", status)
        } else {
            format!("registry returned {}: {}", status, summary)
        };
        Ok(CreateOutcome::Rejected { reason })
    }
}

//! Hosted REST table backend.
//!
//! Talks to a PostgREST-style endpoint: the whole store lives in one row of
//! one table, keyed by a fixed `row_id`. Fetch filters on the row id and
//! returns the row whole; upsert POSTs the row with merge-duplicates
//! resolution, replacing the document.

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use skillscope_core::document::{StoreDocument, ROW_ID};

use crate::error::BackendError;
use crate::DocumentBackend;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// PostgREST-style hosted table backend.
pub struct RestBackend {
    base_url: String,
    api_key: String,
    table: String,
    client: reqwest::Client,
}

impl RestBackend {
    pub fn new(base_url: &str, api_key: &str, table: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: table.to_string(),
            client,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url, self.table)
    }

    fn map_transport_error(e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout(DEFAULT_TIMEOUT_SECS)
        } else {
            BackendError::NetworkError(e.to_string())
        }
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(BackendError::RateLimited {
                retry_after_ms: retry_after,
            });
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::AuthenticationFailed(body));
        }
        if status == 404 {
            return Err(BackendError::TableNotFound(self.table.clone()));
        }
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::ApiError { status, message });
        }
        Ok(response)
    }
}

#[async_trait]
impl DocumentBackend for RestBackend {
    fn name(&self) -> &str {
        "rest"
    }

    #[instrument(skip(self), fields(table = %self.table))]
    async fn fetch(&self) -> anyhow::Result<Option<StoreDocument>> {
        let response = self
            .client
            .get(self.table_url())
            .query(&[("row_id", format!("eq.{ROW_ID}"))])
            .header("apikey", &self.api_key)
            .header("authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(Self::map_transport_error)?;
        let response = self.check_status(response).await?;

        // PostgREST answers a filter query with an array; no row means an
        // empty array, not a 404.
        let rows: Vec<Value> = response.json().await.map_err(|e| BackendError::ApiError {
            status: 0,
            message: format!("failed to parse response: {e}"),
        })?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };
        let document: StoreDocument =
            serde_json::from_value(row).map_err(|e| BackendError::ApiError {
                status: 0,
                message: format!("failed to decode document row: {e}"),
            })?;
        Ok(Some(document))
    }

    #[instrument(skip(self, document), fields(table = %self.table))]
    async fn upsert(&self, document: &StoreDocument) -> anyhow::Result<()> {
        let mut row = serde_json::to_value(document)?;
        row.as_object_mut()
            .expect("document serializes to an object")
            .insert("row_id".to_string(), Value::String(ROW_ID.to_string()));

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("prefer", "resolution=merge-duplicates")
            .header("content-type", "application/json")
            .json(&row)
            .send()
            .await
            .map_err(Self::map_transport_error)?;
        self.check_status(response).await?;
        Ok(())
    }
}

// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::error::IndexerError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Read-only access to the indexer's JSON endpoints.
#[async_trait::async_trait]
pub trait IndexerTransport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, IndexerError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, IndexerError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl IndexerTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, IndexerError> {
        debug!("HttpTransport::get_json | GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Indexer request failed with status: {}", status);
            return Err(IndexerError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| IndexerError::Decode(e.to_string()))
    }
}

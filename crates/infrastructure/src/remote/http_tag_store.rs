use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use domain::{DataError, Tag, TagStore};

/// Gateway to the remote tags API.
///
/// A single unauthenticated GET returns the complete collection as a JSON
/// array of `{id, tag, color}` objects. The remote side is read-only from
/// this system's perspective, so `save_tags` is a no-op.
pub struct HttpTagStore {
    client: Client,
    endpoint: String,
}

impl HttpTagStore {
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_timeouts(endpoint, Duration::from_secs(30), Duration::from_secs(60))
    }

    pub fn with_timeouts(
        endpoint: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl TagStore for HttpTagStore {
    async fn get_tags(&self) -> Result<Vec<Tag>, DataError> {
        debug!(endpoint = %self.endpoint, "fetching tags from the remote API");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| DataError::Remote(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let msg = if body.is_empty() {
                format!("remote API request failed with status {}", status)
            } else {
                body
            };
            error!(%status, "error getting tags from remote API");
            return Err(DataError::Remote(msg));
        }

        let tags = response
            .json::<Vec<Tag>>()
            .await
            .map_err(|e| DataError::Remote(e.to_string()))?;

        debug!(count = tags.len(), "fetched tags from remote API");
        Ok(tags)
    }

    async fn save_tags(&self, _tags: &[Tag]) -> Result<(), DataError> {
        // The remote API is read-only
        Ok(())
    }

    async fn shutdown(&self) {
        debug!("shutting down the remote tag store");
        // Client resources are released on drop
    }
}

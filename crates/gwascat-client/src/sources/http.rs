//! Default HTTP transport backed by the allowlisted `reqwest` client.

use async_trait::async_trait;
use gwascat_common::sandbox::SandboxClient as Client;
use gwascat_common::{CatalogConfig, Result};
use tracing::{debug, instrument};

use super::Transport;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Ok(Self { client: Client::from_config(config)? })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.client
            .get(url)?
            .send()
            .await?
            .error_for_status()?;

        let body = resp.bytes().await?;
        debug!(bytes = body.len(), "Fetched response body");
        Ok(body.to_vec())
    }
}

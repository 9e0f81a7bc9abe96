//! Transport and catalog clients.

pub mod http;
pub mod gwas_catalog;

use async_trait::async_trait;
use gwascat_common::Result;

pub use http::HttpTransport;
pub use gwas_catalog::GwasCatalogClient;

/// Fetches the raw body behind a URL.
///
/// Any failure to obtain a body (connection, timeout, non-2xx status) must
/// be reported as `GwasError::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// A plain fetch function is a transport.
#[async_trait]
impl<F> Transport for F
where
    F: Fn(&str) -> Result<Vec<u8>> + Send + Sync,
{
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (self)(url)
    }
}

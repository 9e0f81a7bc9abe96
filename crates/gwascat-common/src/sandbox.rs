use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use crate::config::CatalogConfig;
use crate::error::GwasError;

/// An HTTP client that only issues requests to approved hosts.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client with the default allowlist.
    pub fn with_timeout(timeout: Duration) -> Result<Self, GwasError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "www.ebi.ac.uk", // GWAS Catalog
            "localhost",
            "127.0.0.1",
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| GwasError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Builds a client whose timeout and allowlist follow `config`. The host
    /// of the configured base URL is always allowed.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, GwasError> {
        let mut sandbox = Self::with_timeout(Duration::from_secs(config.timeout_secs))?;
        for domain in &config.extra_allowed_domains {
            sandbox.allow_domain(domain);
        }
        let base = Url::parse(&config.base_url)
            .map_err(|e| GwasError::Config(format!("invalid base_url {}: {}", config.base_url, e)))?;
        if let Some(host) = base.host_str() {
            sandbox.allow_domain(host);
        }
        Ok(sandbox)
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or a subdomain of an allowed host
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, GwasError> {
        if !self.is_allowed(url) {
            return Err(GwasError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_client() -> SandboxClient {
        SandboxClient::from_config(&CatalogConfig::default()).unwrap()
    }

    #[test]
    fn test_default_allowlist() {
        let client = default_client();
        assert!(client.is_allowed("https://www.ebi.ac.uk/gwas/api/search/moreresults?q=rs1"));
        assert!(!client.is_allowed("https://example.org/gwas"));
        assert!(!client.is_allowed("not a url"));
    }

    #[test]
    fn test_subdomain_allowed() {
        let mut client = default_client();
        client.allow_domain("example.org");
        assert!(client.is_allowed("https://api.example.org/x"));
        assert!(!client.is_allowed("https://badexample.org/x"));
    }

    #[test]
    fn test_get_rejects_unlisted_host() {
        let client = default_client();
        let err = client.get("https://example.org/").unwrap_err();
        assert!(matches!(err, GwasError::Security(_)));
    }

    #[test]
    fn test_from_config_allows_base_host() {
        let mut config = CatalogConfig::default();
        config.base_url = "http://mirror.internal:8080/gwas/api/".to_string();
        let client = SandboxClient::from_config(&config).unwrap();
        assert!(client.is_allowed("http://mirror.internal:8080/gwas/api/search/moreresults"));
    }
}

//! Catalog client configuration.
//!
//! The base URL, default search filters and HTTP behaviour live here rather
//! than as constants in the client, so a mirror or a stricter p-value default
//! can be set from a YAML/JSON file.

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::{GwasError, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.ebi.ac.uk/gwas/api/";
pub const DEFAULT_SEARCH_PATH: &str = "search/moreresults";

/// Complete client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// API root, e.g. "https://www.ebi.ac.uk/gwas/api/"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Search endpoint, relative to `base_url`
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Filter values used when a search does not override them
    #[serde(default)]
    pub defaults: SearchParams,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Searches in flight at once during a batch (1 = sequential)
    #[serde(default = "default_concurrency")]
    pub batch_concurrency: usize,

    /// Hosts allowed in addition to the base URL's host
    #[serde(default)]
    pub extra_allowed_domains: Vec<String>,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_search_path() -> String { DEFAULT_SEARCH_PATH.to_string() }
fn default_timeout() -> u64 { 30 }
fn default_concurrency() -> usize { 1 }

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_path: default_search_path(),
            defaults: SearchParams::default(),
            timeout_secs: default_timeout(),
            batch_concurrency: default_concurrency(),
            extra_allowed_domains: vec![],
        }
    }
}

// ── Search parameters ─────────────────────────────────────────────────────────

/// Filter values sent with every search. Empty strings mean "unfiltered".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Upper bound on returned documents
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Result view. Only "association" is known to return data.
    #[serde(default = "default_facet")]
    pub facet: String,

    /// Maximum p-value for inclusion
    #[serde(default = "default_pvalfilter")]
    pub pvalfilter: String,

    #[serde(default)]
    pub orfilter: String,

    #[serde(default)]
    pub betafilter: String,

    #[serde(default)]
    pub datefilter: String,

    #[serde(default)]
    pub sort: String,

    #[serde(default)]
    pub asc: String,
}

fn default_max_results() -> usize { 600 }
fn default_facet() -> String { "association".to_string() }
fn default_pvalfilter() -> String { "5e-8".to_string() }

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            facet: default_facet(),
            pvalfilter: default_pvalfilter(),
            orfilter: String::new(),
            betafilter: String::new(),
            datefilter: String::new(),
            sort: String::new(),
            asc: String::new(),
        }
    }
}

impl SearchParams {
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    pub fn facet(mut self, facet: impl Into<String>) -> Self {
        self.facet = facet.into();
        self
    }

    pub fn pvalfilter(mut self, pval: impl Into<String>) -> Self {
        self.pvalfilter = pval.into();
        self
    }

    pub fn orfilter(mut self, or: impl Into<String>) -> Self {
        self.orfilter = or.into();
        self
    }

    pub fn betafilter(mut self, beta: impl Into<String>) -> Self {
        self.betafilter = beta.into();
        self
    }

    pub fn datefilter(mut self, date: impl Into<String>) -> Self {
        self.datefilter = date.into();
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn asc(mut self, asc: impl Into<String>) -> Self {
        self.asc = asc.into();
        self
    }

    /// Apply one named override. Unrecognised names are ignored, the same
    /// way the catalog ignores parameters it does not know.
    pub fn apply_override(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "max_results" | "max" => {
                self.max_results = value.trim().parse().map_err(|_| {
                    GwasError::Config(format!("max_results must be a non-negative integer, got {value:?}"))
                })?;
            }
            "facet"      => self.facet = value.to_string(),
            "pvalfilter" => self.pvalfilter = value.to_string(),
            "orfilter"   => self.orfilter = value.to_string(),
            "betafilter" => self.betafilter = value.to_string(),
            "datefilter" => self.datefilter = value.to_string(),
            "sort"       => self.sort = value.to_string(),
            "asc"        => self.asc = value.to_string(),
            other => warn!(name = other, "Ignoring unknown search override"),
        }
        Ok(())
    }

    /// Apply a sequence of named overrides on top of `self`.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in overrides {
            self.apply_override(name, value)?;
        }
        Ok(self)
    }
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl CatalogConfig {
    /// Load from YAML file
    pub fn from_yaml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: &str) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.search_url()?;
        if self.timeout_secs == 0 {
            return Err(GwasError::Config("timeout_secs must be at least 1".to_string()));
        }
        if self.batch_concurrency == 0 {
            return Err(GwasError::Config("batch_concurrency must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Full search endpoint URL (`base_url` joined with `search_path`).
    pub fn search_url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| GwasError::Config(format!("invalid base_url {}: {}", self.base_url, e)))?;
        base.join(&self.search_path)
            .map_err(|e| GwasError::Config(format!("invalid search_path {}: {}", self.search_path, e)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.search_url().unwrap().as_str(),
            "https://www.ebi.ac.uk/gwas/api/search/moreresults"
        );
        assert_eq!(config.batch_concurrency, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_search_params() {
        let params = SearchParams::default();
        assert_eq!(params.max_results, 600);
        assert_eq!(params.facet, "association");
        assert_eq!(params.pvalfilter, "5e-8");
        assert!(params.orfilter.is_empty());
        assert!(params.betafilter.is_empty());
        assert!(params.datefilter.is_empty());
        assert!(params.sort.is_empty());
        assert!(params.asc.is_empty());
    }

    #[test]
    fn test_named_overrides() {
        let params = SearchParams::default()
            .with_overrides([("pvalfilter", "5e-10"), ("max_results", "100"), ("colour", "red")])
            .unwrap();
        assert_eq!(params.max_results, 100);
        assert_eq!(params.pvalfilter, "5e-10");
        assert_eq!(params.facet, "association");
    }

    #[test]
    fn test_bad_max_results_override() {
        let err = SearchParams::default()
            .with_overrides([("max_results", "lots")])
            .unwrap_err();
        assert!(matches!(err, GwasError::Config(_)));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = CatalogConfig::default();
        config.batch_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = CatalogConfig::default();
        config.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(GwasError::Config(_))));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gwas.json");
        std::fs::write(&path, r#"{"timeout_secs": 0}"#).unwrap();
        assert!(CatalogConfig::from_json(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "defaults:\n  pvalfilter: \"5e-50\"\nbatch_concurrency: 4\n";
        let config: CatalogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.defaults.pvalfilter, "5e-50");
        assert_eq!(config.defaults.max_results, 600);
        assert_eq!(config.batch_concurrency, 4);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gwas.yaml");
        let path = path.to_str().unwrap();

        let mut config = CatalogConfig::default();
        config.defaults = config.defaults.orfilter("2.0");
        config.to_yaml(path).unwrap();

        let loaded = CatalogConfig::from_yaml(path).unwrap();
        assert_eq!(loaded.defaults, config.defaults);
        assert_eq!(loaded.base_url, config.base_url);
    }

    #[test]
    fn test_json_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gwas.json");
        std::fs::write(&path, r#"{"base_url": "http://localhost:9000/gwas/api/", "timeout_secs": 5}"#).unwrap();

        let config = CatalogConfig::from_json(path.to_str().unwrap()).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.search_url().unwrap().as_str(),
            "http://localhost:9000/gwas/api/search/moreresults"
        );
    }
}

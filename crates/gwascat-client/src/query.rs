//! Search request construction.
//!
//! The catalog receives the filter parameters in a fixed order
//! (`q, max, facet, pvalfilter, orfilter, betafilter, datefilter, sort, asc`).
//! Upstream logging and caching key on the raw query string, so the order
//! is kept stable no matter how the overrides were supplied.
//!
//! Values are form-encoded with spaces as `+` and every byte outside
//! `A-Z a-z 0-9 _ . -` percent-encoded, so `*` goes out as `%2A`.

use tracing::debug;
use url::{form_urlencoded, Url};

use gwascat_common::{CatalogConfig, Result, SearchParams};

const ASSOCIATION_FACET: &str = "association";

/// A fully formed, not yet executed, search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

impl SearchRequest {
    pub fn param_names(&self) -> Vec<&'static str> {
        self.params.iter().map(|(name, _)| *name).collect()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    search_url: Url,
}

impl QueryBuilder {
    pub fn new(search_url: Url) -> Self {
        Self { search_url }
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Ok(Self::new(config.search_url()?))
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Build the request for `query`. Never fails and performs no I/O.
    pub fn build(&self, query: &str, params: &SearchParams) -> SearchRequest {
        if params.facet != ASSOCIATION_FACET {
            debug!(facet = %params.facet, "Non-association facets may return no documents");
        }

        let ordered: Vec<(&'static str, String)> = vec![
            ("q", query.to_string()),
            ("max", params.max_results.to_string()),
            ("facet", params.facet.clone()),
            ("pvalfilter", params.pvalfilter.clone()),
            ("orfilter", params.orfilter.clone()),
            ("betafilter", params.betafilter.clone()),
            ("datefilter", params.datefilter.clone()),
            ("sort", params.sort.clone()),
            ("asc", params.asc.clone()),
        ];

        let query_string = ordered
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_value(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut url = self.search_url.clone();
        url.set_query(Some(&query_string));

        SearchRequest { url: url.to_string(), params: ordered }
    }
}

/// `form_urlencoded` leaves `*` bare; the catalog has always received it
/// escaped.
fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}

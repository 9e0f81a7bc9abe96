//! GWAS Catalog search client.
//!
//! Endpoint: https://www.ebi.ac.uk/gwas/api/search/moreresults
//!
//! The API has no official documentation. Only the `association` facet is
//! known to return documents; other facets are passed through unchanged.

use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use gwascat_common::{CatalogConfig, Result, SearchParams};

use super::{HttpTransport, Transport};
use crate::models::{BatchResult, SearchResponse};
use crate::query::{QueryBuilder, SearchRequest};

pub struct GwasCatalogClient<T = HttpTransport> {
    transport: T,
    builder: QueryBuilder,
    defaults: SearchParams,
    batch_concurrency: usize,
}

impl GwasCatalogClient<HttpTransport> {
    /// Client for the public catalog with default filters.
    pub fn new() -> Result<Self> {
        Self::from_config(&CatalogConfig::default())
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> GwasCatalogClient<T> {
    /// Client that fetches through `transport` instead of HTTP.
    pub fn with_transport(config: &CatalogConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            builder: QueryBuilder::from_config(config)?,
            defaults: config.defaults.clone(),
            batch_concurrency: config.batch_concurrency,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Filter values used by [`Self::search_default`] and as the base for
    /// named overrides.
    pub fn defaults(&self) -> &SearchParams {
        &self.defaults
    }

    /// Default filters with named overrides applied on top.
    pub fn params_with<'a, I>(&self, overrides: I) -> Result<SearchParams>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.defaults.clone().with_overrides(overrides)
    }

    pub fn request(&self, query: &str, params: &SearchParams) -> SearchRequest {
        self.builder.build(query, params)
    }

    /// Run one search and parse the `response.docs` envelope.
    #[instrument(skip(self, params))]
    pub async fn search(&self, query: &str, params: &SearchParams) -> Result<SearchResponse> {
        let request = self.builder.build(query, params);
        debug!(url = %request.url, "GWAS Catalog search");

        let body = self.transport.fetch(&request.url).await?;
        let resp = SearchResponse::from_slice(&body)?;

        debug!(count = resp.docs().len(), "GWAS Catalog search returned associations");
        Ok(resp)
    }

    pub async fn search_default(&self, query: &str) -> Result<SearchResponse> {
        self.search(query, &self.defaults).await
    }

    /// Search once per identifier, keeping only each association list.
    ///
    /// A failed search is recorded under its identifier and the remaining
    /// identifiers are still searched. Up to `batch_concurrency` searches
    /// run at once; results keep the input order.
    #[instrument(skip(self, identifiers, params), fields(n = identifiers.len()))]
    pub async fn batch_search<S>(&self, identifiers: &[S], params: &SearchParams) -> BatchResult
    where
        S: AsRef<str> + Sync,
    {
        let mut result = BatchResult::default();
        if identifiers.is_empty() {
            warn!("Batch search called with no identifiers");
            return result;
        }

        let outcomes: Vec<(&str, Result<SearchResponse>)> = stream::iter(identifiers)
            .map(|id| {
                let id: &str = id.as_ref();
                async move { (id, self.search(id, params).await) }
            })
            .buffered(self.batch_concurrency.max(1))
            .collect()
            .await;

        for (id, outcome) in outcomes {
            match outcome {
                Ok(resp) => result.insert(id, resp.into_docs()),
                Err(e) => {
                    warn!(identifier = id, error = %e, "Batch search failed for identifier");
                    result.insert_failure(id, e);
                }
            }
        }

        info!(
            succeeded = result.associations.len(),
            failed = result.failures.len(),
            "Batch search finished"
        );
        result
    }
}

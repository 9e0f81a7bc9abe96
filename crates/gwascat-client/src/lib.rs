//! gwascat-client — GWAS Catalog search client.
//!
//! - Search request construction with the catalog's fixed filter order
//! - Search over a pluggable transport (HTTP by default)
//! - SNP-level normalisation of search responses
//! - Batch search and trait term frequency counting

pub mod models;
pub mod query;
pub mod sources;
pub mod normalise;
pub mod enrich;
pub mod lines;

pub use enrich::{enrich, Enrichment, TermCount, TermSource};
pub use models::{AssociationRecord, BatchResult, ParsedSnpMap, RsidAllelePair, SearchResponse};
pub use normalise::{flatten, project, ParseType};
pub use query::{QueryBuilder, SearchRequest};
pub use sources::{GwasCatalogClient, HttpTransport, Transport};

//! gwascat-common — Shared configuration, errors and the HTTP client used by
//! the GWAS Catalog client crates.

pub mod error;
pub mod config;
pub mod sandbox;

// Re-export commonly used types
pub use config::{CatalogConfig, SearchParams};
pub use error::{GwasError, Result};

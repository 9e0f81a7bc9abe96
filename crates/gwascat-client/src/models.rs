//! Data models for catalog search results.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use gwascat_common::{GwasError, Result};

/// One SNP–trait association exactly as the catalog returns it.
pub type AssociationRecord = serde_json::Map<String, Value>;

/// identifier → risk allele → projected attributes.
pub type ParsedSnpMap = IndexMap<String, IndexMap<String, Value>>;

/// Raw search response. Only the `response.docs` envelope is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(rename = "numFound", default, skip_serializing_if = "Option::is_none")]
    pub num_found: Option<u64>,
    pub docs: Vec<AssociationRecord>,
}

impl SearchResponse {
    /// Parse a response body. Anything that is not JSON with a
    /// `response.docs` array is a malformed response.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| GwasError::MalformedResponse(format!("unexpected search response: {e}")))
    }

    pub fn docs(&self) -> &[AssociationRecord] {
        &self.response.docs
    }

    pub fn into_docs(self) -> Vec<AssociationRecord> {
        self.response.docs
    }
}

/// A SNP identifier paired with its risk allele (or `"n/a"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RsidAllelePair {
    pub rs_id: String,
    pub allele: String,
}

impl RsidAllelePair {
    pub fn new(rs_id: impl Into<String>, allele: impl Into<String>) -> Self {
        Self { rs_id: rs_id.into(), allele: allele.into() }
    }

    pub fn as_tuple(&self) -> (&str, &str) {
        (&self.rs_id, &self.allele)
    }
}

/// Association lists from a batch of searches, keyed by the identifier that
/// was searched. Identifiers whose search failed appear in `failures` only.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub associations: IndexMap<String, Vec<AssociationRecord>>,
    pub failures: IndexMap<String, GwasError>,
}

impl BatchResult {
    pub fn insert(&mut self, identifier: impl Into<String>, docs: Vec<AssociationRecord>) {
        let identifier = identifier.into();
        self.failures.shift_remove(&identifier);
        self.associations.insert(identifier, docs);
    }

    pub fn insert_failure(&mut self, identifier: impl Into<String>, error: GwasError) {
        let identifier = identifier.into();
        self.associations.shift_remove(&identifier);
        self.failures.insert(identifier, error);
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.associations.is_empty() && self.failures.is_empty()
    }
}

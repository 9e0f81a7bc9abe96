//! Trait/term frequency counting over a batch of association lists.
//!
//! Association records come in one of two shapes: terms under `synonym`,
//! or terms under `label_autosuggest`. The shape is resolved once per
//! identifier and used for that identifier's whole list.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use gwascat_common::{GwasError, Result};

use crate::models::{AssociationRecord, BatchResult};

/// Term → number of occurrences, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TermCount(IndexMap<String, u64>);

impl TermCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, term: &str) {
        self.add_n(term, 1);
    }

    pub fn add_n(&mut self, term: &str, n: u64) {
        *self.0.entry(term.to_string()).or_insert(0) += n;
    }

    pub fn merge(&mut self, other: &TermCount) {
        for (term, n) in &other.0 {
            self.add_n(term, *n);
        }
    }

    pub fn get(&self, term: &str) -> u64 {
        self.0.get(term).copied().unwrap_or(0)
    }

    /// Sum of all occurrences.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(t, n)| (t.as_str(), *n))
    }

    /// The `n` most frequent terms, ties broken alphabetically.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

impl<'a> FromIterator<&'a str> for TermCount {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut count = TermCount::new();
        for term in iter {
            count.add(term);
        }
        count
    }
}

/// Which field of an association record holds its terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSource {
    Synonym,
    LabelAutosuggest,
}

impl TermSource {
    pub fn field(self) -> &'static str {
        match self {
            TermSource::Synonym => "synonym",
            TermSource::LabelAutosuggest => "label_autosuggest",
        }
    }

    /// Check `synonym` then `label_autosuggest` on the first record; the
    /// answer holds for the whole list. `None` for an empty list or a first
    /// record carrying neither.
    pub fn resolve(records: &[AssociationRecord]) -> Option<Self> {
        let first = records.first()?;
        if first.contains_key(TermSource::Synonym.field()) {
            Some(TermSource::Synonym)
        } else if first.contains_key(TermSource::LabelAutosuggest.field()) {
            Some(TermSource::LabelAutosuggest)
        } else {
            None
        }
    }
}

/// Counts from [`enrich`].
#[derive(Debug, Default)]
pub struct Enrichment {
    /// Occurrences across every successfully counted identifier.
    pub global: TermCount,
    /// Occurrences per identifier, in batch order.
    pub per_identifier: IndexMap<String, TermCount>,
    /// Identifiers whose association list could not be counted.
    pub failures: IndexMap<String, GwasError>,
}

impl Enrichment {
    pub fn into_counts(self) -> (TermCount, IndexMap<String, TermCount>) {
        (self.global, self.per_identifier)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Count the terms of one identifier's association list.
///
/// An empty list gives an empty count. Every record must hold the field
/// resolved from the first record as text or a list of text; anything else
/// makes the whole list a malformed response.
pub fn count_terms(records: &[AssociationRecord]) -> Result<TermCount> {
    let mut count = TermCount::new();
    if records.is_empty() {
        return Ok(count);
    }

    let source = TermSource::resolve(records).ok_or_else(|| {
        GwasError::MalformedResponse(
            "first association carries neither synonym nor label_autosuggest".to_string(),
        )
    })?;

    let field = source.field();
    for (i, record) in records.iter().enumerate() {
        match record.get(field) {
            Some(Value::Array(terms)) => {
                for term in terms {
                    let term = term.as_str().ok_or_else(|| {
                        GwasError::MalformedResponse(format!("association {i} has a non-text {field} term"))
                    })?;
                    count.add(term);
                }
            }
            Some(Value::String(term)) => count.add(term),
            Some(_) => {
                return Err(GwasError::MalformedResponse(format!(
                    "association {i} holds {field} as neither text nor a list"
                )))
            }
            None => {
                return Err(GwasError::MalformedResponse(format!(
                    "association {i} lacks {field}, unlike the first association"
                )))
            }
        }
    }

    debug!(field, terms = count.len(), "Counted association terms");
    Ok(count)
}

/// Term frequencies across a batch, globally and per identifier.
///
/// An identifier that cannot be counted is reported in
/// [`Enrichment::failures`] and contributes nothing to the global count;
/// the other identifiers are still counted.
pub fn enrich(batch: &BatchResult) -> Enrichment {
    let mut enrichment = Enrichment::default();

    for (identifier, records) in &batch.associations {
        match count_terms(records) {
            Ok(count) => {
                enrichment.global.merge(&count);
                enrichment.per_identifier.insert(identifier.clone(), count);
            }
            Err(e) => {
                warn!(identifier = identifier.as_str(), error = %e, "Term counting failed");
                enrichment.failures.insert(identifier.clone(), e);
            }
        }
    }

    debug!(
        terms = enrichment.global.len(),
        occurrences = enrichment.global.total(),
        "Enrichment finished"
    );
    enrichment
}

//! SNP-level views of a search response.
//!
//! Both views walk `response.docs` in order and key each record by its first
//! `rsId` and the risk allele parsed from its first `strongestAllele`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use gwascat_common::{GwasError, Result};

use crate::models::{AssociationRecord, ParsedSnpMap, RsidAllelePair, SearchResponse};

/// Placeholder for an allele or attribute the record does not carry.
pub const NOT_AVAILABLE: &str = "n/a";

/// Attributes kept by [`ParseType::Custom`] when none are requested.
pub const DEFAULT_CUSTOM_ATTRIBUTES: [&str; 2] = ["orPerCopyNum", "riskFrequency"];

/// How much of each record [`project`] keeps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseType {
    /// The whole record.
    #[default]
    All,
    /// Only the requested attributes, `"n/a"` where absent.
    Custom,
    /// Any other name. Identifiers are still collected but nothing is
    /// written beneath them.
    Unrecognized(String),
}

impl From<&str> for ParseType {
    fn from(name: &str) -> Self {
        match name {
            "all" => ParseType::All,
            "custom" => ParseType::Custom,
            other => ParseType::Unrecognized(other.to_string()),
        }
    }
}

impl FromStr for ParseType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(ParseType::from(s))
    }
}

impl fmt::Display for ParseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseType::All => f.write_str("all"),
            ParseType::Custom => f.write_str("custom"),
            ParseType::Unrecognized(name) => f.write_str(name),
        }
    }
}

/// First `rsId` of a record. Every association carries at least one.
pub fn rs_id(record: &AssociationRecord) -> Result<&str> {
    record
        .get("rsId")
        .and_then(Value::as_array)
        .and_then(|ids| ids.first())
        .and_then(Value::as_str)
        .ok_or_else(|| GwasError::MalformedResponse("association record has no rsId".to_string()))
}

/// Risk allele from `strongestAllele[0]`, formatted `"<context>-<allele>"`.
///
/// The allele is the segment after the last `-`. Missing, empty or
/// undelimited values give [`NOT_AVAILABLE`].
pub fn risk_allele(record: &AssociationRecord) -> &str {
    record
        .get("strongestAllele")
        .and_then(Value::as_array)
        .and_then(|alleles| alleles.first())
        .and_then(Value::as_str)
        .and_then(|s| s.rsplit_once('-'))
        .map(|(_, allele)| allele)
        .unwrap_or(NOT_AVAILABLE)
}

/// (rsID, risk allele) for every record, in response order, duplicates kept.
pub fn flatten(response: &SearchResponse) -> Result<Vec<RsidAllelePair>> {
    response
        .docs()
        .iter()
        .map(|record| -> Result<RsidAllelePair> {
            Ok(RsidAllelePair::new(rs_id(record)?, risk_allele(record)))
        })
        .collect()
}

/// Nest records as rsID → risk allele → projection.
///
/// Records sharing an (rsID, allele) key overwrite each other; the last one
/// in the response wins.
pub fn project<S: AsRef<str>>(
    response: &SearchResponse,
    parse_type: &ParseType,
    custom_attributes: &[S],
) -> Result<ParsedSnpMap> {
    let mut snps: ParsedSnpMap = IndexMap::new();

    for record in response.docs() {
        let id = rs_id(record)?;
        let allele = risk_allele(record);
        let alleles = snps.entry(id.to_string()).or_default();

        match parse_type {
            ParseType::All => {
                alleles.insert(allele.to_string(), Value::Object(record.clone()));
            }
            ParseType::Custom => {
                alleles.insert(allele.to_string(), Value::Object(select(record, custom_attributes)));
            }
            ParseType::Unrecognized(_) => {}
        }
    }

    Ok(snps)
}

/// [`project`] keeping [`DEFAULT_CUSTOM_ATTRIBUTES`] for custom projections.
pub fn project_default(response: &SearchResponse, parse_type: &ParseType) -> Result<ParsedSnpMap> {
    project(response, parse_type, &DEFAULT_CUSTOM_ATTRIBUTES)
}

fn select<S: AsRef<str>>(record: &AssociationRecord, attributes: &[S]) -> Map<String, Value> {
    attributes
        .iter()
        .map(|attr| {
            let attr = attr.as_ref();
            let value = record
                .get(attr)
                .cloned()
                .unwrap_or_else(|| Value::String(NOT_AVAILABLE.to_string()));
            (attr.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn response(docs: Value) -> SearchResponse {
        serde_json::from_value(json!({ "response": { "docs": docs } })).unwrap()
    }

    #[test]
    fn test_allele_after_last_separator() {
        let resp = response(json!([
            { "rsId": ["rs123"], "strongestAllele": ["rs123-context-T"] },
            { "rsId": ["rs2497938"], "strongestAllele": ["rs2497938-T"] },
        ]));
        let pairs = flatten(&resp).unwrap();
        assert_eq!(pairs[0].as_tuple(), ("rs123", "T"));
        assert_eq!(pairs[1].as_tuple(), ("rs2497938", "T"));
    }

    #[test]
    fn test_allele_fallbacks() {
        let resp = response(json!([
            { "rsId": ["rs1"], "strongestAllele": [] },
            { "rsId": ["rs2"] },
            { "rsId": ["rs3"], "strongestAllele": ["rs3"] },
            { "rsId": ["rs4"], "strongestAllele": [null] },
        ]));
        let alleles: Vec<String> = flatten(&resp).unwrap().into_iter().map(|p| p.allele).collect();
        assert_eq!(alleles, vec!["n/a", "n/a", "n/a", "n/a"]);
    }

    #[test]
    fn test_flatten_keeps_order_and_duplicates() {
        let resp = response(json!([
            { "rsId": ["rs9"], "strongestAllele": ["rs9-G"] },
            { "rsId": ["rs1"], "strongestAllele": ["rs1-A"] },
            { "rsId": ["rs9"], "strongestAllele": ["rs9-G"] },
        ]));
        let ids: Vec<String> = flatten(&resp).unwrap().into_iter().map(|p| p.rs_id).collect();
        assert_eq!(ids, vec!["rs9", "rs1", "rs9"]);
    }

    #[test]
    fn test_missing_rsid_is_malformed() {
        let resp = response(json!([{ "rsId": [], "strongestAllele": ["x-A"] }]));
        assert!(flatten(&resp).unwrap_err().is_malformed());
        let resp = response(json!([{ "strongestAllele": ["x-A"] }]));
        assert!(project_default(&resp, &ParseType::All).unwrap_err().is_malformed());
    }

    #[test]
    fn test_custom_projection_is_total() {
        let resp = response(json!([
            { "rsId": ["rs10502861"], "strongestAllele": ["rs10502861-C"], "orPerCopyNum": 1.28, "riskFrequency": "0.775" },
            { "rsId": ["rs1160312"], "strongestAllele": ["rs1160312-A"], "riskFrequency": "0.43" },
        ]));
        let snps = project(&resp, &ParseType::Custom, &["orPerCopyNum", "riskFrequency"]).unwrap();

        assert_eq!(snps["rs10502861"]["C"], json!({ "orPerCopyNum": 1.28, "riskFrequency": "0.775" }));
        assert_eq!(snps["rs1160312"]["A"], json!({ "orPerCopyNum": "n/a", "riskFrequency": "0.43" }));
    }

    #[test]
    fn test_unknown_attribute_is_sentinel() {
        let resp = response(json!([{ "rsId": ["rs1"], "strongestAllele": ["rs1-A"] }]));
        let snps = project(&resp, &ParseType::Custom, &["noSuchField"]).unwrap();
        assert_eq!(snps["rs1"]["A"], json!({ "noSuchField": "n/a" }));
    }

    #[test]
    fn test_last_record_wins() {
        let resp = response(json!([
            { "rsId": ["rs1"], "strongestAllele": ["ctx-A"], "pValue": 1e-9 },
            { "rsId": ["rs1"], "strongestAllele": ["ctx-A"], "pValue": 3e-12 },
        ]));
        let snps = project_default(&resp, &ParseType::All).unwrap();
        assert_eq!(snps["rs1"].len(), 1);
        assert_eq!(snps["rs1"]["A"], Value::Object(resp.docs()[1].clone()));
    }

    #[test]
    fn test_alleles_nest_under_identifier() {
        let resp = response(json!([
            { "rsId": ["rs2"], "strongestAllele": ["rs2-T"] },
            { "rsId": ["rs1"], "strongestAllele": ["rs1-A"] },
            { "rsId": ["rs2"] },
        ]));
        let snps = project_default(&resp, &ParseType::All).unwrap();
        let ids: Vec<&String> = snps.keys().collect();
        assert_eq!(ids, vec!["rs2", "rs1"]);
        let alleles: Vec<&String> = snps["rs2"].keys().collect();
        assert_eq!(alleles, vec!["T", "n/a"]);
    }

    #[test]
    fn test_unrecognized_parse_type_keeps_identifiers_only() {
        let resp = response(json!([
            { "rsId": ["rs1"], "strongestAllele": ["rs1-A"] },
            { "rsId": ["rs2"], "strongestAllele": ["rs2-C"] },
        ]));
        let none: [&str; 0] = [];
        let snps = project(&resp, &"bogus".parse().unwrap(), &none).unwrap();
        assert_eq!(snps.len(), 2);
        assert!(snps.values().all(|alleles| alleles.is_empty()));
    }

    #[test]
    fn test_parse_type_names() {
        assert_eq!(ParseType::from("all"), ParseType::All);
        assert_eq!(ParseType::from("custom"), ParseType::Custom);
        assert_eq!(ParseType::from("ALL"), ParseType::Unrecognized("ALL".to_string()));
        assert_eq!(ParseType::default().to_string(), "all");
    }
}

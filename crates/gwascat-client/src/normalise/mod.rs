//! Normalisation of raw catalog responses into SNP-keyed structures.

pub mod snps;

pub use snps::{
    flatten, project, project_default, risk_allele, rs_id, ParseType,
    DEFAULT_CUSTOM_ATTRIBUTES, NOT_AVAILABLE,
};

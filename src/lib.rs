//! Pathway enrichment of differentially expressed genes
//!
//! `gsea` tests, for every pathway of a collection, whether it contains more
//! differentially expressed genes (DEGs) than expected by chance. The test
//! uses the hypergeometric distribution (sampling without replacement) and
//! the p-values are Bonferroni corrected for the number of tested pathways.
//!
//! Genes are classified by their adjusted p-value:
//!
//! - DEG: `adjusted_pvalue < threshold`
//! - non-DEG: `adjusted_pvalue > threshold`
//!
//! Genes exactly at the threshold, or with a `NaN` p-value, are neither
//! and do not contribute to any count.
//!
//! # Examples
//!
//! ```
//! use gsea::{EnrichmentConfig, GeneRecord, PathwayRecord, Pathways};
//! use gsea::stats::hypergeom::pathway_enrichment;
//!
//! let genes = vec![
//!     GeneRecord::new("TP53", 2.1, 0.001),
//!     GeneRecord::new("MDM2", 1.4, 0.01),
//!     GeneRecord::new("CDKN1A", 0.9, 0.02),
//!     GeneRecord::new("GAPDH", 0.1, 0.8),
//!     GeneRecord::new("ACTB", -0.2, 0.6),
//!     GeneRecord::new("EGFR", 0.3, 0.4),
//! ];
//!
//! let mut pathways = Pathways::default();
//! pathways.insert(PathwayRecord::new("hsa04115", "p53 signaling pathway", ["TP53", "MDM2", "CDKN1A"]));
//! pathways.insert(PathwayRecord::new("hsa00010", "Glycolysis", ["GAPDH"]));
//!
//! let enrichments = pathway_enrichment(&genes, &pathways, &EnrichmentConfig::default());
//!
//! assert_eq!(enrichments.len(), 2);
//! assert_eq!(enrichments[0].id(), "hsa04115");
//! assert_eq!(enrichments[0].observed_degs(), 3);
//! assert!(enrichments[0].pvalue() < enrichments[1].pvalue());
//! ```
#![warn(missing_docs)]
use core::fmt::Debug;
use std::num::ParseFloatError;
use thiserror::Error;

pub mod records;
pub mod stats;

pub use records::{GeneRecord, PathwayRecord, Pathways};
pub use stats::{Enrichment, EnrichmentConfig};

/// The adjusted p-value cutoff below which a gene counts as differentially expressed
pub const DEFAULT_THRESHOLD: f64 = 0.05;

/// Main Error type for this crate
#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum GseaError {
    /// The requested pathway is not part of the [`Pathways`] collection
    #[error("pathway {0} does not exist")]
    DoesNotExist(String),
    /// A numerical value of a gene record could not be parsed
    #[error("unable to parse float: {0}")]
    ParseFloatError(String),
    /// A row of a delimited file does not have the expected columns
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The DEG threshold must be a number in `(0, 1]`
    #[error("invalid threshold {0}, must be within (0, 1]")]
    InvalidThreshold(f64),
}

impl From<ParseFloatError> for GseaError {
    fn from(err: ParseFloatError) -> Self {
        GseaError::ParseFloatError(err.to_string())
    }
}

/// Shortcut for `Result<T, GseaError>`
pub type GseaResult<T> = Result<T, GseaError>;

/// Counts and sizes are kept as `u64` but most statistics are
/// calculated in `f64`. Casting is lossless up to 2^53, far beyond
/// the size of any gene universe.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn f64_from_u64(n: u64) -> f64 {
    n as f64
}

/// Widens a `usize` (collection length) into a `u64` count
pub(crate) fn u64_from_usize(n: usize) -> u64 {
    n.try_into().expect("usize must fit into u64")
}

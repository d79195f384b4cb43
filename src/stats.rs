//! Statistical analyses of DEG over-representation in pathways
//!
//! This module contains the methods to classify genes for each pathway
//! ([`contingency`]) and to calculate the enrichment of DEGs within
//! pathways ([`hypergeom`]).
//!
//! At the moment, `gsea` provides only the one-sided hypergeometric test
//! (over-representation) with Bonferroni correction.

use crate::{GseaError, GseaResult, DEFAULT_THRESHOLD};

pub mod contingency;
pub mod hypergeom;

pub use contingency::{Background, ContingencyTable};

/// Parameters of an enrichment analysis
///
/// # Examples
///
/// ```
/// use gsea::EnrichmentConfig;
///
/// let config = EnrichmentConfig::default();
/// assert!((config.threshold() - 0.05).abs() < f64::EPSILON);
///
/// let config = EnrichmentConfig::new(0.01).unwrap();
/// assert!((config.threshold() - 0.01).abs() < f64::EPSILON);
///
/// assert!(EnrichmentConfig::new(0.0).is_err());
/// assert!(EnrichmentConfig::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichmentConfig {
    threshold: f64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl EnrichmentConfig {
    /// Constructs a new `EnrichmentConfig` with the given DEG threshold
    ///
    /// # Errors
    ///
    /// [`GseaError::InvalidThreshold`] if `threshold` is not within `(0, 1]`
    pub fn new(threshold: f64) -> GseaResult<Self> {
        Self::default().with_threshold(threshold)
    }

    /// Returns a copy of the config with a different DEG threshold
    ///
    /// # Errors
    ///
    /// [`GseaError::InvalidThreshold`] if `threshold` is not within `(0, 1]`
    pub fn with_threshold(self, threshold: f64) -> GseaResult<Self> {
        if threshold > 0.0 && threshold <= 1.0 {
            Ok(Self { threshold })
        } else {
            Err(GseaError::InvalidThreshold(threshold))
        }
    }

    /// The adjusted p-value cutoff that separates DEGs from non-DEGs
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// The enrichment statistics of a single pathway
///
/// [`Enrichment`] is returned from the enrichment methods
/// [`hypergeom::pathway_enrichment`] and [`hypergeom::single_pathway_enrichment`].
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    id: String,
    description: String,
    pvalue: f64,
    adjusted_pvalue: f64,
    enrichment_score: f64,
    observed_degs: u64,
    expected_degs: f64,
    avg_log_fold_change: f64,
}

impl Enrichment {
    /// Returns the ID of the pathway
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the description of the pathway
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the p-value of the enrichment
    ///
    /// The p-value indicates the probability to observe at least
    /// as many DEGs in the pathway by chance
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    /// Returns the Bonferroni corrected p-value
    pub fn adjusted_pvalue(&self) -> f64 {
        self.adjusted_pvalue
    }

    /// Returns the standardized residual of observed vs expected DEGs
    pub fn enrichment_score(&self) -> f64 {
        self.enrichment_score
    }

    /// Returns the number of DEGs in the pathway
    pub fn observed_degs(&self) -> u64 {
        self.observed_degs
    }

    /// Returns the number of DEGs expected in the pathway by chance
    pub fn expected_degs(&self) -> f64 {
        self.expected_degs
    }

    /// Returns the mean log2 fold change of all DEGs in the pathway
    ///
    /// `0.0` if the pathway does not contain any DEGs
    pub fn avg_log_fold_change(&self) -> f64 {
        self.avg_log_fold_change
    }
}

/// Builds an [`Enrichment`] field by field
///
/// Only used internally by the enrichment methods, since every
/// statistic depends on the others.
#[derive(Debug, Default)]
pub(crate) struct EnrichmentBuilder {
    id: String,
    description: String,
    pvalue: f64,
    adjusted_pvalue: f64,
    enrichment_score: f64,
    observed_degs: u64,
    expected_degs: f64,
    avg_log_fold_change: f64,
}

impl EnrichmentBuilder {
    pub fn new(id: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    pub fn pvalue(mut self, pvalue: f64, adjusted_pvalue: f64) -> Self {
        self.pvalue = pvalue;
        self.adjusted_pvalue = adjusted_pvalue;
        self
    }

    pub fn degs(mut self, observed: u64, expected: f64) -> Self {
        self.observed_degs = observed;
        self.expected_degs = expected;
        self
    }

    pub fn enrichment_score(mut self, score: f64) -> Self {
        self.enrichment_score = score;
        self
    }

    pub fn avg_log_fold_change(mut self, lfc: f64) -> Self {
        self.avg_log_fold_change = lfc;
        self
    }

    pub fn build(self) -> Enrichment {
        Enrichment {
            id: self.id,
            description: self.description,
            pvalue: self.pvalue,
            adjusted_pvalue: self.adjusted_pvalue,
            enrichment_score: self.enrichment_score,
            observed_degs: self.observed_degs,
            expected_degs: self.expected_degs,
            avg_log_fold_change: self.avg_log_fold_change,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn threshold_bounds() {
        assert!(EnrichmentConfig::new(1.0).is_ok());
        assert!(EnrichmentConfig::new(f64::MIN_POSITIVE).is_ok());
        assert_eq!(
            EnrichmentConfig::new(-0.05),
            Err(GseaError::InvalidThreshold(-0.05))
        );
        assert!(EnrichmentConfig::new(f64::NAN).is_err());
        assert!(EnrichmentConfig::new(1.000_001).is_err());
    }

    #[test]
    fn builder() {
        let enrichment = EnrichmentBuilder::new("P1", "Foo")
            .pvalue(0.01, 0.1)
            .degs(5, 2.5)
            .enrichment_score(1.58)
            .avg_log_fold_change(-0.5)
            .build();

        assert_eq!(enrichment.id(), "P1");
        assert_eq!(enrichment.description(), "Foo");
        assert!((enrichment.pvalue() - 0.01).abs() < f64::EPSILON);
        assert!((enrichment.adjusted_pvalue() - 0.1).abs() < f64::EPSILON);
        assert_eq!(enrichment.observed_degs(), 5);
        assert!((enrichment.expected_degs() - 2.5).abs() < f64::EPSILON);
        assert!((enrichment.enrichment_score() - 1.58).abs() < f64::EPSILON);
        assert!((enrichment.avg_log_fold_change() + 0.5).abs() < f64::EPSILON);
    }
}

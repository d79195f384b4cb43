//! Calculate the enrichment of DEGs in pathways and the probability
//! of enrichment within the hypergeometric distribution.
//!
//! The null model draws `genes_in_pathway` genes without replacement from
//! a population of `total_genes` genes, of which `total_degs` are DEGs.
//! The p-value is the probability to draw at least as many DEGs as
//! observed in the pathway (over-representation only).
//!
//! # Examples
//!
//! ```
//! use gsea::{EnrichmentConfig, GeneRecord, PathwayRecord, Pathways};
//! use gsea::stats::hypergeom::pathway_enrichment;
//!
//! let genes: Vec<GeneRecord> = (0..100)
//!     .map(|i| {
//!         let padj = if i < 10 { 0.001 } else { 0.5 };
//!         GeneRecord::new(&format!("G{i}"), 1.0, padj)
//!     })
//!     .collect();
//!
//! let mut pathways = Pathways::default();
//! pathways.insert(PathwayRecord::new("P1", "mostly DEGs", ["G0", "G1", "G2", "G3", "G50"]));
//! pathways.insert(PathwayRecord::new("P2", "no DEGs", ["G60", "G61", "G62"]));
//!
//! let mut enrichments = pathway_enrichment(&genes, &pathways, &EnrichmentConfig::default());
//!
//! // the results are not sorted by default
//! enrichments.sort_by(|a, b| {
//!         a.pvalue().partial_cmp(&b.pvalue()).unwrap()
//! });
//!
//! for pathway in &enrichments {
//!     println!("{}\t{}\t({})", pathway.id(), pathway.pvalue(), pathway.enrichment_score());
//! }
//! assert_eq!(enrichments[0].id(), "P1");
//! assert!(enrichments[0].pvalue() < 0.01);
//! assert!((enrichments[1].pvalue() - 1.0).abs() < f64::EPSILON);
//! ```

mod distribution;
mod pathway;

pub use distribution::{
    adjust_pvalue, binomial_coefficient, enrichment_score, expected_degs, hypergeometric_pmf,
    pvalue,
};
pub use pathway::{pathway_enrichment, single_pathway_enrichment};

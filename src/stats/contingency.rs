//! Classification of genes into the 2×2 contingency table of a pathway
//!
//! Every gene is either a DEG (`adjusted_pvalue < threshold`) or a
//! non-DEG (`adjusted_pvalue > threshold`) and is either in the pathway
//! or not:
//!
//! ```text
//!                 | DEG | non-DEG | Sum
//! ----------------+-----+---------+-----
//! in pathway      |  a  |    b    | a+b
//! not in pathway  |  c  |    d    | c+d
//! ----------------+-----+---------+-----
//! Sum             | a+c |   b+d   |  N
//! ```
//!
//! Genes exactly at the threshold or with a `NaN` p-value are in none of the cells.

use crate::records::GeneSet;
use crate::{u64_from_usize, EnrichmentConfig, GeneRecord, GseaResult, PathwayRecord, Pathways};

/// Number of genes in the pathway with `adjusted_pvalue < threshold`
pub fn degs_in_pathway(genes: &[GeneRecord], pathway_genes: &GeneSet, threshold: f64) -> u64 {
    count(genes, |gene| {
        gene.is_deg(threshold) && pathway_genes.contains(gene.symbol())
    })
}

/// Number of genes in the pathway with `adjusted_pvalue > threshold`
pub fn non_degs_in_pathway(
    genes: &[GeneRecord],
    pathway_genes: &GeneSet,
    threshold: f64,
) -> u64 {
    count(genes, |gene| {
        gene.is_non_deg(threshold) && pathway_genes.contains(gene.symbol())
    })
}

/// Number of all genes with `adjusted_pvalue < threshold`
pub fn total_degs(genes: &[GeneRecord], threshold: f64) -> u64 {
    count(genes, |gene| gene.is_deg(threshold))
}

/// Number of all genes with `adjusted_pvalue > threshold`
pub fn total_non_degs(genes: &[GeneRecord], threshold: f64) -> u64 {
    count(genes, |gene| gene.is_non_deg(threshold))
}

fn count<F: Fn(&GeneRecord) -> bool>(genes: &[GeneRecord], predicate: F) -> u64 {
    u64_from_usize(genes.iter().filter(|gene| predicate(*gene)).count())
}

/// The DEG and non-DEG totals of the whole gene universe
///
/// The totals are the same for every pathway, so they are
/// calculated only once per analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    total_degs: u64,
    total_non_degs: u64,
    threshold: f64,
}

impl Background {
    /// Counts the DEGs and non-DEGs of `genes`
    pub fn new(genes: &[GeneRecord], threshold: f64) -> Self {
        Self {
            total_degs: total_degs(genes, threshold),
            total_non_degs: total_non_degs(genes, threshold),
            threshold,
        }
    }

    /// Total number of DEGs
    pub fn total_degs(&self) -> u64 {
        self.total_degs
    }

    /// Total number of non-DEGs
    pub fn total_non_degs(&self) -> u64 {
        self.total_non_degs
    }

    /// Total number of classified genes (DEGs and non-DEGs)
    pub fn total_genes(&self) -> u64 {
        self.total_degs + self.total_non_degs
    }

    /// The threshold that was used to classify the genes
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Builds the [`ContingencyTable`] of one pathway
    ///
    /// `genes` must be the same genes that the `Background` was created from.
    pub fn table(&self, genes: &[GeneRecord], pathway: &PathwayRecord) -> ContingencyTable {
        self.table_from_set(genes, &pathway.gene_set())
    }

    pub(crate) fn table_from_set(
        &self,
        genes: &[GeneRecord],
        pathway_genes: &GeneSet,
    ) -> ContingencyTable {
        ContingencyTable {
            degs_in_pathway: degs_in_pathway(genes, pathway_genes, self.threshold),
            non_degs_in_pathway: non_degs_in_pathway(genes, pathway_genes, self.threshold),
            total_degs: self.total_degs,
            total_non_degs: self.total_non_degs,
        }
    }
}

/// The 2×2 contingency table of DEGs and non-DEGs in and outside of a pathway
///
/// # Examples
///
/// ```
/// use gsea::{EnrichmentConfig, GeneRecord, PathwayRecord, Pathways};
/// use gsea::stats::ContingencyTable;
///
/// let genes = vec![
///     GeneRecord::new("A", 1.0, 0.01),
///     GeneRecord::new("B", 1.0, 0.02),
///     GeneRecord::new("C", 1.0, 0.3),
///     GeneRecord::new("D", 1.0, 0.5),
///     GeneRecord::new("E", 1.0, 0.04),
/// ];
/// let pathways: Pathways = [PathwayRecord::new("P1", "Foo", ["A", "C", "A"])]
///     .into_iter()
///     .collect();
///
/// let table = ContingencyTable::for_pathway(&genes, &pathways, "P1", &EnrichmentConfig::default()).unwrap();
///
/// assert_eq!(table.degs_in_pathway(), 1);
/// assert_eq!(table.non_degs_in_pathway(), 1);
/// assert_eq!(table.genes_in_pathway(), 2);
/// assert_eq!(table.degs_not_in_pathway(), 2);
/// assert_eq!(table.non_degs_not_in_pathway(), 1);
/// assert_eq!(table.genes_not_in_pathway(), 3);
/// assert_eq!(table.total_degs(), 3);
/// assert_eq!(table.total_non_degs(), 2);
/// assert_eq!(table.total_genes(), 5);
///
/// assert!(ContingencyTable::for_pathway(&genes, &pathways, "P2", &EnrichmentConfig::default()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContingencyTable {
    degs_in_pathway: u64,
    non_degs_in_pathway: u64,
    total_degs: u64,
    total_non_degs: u64,
}

impl ContingencyTable {
    /// Builds the `ContingencyTable` for the pathway with the ID `pathway_id`
    ///
    /// This method classifies all genes for a single table. Use
    /// [`Background::table`] when building tables for many pathways.
    ///
    /// # Errors
    ///
    /// If the pathway is not present, returns [`GseaError::DoesNotExist`](`crate::GseaError::DoesNotExist`)
    pub fn for_pathway(
        genes: &[GeneRecord],
        pathways: &Pathways,
        pathway_id: &str,
        config: &EnrichmentConfig,
    ) -> GseaResult<Self> {
        let pathway = pathways.pathway(pathway_id)?;
        Ok(Background::new(genes, config.threshold()).table(genes, pathway))
    }

    /// DEGs in the pathway
    pub fn degs_in_pathway(&self) -> u64 {
        self.degs_in_pathway
    }

    /// Non-DEGs in the pathway
    pub fn non_degs_in_pathway(&self) -> u64 {
        self.non_degs_in_pathway
    }

    /// All classified genes in the pathway
    pub fn genes_in_pathway(&self) -> u64 {
        self.degs_in_pathway + self.non_degs_in_pathway
    }

    /// DEGs outside of the pathway
    pub fn degs_not_in_pathway(&self) -> u64 {
        self.total_degs - self.degs_in_pathway
    }

    /// Non-DEGs outside of the pathway
    pub fn non_degs_not_in_pathway(&self) -> u64 {
        self.total_non_degs - self.non_degs_in_pathway
    }

    /// All classified genes outside of the pathway
    pub fn genes_not_in_pathway(&self) -> u64 {
        self.total_genes() - self.genes_in_pathway()
    }

    /// All DEGs
    pub fn total_degs(&self) -> u64 {
        self.total_degs
    }

    /// All non-DEGs
    pub fn total_non_degs(&self) -> u64 {
        self.total_non_degs
    }

    /// All classified genes
    pub fn total_genes(&self) -> u64 {
        self.total_degs + self.total_non_degs
    }
}

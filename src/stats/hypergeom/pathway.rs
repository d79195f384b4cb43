use tracing::{debug, trace};

use crate::records::GeneSet;
use crate::stats::hypergeom::{adjust_pvalue, enrichment_score, expected_degs, pvalue};
use crate::stats::{Background, EnrichmentBuilder};
use crate::{
    f64_from_u64, Enrichment, EnrichmentConfig, GeneRecord, GseaResult, PathwayRecord, Pathways,
};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Calculates the hypergeometric enrichment of DEGs in every pathway
///
/// Returns one [`Enrichment`] per pathway, in the same order as
/// `pathways`. The p-values are Bonferroni corrected for the number
/// of pathways in `pathways`.
///
/// ```mermaid
/// graph LR
///     G[GeneRecords] --> B[Background]
///     G --> T[ContingencyTable]
///     P[PathwayRecord] --> T
///     B --> T
///     T --> H[p-value]
///     T --> E[expected DEGs]
///     H --> A[adjusted p-value]
///     E --> S[enrichment score]
///     H --> R[Enrichment]
///     A --> R
///     S --> R
/// ```
///
/// With the `parallel` feature, the pathways are processed in parallel.
///
/// # Examples
///
/// ```
/// use gsea::{EnrichmentConfig, GeneRecord, PathwayRecord, Pathways};
/// use gsea::stats::hypergeom::pathway_enrichment;
///
/// let genes = vec![
///     GeneRecord::new("A", 1.0, 0.01),
///     GeneRecord::new("B", 1.0, 0.01),
///     GeneRecord::new("C", 1.0, 0.2),
///     GeneRecord::new("D", 1.0, 0.2),
/// ];
/// let mut pathways = Pathways::default();
/// pathways.insert(PathwayRecord::new("P1", "Foo", ["A", "B"]));
/// pathways.insert(PathwayRecord::new("P2", "Bar", ["C"]));
///
/// let enrichments = pathway_enrichment(&genes, &pathways, &EnrichmentConfig::default());
///
/// // 1 / C(4, 2)
/// assert!((enrichments[0].pvalue() - 1.0 / 6.0).abs() < 1e-12);
/// assert!((enrichments[0].adjusted_pvalue() - 2.0 / 6.0).abs() < 1e-12);
/// assert_eq!(enrichments[1].observed_degs(), 0);
/// assert!((enrichments[1].pvalue() - 1.0).abs() < f64::EPSILON);
/// ```
pub fn pathway_enrichment(
    genes: &[GeneRecord],
    pathways: &Pathways,
    config: &EnrichmentConfig,
) -> Vec<Enrichment> {
    let background = Background::new(genes, config.threshold());
    let num_pathways = pathways.len();
    debug!(
        "Enrichment of {} pathways. DEGs: {}, non-DEGs: {}, threshold: {}",
        num_pathways,
        background.total_degs(),
        background.total_non_degs(),
        background.threshold()
    );

    #[cfg(feature = "parallel")]
    let res = {
        use rayon::prelude::*;
        pathways
            .as_slice()
            .par_iter()
            .map(|pathway| enrichment(genes, pathway, &background, num_pathways))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let res = pathways
        .iter()
        .map(|pathway| enrichment(genes, pathway, &background, num_pathways))
        .collect();

    res
}

/// Calculates the hypergeometric enrichment of DEGs in a single pathway
///
/// The p-value is still Bonferroni corrected for all pathways in `pathways`.
///
/// # Errors
///
/// If the pathway is not present, returns [`GseaError::DoesNotExist`](`crate::GseaError::DoesNotExist`)
///
/// # Examples
///
/// ```
/// use gsea::{EnrichmentConfig, GeneRecord, PathwayRecord, Pathways};
/// use gsea::stats::hypergeom::single_pathway_enrichment;
///
/// let genes = vec![
///     GeneRecord::new("A", 2.0, 0.01),
///     GeneRecord::new("B", 1.0, 0.01),
///     GeneRecord::new("C", 1.0, 0.2),
/// ];
/// let pathways: Pathways = [
///     PathwayRecord::new("P1", "Foo", ["A", "B"]),
///     PathwayRecord::new("P2", "Bar", ["C"]),
/// ]
/// .into_iter()
/// .collect();
///
/// let config = EnrichmentConfig::default();
/// let enrichment = single_pathway_enrichment(&genes, &pathways, "P1", &config).unwrap();
/// assert_eq!(enrichment.observed_degs(), 2);
/// assert!((enrichment.avg_log_fold_change() - 1.5).abs() < f64::EPSILON);
///
/// assert!(single_pathway_enrichment(&genes, &pathways, "P3", &config).is_err());
/// ```
pub fn single_pathway_enrichment(
    genes: &[GeneRecord],
    pathways: &Pathways,
    pathway_id: &str,
    config: &EnrichmentConfig,
) -> GseaResult<Enrichment> {
    let pathway = pathways.pathway(pathway_id)?;
    let background = Background::new(genes, config.threshold());
    Ok(enrichment(genes, pathway, &background, pathways.len()))
}

fn enrichment(
    genes: &[GeneRecord],
    pathway: &PathwayRecord,
    background: &Background,
    num_pathways: usize,
) -> Enrichment {
    let pathway_genes = pathway.gene_set();
    let table = background.table_from_set(genes, &pathway_genes);
    let degs_in_pathway = table.degs_in_pathway();
    let genes_in_pathway = table.genes_in_pathway();

    let pvalue = if degs_in_pathway > 0 {
        pvalue(
            degs_in_pathway,
            table.total_degs(),
            genes_in_pathway,
            table.total_genes(),
        )
    } else {
        trace!("No DEGs in {}", pathway.id());
        1.0
    };
    let adjusted_pvalue = adjust_pvalue(pvalue, num_pathways);

    // an empty gene universe cannot have any expected DEGs
    let expected = if table.total_genes() == 0 {
        0.0
    } else {
        expected_degs(table.total_degs(), genes_in_pathway, table.total_genes())
    };

    debug!(
        "Pathway:{}\tPopulation: {}, Successes: {}, Draws: {}, Observed: {}, Expected: {:.2}, p-value: {:e}",
        pathway.id(),
        table.total_genes(),
        table.total_degs(),
        genes_in_pathway,
        degs_in_pathway,
        expected,
        pvalue
    );

    EnrichmentBuilder::new(pathway.id(), pathway.description())
        .pvalue(pvalue, adjusted_pvalue)
        .degs(degs_in_pathway, expected)
        .enrichment_score(enrichment_score(degs_in_pathway, expected))
        .avg_log_fold_change(avg_log_fold_change(
            genes,
            &pathway_genes,
            background.threshold(),
        ))
        .build()
}

/// The mean log2 fold change of all DEGs in the pathway, `0.0` if there are none
fn avg_log_fold_change(genes: &[GeneRecord], pathway_genes: &GeneSet, threshold: f64) -> f64 {
    let (sum, count) = genes
        .iter()
        .filter(|gene| gene.is_deg(threshold) && pathway_genes.contains(gene.symbol()))
        .fold((0.0, 0u64), |(sum, count), gene| {
            (sum + gene.log_fold_change(), count + 1)
        });
    if count == 0 {
        0.0
    } else {
        sum / f64_from_u64(count)
    }
}

use std::{env::Args, fs, process};

use simple_logger::SimpleLogger;

use gsea::stats::hypergeom::pathway_enrichment;
use gsea::stats::ContingencyTable;
use gsea::{EnrichmentConfig, GeneRecord, GseaResult, PathwayRecord, Pathways};

/// Parses a tab-separated DEG file: `symbol  log2FC  padj`
///
/// Lines that start with `#` are skipped
fn read_genes(filename: &str) -> GseaResult<Vec<GeneRecord>> {
    let content = fs::read_to_string(filename).expect("unable to read gene file");
    content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(GeneRecord::from_row)
        .collect()
}

/// Parses a tab-separated pathway file: `pathway_id  description  gene`
///
/// Each row links one gene to a pathway
fn read_pathways(filename: &str) -> GseaResult<Pathways> {
    let content = fs::read_to_string(filename).expect("unable to read pathway file");
    content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathwayRecord::from_row)
        .collect()
}

/// Prints the 2×2 contingency table of a single pathway
fn print_table(genes: &[GeneRecord], pathways: &Pathways, id: &str, config: &EnrichmentConfig) {
    let table = match ContingencyTable::for_pathway(genes, pathways, id, config) {
        Ok(table) => table,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    println!("\n### {id} ###");
    println!("   |  D  |  D* | Sum");
    println!("--------------------");
    println!(
        " C |{:5}|{:5}|{:5}",
        table.degs_in_pathway(),
        table.non_degs_in_pathway(),
        table.genes_in_pathway()
    );
    println!(
        " C*|{:5}|{:5}|{:5}",
        table.degs_not_in_pathway(),
        table.non_degs_not_in_pathway(),
        table.genes_not_in_pathway()
    );
    println!(
        "sum|{:5}|{:5}|{:5}",
        table.total_degs(),
        table.total_non_degs(),
        table.total_genes()
    );
    println!("\nC: in pathway, C*: not in pathway");
    println!("D: DEG (padj < {}), D*: non DEG", config.threshold());
}

fn next_arg(args: &mut Args) -> String {
    args.next().unwrap_or_else(|| {
        println!("Show enriched pathways\n\n");
        println!("Usage\nenrichment <DEG FILE> <PATHWAY FILE> <THRESHOLD> <N RESULTS> <PATHWAY ID>");
        println!("\nenrichment degs.tsv pathways.tsv 0.05 20 hsa04115\n");
        process::exit(1)
    })
}

fn main() {
    SimpleLogger::new().env().init().unwrap();

    let mut args = std::env::args();
    args.next();
    let genes = match read_genes(&next_arg(&mut args)) {
        Ok(genes) => genes,
        Err(err) => {
            println!("Invalid gene file: {err}");
            process::exit(1)
        }
    };
    let pathways = match read_pathways(&next_arg(&mut args)) {
        Ok(pathways) => pathways,
        Err(err) => {
            println!("Invalid pathway file: {err}");
            process::exit(1)
        }
    };

    let config = args
        .next()
        .map(|arg| arg.parse::<f64>().expect("threshold must be a number"))
        .map_or_else(EnrichmentConfig::default, |threshold| {
            EnrichmentConfig::new(threshold).expect("invalid threshold")
        });

    let output_len = args
        .next()
        .map(|arg| arg.parse::<usize>().unwrap_or(20))
        .unwrap_or(20);

    let mut enrichments = pathway_enrichment(&genes, &pathways, &config);

    // the results are not sorted by default
    enrichments.sort_by(|a, b| {
        a.adjusted_pvalue()
            .partial_cmp(&b.adjusted_pvalue())
            .expect("nan must not appear as p-value")
    });

    println!("### PATHWAYS ###");
    for pathway in &enrichments[0..std::cmp::min(output_len, enrichments.len())] {
        println!(
            "{}\t{}\t{:e}\t{:e}\t{:.3}\t{}/{:.2}\t{:.3}",
            pathway.id(),
            pathway.description(),
            pathway.pvalue(),
            pathway.adjusted_pvalue(),
            pathway.enrichment_score(),
            pathway.observed_degs(),
            pathway.expected_degs(),
            pathway.avg_log_fold_change()
        );
    }

    if let Some(id) = args.next() {
        print_table(&genes, &pathways, &id, &config);
    }

    println!(
        "\nPathways: {}\nTotal genes: {}",
        pathways.len(),
        genes.len()
    );
}

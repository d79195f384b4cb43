use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gsea::stats::hypergeom::pathway_enrichment;
use gsea::{EnrichmentConfig, GeneRecord, PathwayRecord, Pathways};

/// A gene universe of `n` genes, every 20th gene is a DEG
fn genes(n: usize) -> Vec<GeneRecord> {
    (0..n)
        .map(|i| {
            let padj = if i % 20 == 0 { 0.001 } else { 0.4 };
            GeneRecord::new(&format!("GENE{i}"), 0.5, padj)
        })
        .collect()
}

/// `n` pathways with 20 to 219 genes each, spread over the gene universe
fn pathways(n: usize, universe: usize) -> Pathways {
    (0..n)
        .map(|i| {
            let size = 20 + (i * 37) % 200;
            let start = (i * 131) % universe;
            PathwayRecord::new(
                &format!("PATHWAY{i}"),
                "benchmark pathway",
                (start..start + size).map(|g| format!("GENE{}", g % universe)),
            )
        })
        .collect()
}

fn enrichment_benchmark(c: &mut Criterion) {
    let genes = genes(20_000);
    let pathways = pathways(300, 20_000);
    let config = EnrichmentConfig::default();

    c.bench_function("enrichment 300 pathways", |b| {
        b.iter(|| pathway_enrichment(black_box(&genes), black_box(&pathways), &config))
    });
}

criterion_group!(enrichment, enrichment_benchmark);
criterion_main!(enrichment);

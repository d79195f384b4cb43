//! The hypergeometric distribution and the statistics derived from it
//!
//! All functions are pure and never fail. Impossible or degenerate
//! configurations produce defined values instead:
//!
//! | Condition | Result |
//! | --- | --- |
//! | `k > n` in [`binomial_coefficient`] | `0.0` |
//! | impossible draw in [`hypergeometric_pmf`] | `0.0` |
//! | no genes in pathway or no DEGs in [`pvalue`] | `1.0` |
//! | `NaN` during p-value summation | `1.0` |
//! | no expected DEGs in [`enrichment_score`] | `0.0` |
//! | `NaN` expected DEGs in [`enrichment_score`] | `0.0` |
//!
//! [`expected_degs`] is `NaN` for an empty gene universe, [`enrichment_score`]
//! turns that into a score of `0.0` instead of propagating `NaN`.

use statrs::function::factorial::ln_binomial;
use tracing::warn;

use crate::{f64_from_u64, u64_from_usize};

/// Returns the binomial coefficient `n choose k`
///
/// The coefficient is calculated as a running product of
/// `(n - i + 1) / i`, so it does not overflow for large `n` as
/// long as the result itself fits into `f64`.
///
/// # Examples
///
/// ```
/// use gsea::stats::hypergeom::binomial_coefficient;
///
/// assert!((binomial_coefficient(10, 5) - 252.0).abs() < f64::EPSILON);
/// assert!((binomial_coefficient(10, 0) - 1.0).abs() < f64::EPSILON);
/// assert!(binomial_coefficient(5, 6).abs() < f64::EPSILON);
/// ```
pub fn binomial_coefficient(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 || k == n {
        return 1.0;
    }
    // n choose k == n choose (n - k)
    let k = k.min(n - k);
    (1..=k).fold(1.0, |coefficient, i| {
        coefficient * f64_from_u64(n - i + 1) / f64_from_u64(i)
    })
}

/// `ln(n choose k)`, `-inf` if `k > n`
fn ln_choose(n: u64, k: u64) -> f64 {
    if k > n {
        f64::NEG_INFINITY
    } else {
        ln_binomial(n, k)
    }
}

/// Returns the probability to draw exactly `degs_in_pathway` DEGs
///
/// ```text
/// C(total_degs, i) * C(total_genes - total_degs, genes_in_pathway - i) / C(total_genes, genes_in_pathway)
/// ```
///
/// The coefficients are combined in log space, so gene universes with
/// tens of thousands of genes do not overflow.
///
/// Returns `0.0` if the configuration is impossible, e.g. more DEGs than
/// genes or more DEGs in the pathway than genes in the pathway.
pub fn hypergeometric_pmf(
    degs_in_pathway: u64,
    genes_in_pathway: u64,
    total_degs: u64,
    total_genes: u64,
) -> f64 {
    if total_degs > total_genes
        || degs_in_pathway > genes_in_pathway
        || genes_in_pathway > total_genes
    {
        return 0.0;
    }
    (ln_choose(total_degs, degs_in_pathway)
        + ln_choose(total_genes - total_degs, genes_in_pathway - degs_in_pathway)
        - ln_choose(total_genes, genes_in_pathway))
    .exp()
}

/// Returns the probability to observe at least `degs_in_pathway` DEGs in
/// the pathway by chance
///
/// Calculated as the sum of [`hypergeometric_pmf`] from `degs_in_pathway`
/// to `genes_in_pathway`.
///
/// # Examples
///
/// ```
/// use gsea::stats::hypergeom::pvalue;
///
/// // 8 or more DEGs out of 13 genes, with 25 DEGs in 50 genes
/// assert!((pvalue(8, 25, 13, 50) - 0.260_097_374_777_385_4).abs() < 1e-12);
///
/// // cannot be enriched
/// assert!((pvalue(5, 0, 50, 1000) - 1.0).abs() < f64::EPSILON);
/// assert!((pvalue(5, 200, 0, 1000) - 1.0).abs() < f64::EPSILON);
/// ```
pub fn pvalue(
    degs_in_pathway: u64,
    total_degs: u64,
    genes_in_pathway: u64,
    total_genes: u64,
) -> f64 {
    if genes_in_pathway == 0 || total_degs == 0 {
        return 1.0;
    }
    // the probability of drawing more DEGs than exist is 0
    let max_degs = genes_in_pathway.min(total_degs);
    let pvalue: f64 = (degs_in_pathway..=max_degs)
        .map(|i| hypergeometric_pmf(i, genes_in_pathway, total_degs, total_genes))
        .sum();

    if pvalue.is_nan() {
        warn!(
            "p-value is NaN for {} DEGs in {} genes (total: {} DEGs, {} genes)",
            degs_in_pathway, genes_in_pathway, total_degs, total_genes
        );
        1.0
    } else {
        pvalue.min(1.0)
    }
}

/// Returns the number of DEGs expected in the pathway under the null hypothesis
///
/// ```text
/// genes_in_pathway * (total_degs / total_genes)
/// ```
///
/// Returns `NaN` if `total_genes` is 0.
pub fn expected_degs(total_degs: u64, genes_in_pathway: u64, total_genes: u64) -> f64 {
    f64_from_u64(genes_in_pathway) * (f64_from_u64(total_degs) / f64_from_u64(total_genes))
}

/// Returns the standardized residual of the observed DEGs
///
/// ```text
/// (observed - expected) / sqrt(expected)
/// ```
///
/// Returns `0.0` if no DEGs are expected or if `expected_degs` is `NaN`.
///
/// # Examples
///
/// ```
/// use gsea::stats::hypergeom::enrichment_score;
///
/// assert!((enrichment_score(50, 40.0) - 1.581_138_83).abs() < 1e-8);
/// assert!(enrichment_score(50, 0.0).abs() < f64::EPSILON);
/// assert!(enrichment_score(50, f64::NAN).abs() < f64::EPSILON);
/// ```
pub fn enrichment_score(observed_degs: u64, expected_degs: f64) -> f64 {
    if expected_degs > 0.0 {
        (f64_from_u64(observed_degs) - expected_degs) / expected_degs.sqrt()
    } else {
        0.0
    }
}

/// Returns the Bonferroni corrected p-value, capped at `1.0`
///
/// `num_pathways` is the number of pathways tested in the analysis.
pub fn adjust_pvalue(pvalue: f64, num_pathways: usize) -> f64 {
    (pvalue * f64_from_u64(u64_from_usize(num_pathways))).min(1.0)
}

#[cfg(test)]
mod test {
    use super::*;
    use statrs::distribution::{Discrete, Hypergeometric};

    #[test]
    fn binomial() {
        assert!((binomial_coefficient(10, 5) - 252.0).abs() < f64::EPSILON);
        assert!((binomial_coefficient(10, 0) - 1.0).abs() < f64::EPSILON);
        assert!((binomial_coefficient(10, 10) - 1.0).abs() < f64::EPSILON);
        assert!((binomial_coefficient(0, 0) - 1.0).abs() < f64::EPSILON);
        assert!(binomial_coefficient(5, 6).abs() < f64::EPSILON);
        assert!(binomial_coefficient(0, 1).abs() < f64::EPSILON);
        assert!((binomial_coefficient(52, 5) - 2_598_960.0).abs() < f64::EPSILON);
    }

    #[test]
    fn binomial_large_n() {
        let n = 100_000;
        assert!((binomial_coefficient(n, 1) - 100_000.0).abs() < f64::EPSILON);
        assert!((binomial_coefficient(n, n - 1) - 100_000.0).abs() < f64::EPSILON);
        let expected = 4_999_950_000.0;
        assert!((binomial_coefficient(n, 2) - expected).abs() / expected < 1e-12);

        let c = binomial_coefficient(n, 20);
        assert!(c.is_finite());
        assert!((c.ln() - ln_binomial(n, 20)).abs() < 1e-6);
    }

    #[test]
    fn pmf_matches_binomial_coefficients() {
        let direct = binomial_coefficient(100, 3) * binomial_coefficient(100, 17)
            / binomial_coefficient(200, 20);
        let pmf = hypergeometric_pmf(3, 20, 100, 200);
        assert!((pmf - direct).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&pmf));
    }

    #[test]
    fn pmf_impossible() {
        assert!(hypergeometric_pmf(0, 20, 100, 0).abs() < f64::EPSILON);
        assert!(hypergeometric_pmf(21, 20, 100, 200).abs() < f64::EPSILON);
        assert!(hypergeometric_pmf(5, 20, 4, 200).abs() < f64::EPSILON);
        assert!(hypergeometric_pmf(1, 300, 100, 200).abs() < f64::EPSILON);
        // at least 5 of 10 draws are DEGs if only 5 of 15 genes are non-DEGs
        assert!(hypergeometric_pmf(4, 10, 10, 15).abs() < f64::EPSILON);
    }

    #[test]
    fn pmf_sums_to_one() {
        let sum: f64 = (0..=50)
            .map(|i| hypergeometric_pmf(i, 50, 200, 1000))
            .sum();
        assert!((sum - 1.0).abs() < 1e-10);
    }

    #[test]
    fn pvalue_degenerate() {
        assert!((pvalue(0, 200, 50, 1000) - 1.0).abs() < 1e-10);
        assert!((pvalue(5, 0, 50, 1000) - 1.0).abs() < f64::EPSILON);
        assert!((pvalue(5, 200, 0, 1000) - 1.0).abs() < f64::EPSILON);
        assert!((pvalue(5, 0, 0, 1000) - 1.0).abs() < f64::EPSILON);
        assert!((pvalue(0, 0, 0, 0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pvalue_is_sum_of_pmf() {
        let (degs_in_pathway, total_degs, genes_in_pathway, total_genes) = (3, 100, 20, 200);
        let mut cumulative = 0.0;
        for i in degs_in_pathway..=genes_in_pathway {
            cumulative += hypergeometric_pmf(i, genes_in_pathway, total_degs, total_genes);
        }
        let p = pvalue(degs_in_pathway, total_degs, genes_in_pathway, total_genes);
        assert!((cumulative - p).abs() < 1e-12);
    }

    #[test]
    fn pmf_matches_statrs() {
        let hyper = Hypergeometric::new(50, 25, 13).unwrap();
        for observed in 0..=13 {
            let pmf = hypergeometric_pmf(observed, 13, 25, 50);
            assert!((pmf - hyper.pmf(observed)).abs() < 1e-9);
        }
    }

    #[test]
    fn pvalue_known_values() {
        // (observed, total DEGs, genes in pathway, total genes, p-value)
        let cases = [
            (1, 25, 13, 50, 0.999_985_345_509_778),
            (4, 25, 13, 50, 0.974_664_479_904_753_2),
            (8, 25, 13, 50, 0.260_097_374_777_381_04),
            (13, 25, 13, 50, 1.465_449_022_200_690_6e-5),
            (12, 200, 50, 1000, 0.285_460_144_511_587_47),
            (30, 1_500, 120, 18_000, 3.328_869_312_850_873e-8),
            (3, 10, 5, 20_000, 8.996_624_307_005_104e-10),
        ];
        for (observed, total_degs, genes_in_pathway, total_genes, expected) in cases {
            let p = pvalue(observed, total_degs, genes_in_pathway, total_genes);
            assert!(
                ((p - expected) / expected).abs() < 1e-8,
                "{observed}/{genes_in_pathway} of {total_degs}/{total_genes}: {p} vs {expected}"
            );
        }
    }

    #[test]
    fn pvalue_bounded() {
        for total_genes in [1, 2, 10, 57] {
            for total_degs in 0..=total_genes {
                for genes_in_pathway in 0..=total_genes {
                    for degs_in_pathway in 0..=genes_in_pathway {
                        let p = pvalue(degs_in_pathway, total_degs, genes_in_pathway, total_genes);
                        assert!((0.0..=1.0).contains(&p));
                        let adjusted = adjust_pvalue(p, 25);
                        assert!((0.0..=1.0).contains(&adjusted));
                    }
                }
            }
        }
    }

    #[test]
    fn pvalue_decreases_with_observed() {
        let mut previous = 1.0;
        for observed in 1..=20 {
            let p = pvalue(observed, 100, 20, 200);
            assert!(p <= previous);
            previous = p;
        }
    }

    #[test]
    fn expected() {
        assert!((expected_degs(100, 20, 200) - 10.0).abs() < f64::EPSILON);
        assert!(expected_degs(0, 20, 200).abs() < f64::EPSILON);
        assert!(expected_degs(100, 0, 200).abs() < f64::EPSILON);
        assert!(expected_degs(0, 0, 0).is_nan());
    }

    #[test]
    fn score() {
        assert!((enrichment_score(50, 40.0) - 1.581_138_830_084_189_5).abs() < 1e-4);
        assert!(enrichment_score(50, 0.0).abs() < f64::EPSILON);
        assert!(enrichment_score(50, -1.0).abs() < f64::EPSILON);
        assert!(enrichment_score(50, f64::NAN).abs() < f64::EPSILON);
        // empty gene universe
        assert!(enrichment_score(0, expected_degs(0, 0, 0)).abs() < f64::EPSILON);
        assert!((enrichment_score(0, 4.0) + 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bonferroni() {
        assert!((adjust_pvalue(0.02, 100) - 1.0).abs() < f64::EPSILON);
        assert!((adjust_pvalue(1.5, 100) - 1.0).abs() < f64::EPSILON);
        assert!((adjust_pvalue(0.001, 10) - 0.01).abs() < 1e-15);
        assert!((adjust_pvalue(0.3, 1) - 0.3).abs() < f64::EPSILON);
    }
}

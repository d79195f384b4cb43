use std::fmt::Display;

use crate::{GseaError, GseaResult};

/// A single measured gene from a differential expression analysis
///
/// The gene is identified by its symbol (or any other identifier that
/// is used in the [`PathwayRecord`](`crate::PathwayRecord`)s as well).
///
/// The `adjusted_pvalue` can be `NaN` for genes that were not tested.
/// Such genes are neither DEG nor non-DEG and are ignored in all counts.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneRecord {
    symbol: String,
    log_fold_change: f64,
    adjusted_pvalue: f64,
}

impl GeneRecord {
    /// Initializes a new `GeneRecord`
    pub fn new(symbol: &str, log_fold_change: f64, adjusted_pvalue: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            log_fold_change,
            adjusted_pvalue,
        }
    }

    /// Initializes a new `GeneRecord` from `str` values, e.g. from a
    /// row of a delimited file
    ///
    /// Numerical fields with the value `NA` are parsed as `NaN`.
    ///
    /// # Errors
    ///
    /// If a numerical field is neither `NA` nor a valid float,
    /// returns [`GseaError::ParseFloatError`](`crate::GseaError::ParseFloatError`)
    ///
    /// # Examples
    ///
    /// ```
    /// use gsea::GeneRecord;
    ///
    /// let gene = GeneRecord::from_parts("KRAS", "-1.25", "0.003").unwrap();
    /// assert_eq!(gene.symbol(), "KRAS");
    /// assert!(gene.is_deg(0.05));
    ///
    /// let untested = GeneRecord::from_parts("BRCA2", "0.5", "NA").unwrap();
    /// assert!(untested.adjusted_pvalue().is_nan());
    ///
    /// assert!(GeneRecord::from_parts("TP53", "0.5", "low").is_err());
    /// ```
    pub fn from_parts(
        symbol: &str,
        log_fold_change: &str,
        adjusted_pvalue: &str,
    ) -> GseaResult<Self> {
        fn parse(value: &str) -> GseaResult<f64> {
            match value.trim() {
                "NA" => Ok(f64::NAN),
                x => Ok(x.parse::<f64>()?),
            }
        }
        Ok(Self {
            symbol: symbol.trim().to_string(),
            log_fold_change: parse(log_fold_change)?,
            adjusted_pvalue: parse(adjusted_pvalue)?,
        })
    }

    /// Parses a tab-separated row: `symbol  log2FC  padj`
    ///
    /// Additional columns are ignored.
    ///
    /// # Errors
    ///
    /// - [`GseaError::InvalidInput`] if the row has fewer than 3 columns
    /// - [`GseaError::ParseFloatError`] if a numerical field is invalid
    ///
    /// # Examples
    ///
    /// ```
    /// use gsea::{GeneRecord, GseaError};
    ///
    /// let gene = GeneRecord::from_row("EGFR\t1.9\t0.02").unwrap();
    /// assert_eq!(gene.symbol(), "EGFR");
    ///
    /// assert_eq!(
    ///     GeneRecord::from_row("EGFR\t1.9"),
    ///     Err(GseaError::InvalidInput("EGFR\t1.9".to_string()))
    /// );
    /// ```
    pub fn from_row(row: &str) -> GseaResult<Self> {
        let mut cols = row.split('\t');

        let Some(symbol) = cols.next() else {
            return Err(GseaError::InvalidInput(row.to_string()));
        };
        let Some(log_fold_change) = cols.next() else {
            return Err(GseaError::InvalidInput(row.to_string()));
        };
        let Some(adjusted_pvalue) = cols.next() else {
            return Err(GseaError::InvalidInput(row.to_string()));
        };

        Self::from_parts(symbol, log_fold_change, adjusted_pvalue)
    }

    /// The gene symbol (or other identifier)
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The log2 fold change of the expression
    pub fn log_fold_change(&self) -> f64 {
        self.log_fold_change
    }

    /// The multiple-testing corrected p-value of the expression change
    pub fn adjusted_pvalue(&self) -> f64 {
        self.adjusted_pvalue
    }

    /// Returns `true` if the gene is differentially expressed
    /// (`adjusted_pvalue < threshold`)
    pub fn is_deg(&self, threshold: f64) -> bool {
        self.adjusted_pvalue < threshold
    }

    /// Returns `true` if the gene is not differentially expressed
    /// (`adjusted_pvalue > threshold`)
    ///
    /// A gene exactly at the threshold is neither DEG nor non-DEG.
    pub fn is_non_deg(&self, threshold: f64) -> bool {
        self.adjusted_pvalue > threshold
    }
}

impl Display for GeneRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (log2FC: {}, padj: {})",
            self.symbol, self.log_fold_change, self.adjusted_pvalue
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::GseaError;

    #[test]
    fn classification() {
        let gene = GeneRecord::new("Foo", 1.0, 0.05);
        assert!(!gene.is_deg(0.05));
        assert!(!gene.is_non_deg(0.05));

        assert!(gene.is_deg(0.1));
        assert!(!gene.is_non_deg(0.1));

        assert!(!gene.is_deg(0.01));
        assert!(gene.is_non_deg(0.01));
    }

    #[test]
    fn nan_is_never_classified() {
        let gene = GeneRecord::new("Foo", 1.0, f64::NAN);
        for threshold in [0.01, 0.05, 0.5, 1.0] {
            assert!(!gene.is_deg(threshold));
            assert!(!gene.is_non_deg(threshold));
        }
    }

    #[test]
    fn from_parts() {
        let gene = GeneRecord::from_parts(" Foo ", "1.5", " 0.01").unwrap();
        assert_eq!(gene.symbol(), "Foo");
        assert!((gene.log_fold_change() - 1.5).abs() < f64::EPSILON);
        assert!((gene.adjusted_pvalue() - 0.01).abs() < f64::EPSILON);

        let gene = GeneRecord::from_parts("Foo", "NA", "NA").unwrap();
        assert!(gene.log_fold_change().is_nan());
        assert!(gene.adjusted_pvalue().is_nan());
    }

    #[test]
    fn from_row() {
        let gene = GeneRecord::from_row("Foo\t-0.5\t0.2\textra").unwrap();
        assert_eq!(gene.symbol(), "Foo");
        assert!((gene.log_fold_change() + 0.5).abs() < f64::EPSILON);
        assert!(gene.is_non_deg(0.05));

        for row in ["", "Foo", "Foo\t1.5", "Foo 1.5 0.01"] {
            assert_eq!(
                GeneRecord::from_row(row),
                Err(GseaError::InvalidInput(row.to_string()))
            );
        }

        assert!(matches!(
            GeneRecord::from_row("Foo\t1.5\tlow"),
            Err(GseaError::ParseFloatError(_))
        ));
    }

    #[test]
    fn from_invalid_parts() {
        let res = GeneRecord::from_parts("Foo", "1.5", "");
        assert!(matches!(res, Err(GseaError::ParseFloatError(_))));

        let res = GeneRecord::from_parts("Foo", "up", "0.01");
        assert!(matches!(res, Err(GseaError::ParseFloatError(_))));
    }
}

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use crate::{GseaError, GseaResult};

/// A set of unique gene identifiers
///
/// Membership tests for pathways are done on the set, so
/// a gene that is listed twice in a pathway is only counted once.
pub type GeneSet<'a> = HashSet<&'a str>;

/// A single pathway (gene set)
///
/// A pathway has a unique ID, a human readable description and
/// the list of genes that are part of it. The gene list can contain
/// duplicates, they are ignored in all calculations.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PathwayRecord {
    id: String,
    description: String,
    genes: Vec<String>,
}

impl PathwayRecord {
    /// Initializes a new `PathwayRecord`
    ///
    /// # Examples
    ///
    /// ```
    /// use gsea::PathwayRecord;
    ///
    /// let pathway = PathwayRecord::new("hsa00010", "Glycolysis", ["HK1", "GCK", "HK1"]);
    /// assert_eq!(pathway.id(), "hsa00010");
    /// assert_eq!(pathway.genes().len(), 3);
    /// assert_eq!(pathway.gene_set().len(), 2);
    /// ```
    pub fn new<I>(id: &str, description: &str, genes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            genes: genes.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a tab-separated row that links one gene to a pathway:
    /// `pathway_id  description  gene`
    ///
    /// Rows of the same pathway are combined by [`Pathways::insert`].
    ///
    /// # Errors
    ///
    /// [`GseaError::InvalidInput`] if the row has fewer than 3 columns
    pub fn from_row(row: &str) -> GseaResult<Self> {
        let mut cols = row.split('\t');

        let Some(id) = cols.next() else {
            return Err(GseaError::InvalidInput(row.to_string()));
        };
        let Some(description) = cols.next() else {
            return Err(GseaError::InvalidInput(row.to_string()));
        };
        let Some(gene) = cols.next() else {
            return Err(GseaError::InvalidInput(row.to_string()));
        };

        Ok(Self::new(id.trim(), description.trim(), [gene.trim()]))
    }

    /// The unique ID of the pathway, e.g. the KEGG ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The description (name) of the pathway
    pub fn description(&self) -> &str {
        &self.description
    }

    /// All gene identifiers of the pathway, in their original order
    /// and including duplicates
    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    /// Returns the unique gene identifiers of the pathway
    pub fn gene_set(&self) -> GeneSet<'_> {
        self.genes.iter().map(String::as_str).collect()
    }

    fn extend_genes(&mut self, genes: Vec<String>) {
        self.genes.extend(genes);
    }
}

impl Display for PathwayRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.id, self.description)
    }
}

/// The ordered collection of all pathways of an analysis
///
/// Pathways are kept in the order in which they were first inserted
/// and can be looked up by their ID.
///
/// # Examples
///
/// ```
/// use gsea::{PathwayRecord, Pathways};
///
/// let mut pathways = Pathways::default();
/// pathways.insert(PathwayRecord::new("P2", "Second", ["B"]));
/// pathways.insert(PathwayRecord::new("P1", "First", ["A"]));
/// pathways.insert(PathwayRecord::new("P2", "Second", ["C"]));
///
/// assert_eq!(pathways.len(), 2);
/// assert_eq!(pathways.get("P2").unwrap().genes(), &["B", "C"]);
///
/// let ids: Vec<&str> = pathways.iter().map(|p| p.id()).collect();
/// assert_eq!(ids, vec!["P2", "P1"]);
///
/// assert!(pathways.pathway("P3").is_err());
/// ```
#[derive(Default, Debug, Clone)]
pub struct Pathways {
    records: Vec<PathwayRecord>,
    index: HashMap<String, usize>,
}

impl Pathways {
    /// Constructs a new, empty `Pathways` collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pathway to the collection
    ///
    /// If a pathway with the same ID already exists, the genes of
    /// `pathway` are appended to the existing record and its
    /// description is kept.
    pub fn insert(&mut self, pathway: PathwayRecord) {
        match self.index.get(pathway.id()).copied() {
            Some(idx) => self.records[idx].extend_genes(pathway.genes),
            None => {
                self.index.insert(pathway.id.clone(), self.records.len());
                self.records.push(pathway);
            }
        }
    }

    /// Returns the pathway with the given ID, if present
    pub fn get(&self, id: &str) -> Option<&PathwayRecord> {
        self.index.get(id).map(|idx| &self.records[*idx])
    }

    /// Returns the pathway with the given ID
    ///
    /// # Errors
    ///
    /// If the pathway is not present, returns [`GseaError::DoesNotExist`]
    pub fn pathway(&self, id: &str) -> GseaResult<&PathwayRecord> {
        self.get(id)
            .ok_or_else(|| GseaError::DoesNotExist(id.to_string()))
    }

    /// Returns `true` if a pathway with the given ID is present
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The number of pathways in the collection
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the collection does not contain any pathway
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator of all pathways, in insertion order
    pub fn iter(&self) -> PathwaysIterator<'_> {
        PathwaysIterator {
            inner: self.records.iter(),
        }
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn as_slice(&self) -> &[PathwayRecord] {
        &self.records
    }
}

impl FromIterator<PathwayRecord> for Pathways {
    fn from_iter<T: IntoIterator<Item = PathwayRecord>>(iter: T) -> Self {
        let mut pathways = Pathways::default();
        pathways.extend(iter);
        pathways
    }
}

impl Extend<PathwayRecord> for Pathways {
    fn extend<T: IntoIterator<Item = PathwayRecord>>(&mut self, iter: T) {
        for pathway in iter {
            self.insert(pathway);
        }
    }
}

/// [`PathwayRecord`] Iterator
pub struct PathwaysIterator<'a> {
    inner: std::slice::Iter<'a, PathwayRecord>,
}

impl<'a> Iterator for PathwaysIterator<'a> {
    type Item = &'a PathwayRecord;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for PathwaysIterator<'_> {}

impl<'a> IntoIterator for &'a Pathways {
    type Item = &'a PathwayRecord;
    type IntoIter = PathwaysIterator<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

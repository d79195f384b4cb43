//! Gene measurements and pathway definitions are the input of every enrichment analysis
//!
//! This module contains the structs to represent a single measured gene
//! ([`GeneRecord`]), a single pathway ([`PathwayRecord`]) and the ordered
//! collection of all pathways of an analysis ([`Pathways`]).
//!
//! The underlying principle for all records is the same:
//! - Records are identified by their string ID (gene symbol or pathway ID)
//! - Records are immutable once created
//! - Identifiers are not normalized or validated, this must be handled by
//!   whoever reads them from disk

mod gene;
mod pathway;

pub use gene::GeneRecord;
pub use pathway::{GeneSet, PathwayRecord, Pathways, PathwaysIterator};

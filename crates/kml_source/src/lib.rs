//! Lenient reader for KML map exports.
//!
//! Produces the raw [`model::Kml`] tree: folders, placemarks, styles and
//! style maps with every leaf optional. Typed validation lives downstream.

pub mod model;
pub mod parser;

pub use parser::parse_kml;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KmlError {
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("no <Document> element found")]
    MissingDocument,
}

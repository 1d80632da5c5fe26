/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! KML Route Processor
//!
//! This crate turns a published map document into the option list behind a
//! route-picker page. It retrieves the KML, lifts it into the typed
//! document model, resolves each point's display style and place
//! identifier, and folds the result into an [`OptionModel`] that the page
//! renderer embeds.
//!
//! Style resolution and the place-identifier fallback lookup are separate
//! stages switched by [`Features`]; per-point failures degrade the affected
//! field and are reported in the [`BuildReport`] rather than aborting.
//!
//! # Example
//!
//! ```rust
//! use kmlroute_processor::{Config, Features, Pipeline};
//!
//! let kml = r#"<kml><Document><name>Trip</name>
//!   <Style id="icon-1899-0288D1-normal">
//!     <IconStyle><color>ffd18802</color></IconStyle>
//!   </Style>
//!   <Folder><name>Food</name>
//!     <Placemark><name>Ramen</name>
//!       <description>PLACEID:ChIJramen</description>
//!       <styleUrl>#icon-1899-0288D1-normal</styleUrl>
//!       <Point><coordinates>139.7,35.66,0</coordinates></Point>
//!     </Placemark>
//!   </Folder>
//! </Document></kml>"#;
//!
//! let config = Config {
//!     features: Features::all(),
//!     ..Default::default()
//! };
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let output = runtime
//!     .block_on(Pipeline::new(&config).run_text("mid-1", kml))
//!     .unwrap();
//!
//! let ramen = &output.model.options[1];
//! assert_eq!(ramen.label, "Ramen");
//! assert_eq!(ramen.style.color.as_str(), "#0288D1");
//! assert_eq!(ramen.place_id.as_ref().unwrap().as_str(), "ChIJramen");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod place;
pub mod render;
pub mod source;
pub mod style;

pub use builder::{BuildOutput, BuildReport, OptionBuilder};
pub use config::{Config, Features, PageConfig, PlacesConfig, SourceConfig};
pub use error::{Issue, ProcessorError};
pub use pipeline::Pipeline;
pub use place::{
    LookupError, NearbyQuery, PlaceIdExtractor, PlaceSearch, PlacesClient, RegexPlaceIdExtractor,
};
pub use render::{render_page, PageOptions};
pub use source::{parse_document, DocumentSource, FileSource, HttpSource};
pub use style::{StyleDef, StyleRef, StyleSheet};

// Re-export the model for convenience
pub use kmlroute_core::OptionModel;

use clap::Parser;
use kmlroute_processor::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kmlroute", author, version)]
#[command(about = "Build a route-picker page from a published KML map")]
pub struct Cli {
    /// Identifier of the published map document
    pub document_id: String,

    /// Output name; the page is written to OUTPUT.html
    pub output: PathBuf,

    /// Read the KML from a local file instead of fetching it
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Print the option model as JSON instead of writing a page
    #[arg(long)]
    pub json: bool,

    /// Configuration file (defaults to .kmlroute.toml or kmlroute.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip the nearby-search fallback for points without a place id
    #[arg(long)]
    pub no_lookup: bool,

    /// Take colors straight from style ids instead of resolving styles
    #[arg(long)]
    pub no_styles: bool,

    /// Do not remember the group filter in the page
    #[arg(long)]
    pub no_persist: bool,

    /// API key for the place search service
    #[arg(long, env = "KMLROUTE_PLACES_KEY", hide_env_values = true)]
    pub places_key: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file configuration.
    pub fn apply(&self, config: &mut Config) {
        if self.no_lookup {
            config.features.identifier_fallback = false;
        }
        if self.no_styles {
            config.features.style_resolution = false;
        }
        if self.no_persist {
            config.features.persist_filters = false;
        }
        if let Some(key) = self.places_key.as_ref().filter(|k| !k.is_empty()) {
            config.places.api_key = key.clone();
        }
    }
}

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use kmlroute_processor::io::{model_to_json, write_page};
use kmlroute_processor::{
    render_page, Config, DocumentSource, FileSource, HttpSource, PageOptions, Pipeline,
    PlacesClient,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let id = cli.document_id.as_str();

    let source: Box<dyn DocumentSource> = match &cli.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(&config.source)?),
    };

    let places = if config.lookup_enabled() {
        Some(PlacesClient::new(&config.places).context("creating place search client")?)
    } else {
        if config.features.identifier_fallback {
            warn!("no places API key configured; points without an embedded place id keep none");
        }
        None
    };

    let mut pipeline = Pipeline::new(&config);
    if let Some(places) = &places {
        pipeline = pipeline.with_search(places);
    }

    let output = pipeline
        .run(id, source.as_ref())
        .await
        .with_context(|| format!("failed to build route picker for {id}"))?;

    if cli.json {
        println!("{}", model_to_json(&output.model)?);
        return Ok(());
    }

    let html = render_page(&output.model, &PageOptions::from_config(&config, id))?;
    let path = write_page(&cli.output, &html)
        .with_context(|| format!("failed to write {}.html", cli.output.display()))?;
    info!(path = %path.display(), options = output.model.options.len(), "page written");

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "kmlroute=debug"
    } else {
        "kmlroute=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("failed to read working directory")?;
            Config::load_from_dir(&cwd)?.unwrap_or_default()
        }
    };
    cli.apply(&mut config);
    Ok(config)
}

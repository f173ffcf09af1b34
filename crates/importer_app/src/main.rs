mod browse;
mod cli;
mod config;
mod effects;
mod logging;
mod render;
mod session;

use std::io;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use importer_core::ImportSource;
use importer_engine::{CatalogBrowser, Gateway, GatewaySettings, ReqwestGateway};
use importer_logging::{importer_debug, importer_info};
use tokio::runtime::Runtime;

use crate::browse::{show_record, BrowseSession};
use crate::cli::{Cli, Command, ImagesArgs, ImportArgs};
use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::logging::LogDestination;
use crate::session::ImportSession;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, origin) = AppConfig::load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(path) = &cli.log_file {
        config.log_file = Some(path.clone());
    }

    logging::initialize(
        logging::resolve_level(cli.verbose, config.log_level()),
        LogDestination::from_log_file(config.log_file.as_deref()),
    );
    match &origin {
        Some(path) => importer_info!("Loaded config from {:?}", path),
        None => importer_debug!("No {} found, using defaults", config::DEFAULT_CONFIG_FILE),
    }
    importer_info!("Using import gateway at {}", config.api_url);

    let settings = config.gateway_settings()?;
    match cli.command {
        Command::Import(args) => run_import(&config, settings, args),
        Command::Images(args) => run_images(&config, settings, args),
        Command::Show { id } => {
            let runtime = Runtime::new().context("failed to start async runtime")?;
            let browser = CatalogBrowser::new(gateway(settings)?, config.page_size);
            show_record(&runtime, &browser, id, io::stdout().lock())
        }
    }
}

fn gateway(settings: GatewaySettings) -> Result<Arc<dyn Gateway>> {
    Ok(Arc::new(ReqwestGateway::new(settings)?))
}

fn run_import(config: &AppConfig, settings: GatewaySettings, args: ImportArgs) -> Result<()> {
    let source = ImportSource::from(args.source);
    let runner = EffectRunner::new(settings, config.poll_timing())?;
    let summary = ImportSession::new(runner, source, args.urls, io::stdout().lock()).run()?;

    importer_info!(
        "Import session done: {} started, {} rejected",
        summary.started.len(),
        summary.rejected
    );
    let failed = summary.failed_jobs();
    if summary.rejected > 0 || failed > 0 {
        bail!(
            "{} submission(s) rejected, {} job(s) failed",
            summary.rejected,
            failed
        );
    }
    Ok(())
}

fn run_images(config: &AppConfig, settings: GatewaySettings, args: ImagesArgs) -> Result<()> {
    let runtime = Runtime::new().context("failed to start async runtime")?;
    let page_size = args.limit.unwrap_or(config.page_size);
    let browser = CatalogBrowser::new(gateway(settings)?, page_size);
    let mut session = BrowseSession::new(&runtime, browser, io::stdout().lock());

    let loaded = session.show_page(args.page, args.source.map(Into::into));
    if !args.interactive {
        return loaded;
    }
    session.interact(io::stdin().lock())
}

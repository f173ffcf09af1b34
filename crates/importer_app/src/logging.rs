//! Logger setup for the importer CLI.
//!
//! Terminal output goes to stderr so that listings on stdout stay clean.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
pub enum LogDestination<'a> {
    Terminal,
    /// Terminal plus a log file, truncated on start.
    TerminalAndFile(&'a Path),
}

impl<'a> LogDestination<'a> {
    pub fn from_log_file(log_file: Option<&'a Path>) -> Self {
        match log_file {
            Some(path) => LogDestination::TerminalAndFile(path),
            None => LogDestination::Terminal,
        }
    }
}

/// Picks the level: `--verbose` wins, then `IMPORTER_LOG`, then the config file.
pub fn resolve_level(verbose: bool, configured: LevelFilter) -> LevelFilter {
    if verbose {
        return LevelFilter::Debug;
    }
    importer_logging::level_from_env(configured)
}

pub fn initialize(level: LevelFilter, destination: LogDestination<'_>) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let LogDestination::TerminalAndFile(path) = destination {
        if let Some(file_logger) = create_file_logger(path, level, config) {
            loggers.push(file_logger);
        }
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

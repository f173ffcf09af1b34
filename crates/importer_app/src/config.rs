//! Settings file for the importer CLI.
//!
//! Values are layered: built-in defaults, then `importer.ron`, then the
//! environment, then command line flags (applied by the caller).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use importer_core::{PollTiming, DEFAULT_PAGE_SIZE};
use importer_engine::{GatewayError, GatewaySettings, DEFAULT_API_URL};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "importer.ron";
pub const API_URL_ENV: &str = "IMPORTER_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid api url: {0}")]
    ApiUrl(#[from] GatewayError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub page_size: u32,
    pub poll_interval_ms: u64,
    pub completion_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let timing = PollTiming::default();
        let gateway = GatewaySettings::default();
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            poll_interval_ms: timing.interval.as_millis() as u64,
            completion_delay_ms: timing.completion_delay.as_millis() as u64,
            request_timeout_secs: gateway.request_timeout.as_secs(),
            connect_timeout_secs: gateway.connect_timeout.as_secs(),
            log_level: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Reads `explicit`, or `./importer.ron` when no path is given.
    ///
    /// Only an explicitly named file has to exist. Also returns the path the
    /// settings came from, `None` when the defaults were used. Nothing is
    /// logged here since the logger is configured from the result.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match explicit {
            Some(path) => Self::load_at(path.to_path_buf(), true),
            None => Self::load_at(PathBuf::from(DEFAULT_CONFIG_FILE), false),
        }
    }

    fn load_at(path: PathBuf, required: bool) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                return Ok((Self::default(), None));
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        let config = Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.clone(),
            message,
        })?;
        Ok((config, Some(path)))
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|err| err.to_string())
    }

    /// Applies environment overrides through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.api_url = url;
        }
    }

    pub fn gateway_settings(&self) -> Result<GatewaySettings, ConfigError> {
        let mut settings = GatewaySettings::with_base_url(&self.api_url)?;
        settings.request_timeout = Duration::from_secs(self.request_timeout_secs.max(1));
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs.max(1));
        Ok(settings)
    }

    pub fn poll_timing(&self) -> PollTiming {
        PollTiming {
            interval: Duration::from_millis(self.poll_interval_ms),
            completion_delay: Duration::from_millis(self.completion_delay_ms),
        }
    }

    /// Level from the file, or `Warn`; unknown names fall back to the default.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(importer_logging::parse_level)
            .unwrap_or(LevelFilter::Warn)
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use importer_core::{CatalogSource, ImportSource, RecordId};

/// Import folders from cloud storage and browse the imported images.
#[derive(Parser, Debug)]
#[command(name = "importer")]
#[command(version)]
#[command(about = "Start folder imports, follow their progress and browse the catalog", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./importer.ron when present)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Base url of the import gateway (e.g., http://localhost:8000)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Also write log output to this file
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log debug output to the terminal
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit folder urls and follow the resulting jobs until they finish
    Import(ImportArgs),
    /// List imported images
    Images(ImagesArgs),
    /// Show one imported image
    Show {
        /// Image id
        id: RecordId,
    },
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Where the folders live
    #[arg(value_enum)]
    pub source: SourceArg,

    /// Folder urls, submitted one after another
    #[arg(required = true)]
    pub urls: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ImagesArgs {
    /// Only list images from this source
    #[arg(long = "source", value_enum)]
    pub source: Option<FilterArg>,

    /// Page to load
    #[arg(long = "page", default_value_t = 1)]
    pub page: u32,

    /// Images per page (overrides the configured page size)
    #[arg(long = "limit")]
    pub limit: Option<u32>,

    /// Keep reading navigation commands from stdin
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    GoogleDrive,
    Dropbox,
}

impl From<SourceArg> for ImportSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::GoogleDrive => ImportSource::GoogleDrive,
            SourceArg::Dropbox => ImportSource::Dropbox,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    #[value(name = "google_drive")]
    GoogleDrive,
    Dropbox,
}

impl From<FilterArg> for CatalogSource {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::GoogleDrive => CatalogSource::GoogleDrive,
            FilterArg::Dropbox => CatalogSource::Dropbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_takes_hyphenated_source_and_urls() {
        let cli = Cli::parse_from([
            "importer",
            "import",
            "google-drive",
            "https://drive.google.com/drive/folders/a",
            "https://drive.google.com/drive/folders/b",
        ]);
        match cli.command {
            Command::Import(args) => {
                assert_eq!(ImportSource::from(args.source), ImportSource::GoogleDrive);
                assert_eq!(args.urls.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn images_filter_uses_catalog_spelling() {
        let cli = Cli::parse_from([
            "importer",
            "--api-url",
            "http://gateway:9000",
            "images",
            "--source",
            "google_drive",
            "--page",
            "3",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://gateway:9000"));
        match cli.command {
            Command::Images(args) => {
                assert_eq!(args.source.map(CatalogSource::from), Some(CatalogSource::GoogleDrive));
                assert_eq!(args.page, 3);
                assert_eq!(args.limit, None);
                assert!(!args.interactive);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn import_requires_a_url() {
        assert!(Cli::try_parse_from(["importer", "import", "dropbox"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

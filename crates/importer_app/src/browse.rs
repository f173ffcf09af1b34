use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};
use importer_core::{CatalogPage, CatalogSource, RecordId};
use importer_engine::{BrowseError, CatalogBrowser};
use importer_logging::importer_debug;
use tokio::runtime::Runtime;

use crate::render::{render_catalog, render_record};

const HELP: &str = "commands: n (next), p (previous), r (refresh), f <google_drive|dropbox|all>, g <page>, q (quit)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Refresh,
    Filter(Option<CatalogSource>),
    Goto(u32),
    Quit,
}

pub fn parse_command(line: &str) -> Option<BrowseCommand> {
    let mut words = line.split_whitespace();
    let command = match (words.next()?, words.next()) {
        ("n", None) => BrowseCommand::Next,
        ("p", None) => BrowseCommand::Previous,
        ("r", None) => BrowseCommand::Refresh,
        ("q", None) => BrowseCommand::Quit,
        ("f", Some("all")) => BrowseCommand::Filter(None),
        ("f", Some(source)) => BrowseCommand::Filter(Some(CatalogSource::from_query(source)?)),
        ("g", Some(page)) => BrowseCommand::Goto(page.parse().ok()?),
        _ => return None,
    };
    words.next().is_none().then_some(command)
}

/// Drives a [`CatalogBrowser`] from the command line.
pub struct BrowseSession<'a, W: Write> {
    runtime: &'a Runtime,
    browser: CatalogBrowser,
    out: W,
}

impl<'a, W: Write> BrowseSession<'a, W> {
    pub fn new(runtime: &'a Runtime, browser: CatalogBrowser, out: W) -> Self {
        Self {
            runtime,
            browser,
            out,
        }
    }

    /// Loads one page and prints it. A failed listing is an error.
    pub fn show_page(&mut self, page: u32, filter: Option<CatalogSource>) -> Result<()> {
        let result = self.runtime.block_on(self.browser.load(page, filter));
        self.print_view()?;
        result.map(|_| ()).map_err(|err| anyhow!(err))
    }

    /// Reads navigation commands until `q` or end of input.
    pub fn interact(&mut self, input: impl BufRead) -> Result<()> {
        writeln!(self.out, "{HELP}")?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let Some(command) = parse_command(&line) else {
                writeln!(self.out, "{HELP}")?;
                continue;
            };
            importer_debug!("Browse command {:?}", command);
            let Some(result) = self.execute(command) else {
                break;
            };
            if let Err(BrowseError::OutOfRange(err)) = &result {
                writeln!(self.out, "No such page: {}", err.requested)?;
                continue;
            }
            self.print_view()?;
        }
        Ok(())
    }

    /// Returns `None` for [`BrowseCommand::Quit`].
    fn execute(&mut self, command: BrowseCommand) -> Option<Result<CatalogPage, BrowseError>> {
        let browser = &mut self.browser;
        self.runtime.block_on(async move {
            match command {
                BrowseCommand::Next => Some(browser.next_page().await),
                BrowseCommand::Previous => Some(browser.previous_page().await),
                BrowseCommand::Refresh => Some(browser.refresh().await),
                BrowseCommand::Filter(filter) => Some(browser.set_filter(filter).await),
                BrowseCommand::Goto(page) => Some(browser.set_page(page).await),
                BrowseCommand::Quit => None,
            }
        })
    }

    fn print_view(&mut self) -> Result<()> {
        for line in render_catalog(&self.browser.view()) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Prints a single record.
pub fn show_record(
    runtime: &Runtime,
    browser: &CatalogBrowser,
    id: RecordId,
    mut out: impl Write,
) -> Result<()> {
    let record = runtime.block_on(browser.record(id)).map_err(|err| {
        let message = err.detail.clone().unwrap_or_else(|| err.to_string());
        anyhow!("could not load image {id}: {message}")
    })?;
    for line in render_record(&record) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(parse_command("n"), Some(BrowseCommand::Next));
        assert_eq!(parse_command(" p "), Some(BrowseCommand::Previous));
        assert_eq!(parse_command("r"), Some(BrowseCommand::Refresh));
        assert_eq!(parse_command("q"), Some(BrowseCommand::Quit));
        assert_eq!(parse_command("g 3"), Some(BrowseCommand::Goto(3)));
        assert_eq!(
            parse_command("f dropbox"),
            Some(BrowseCommand::Filter(Some(CatalogSource::Dropbox)))
        );
        assert_eq!(
            parse_command("f google_drive"),
            Some(BrowseCommand::Filter(Some(CatalogSource::GoogleDrive)))
        );
        assert_eq!(parse_command("f all"), Some(BrowseCommand::Filter(None)));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!(parse_command("g"), None);
        assert_eq!(parse_command("g two"), None);
        assert_eq!(parse_command("f google-drive"), None);
        assert_eq!(parse_command("n 2"), None);
        assert_eq!(parse_command("x"), None);
    }
}

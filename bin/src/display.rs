//! Terminal presentation for the prostats CLI.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use prostats_lib::prelude::*;
use prostats_lib::url;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Write a report in the specified format.
pub(crate) fn write_report<W: Write>(
    report: &Report,
    writer: W,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => TextFormatter::new().write_report(report, writer)?,
        OutputFormat::Json => JsonFormatter::new()
            .with_pretty(pretty)
            .write_report(report, writer)?,
    }
    Ok(())
}

/// Appends the formatter's extension when `path` has none.
pub(crate) fn output_path(path: &Path, format: OutputFormat) -> PathBuf {
    if path.extension().is_some() {
        return path.to_path_buf();
    }
    let extension = match format {
        OutputFormat::Text => TextFormatter::new().extension().to_string(),
        OutputFormat::Json => JsonFormatter::new().extension().to_string(),
    };
    path.with_extension(extension)
}

/// Write a report to a file in the specified format.
pub(crate) fn write_report_file(
    report: &Report,
    output: &Path,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_report(report, &mut writer, format, pretty)?;
    writer.flush()?;
    Ok(())
}

/// Links to the longest and shortest matches of a report.
pub(crate) fn match_links(report: &Report) -> [String; 2] {
    [
        format!("View Longest Match: {}", url::match_url(report.longest_match_id())),
        format!("View Shortest Match: {}", url::match_url(report.shortest_match_id())),
    ]
}

/// The no-data message, as a JSON object in JSON mode.
pub(crate) fn no_data_message(year: i32, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("No matches found for the year {year}."),
        OutputFormat::Json => serde_json::json!({ "year": year, "matches": 0 }).to_string(),
    }
}

/// Presenter that shows a spinner while paging and prints the outcome.
pub(crate) struct TerminalPresenter {
    format: OutputFormat,
    pretty: bool,
    output: Option<PathBuf>,
    quiet: bool,
    progress: ProgressBar,
    failure: Option<anyhow::Error>,
}

impl TerminalPresenter {
    pub(crate) fn new(
        format: OutputFormat,
        pretty: bool,
        output: Option<PathBuf>,
        quiet: bool,
    ) -> Self {
        let progress = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) =
                ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
            {
                pb.set_style(style);
            }
            pb.set_message("Fetching pro matches...");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };

        Self {
            format,
            pretty,
            output: output.map(|path| output_path(&path, format)),
            quiet,
            progress,
            failure: None,
        }
    }

    /// Returns any error raised while writing the outcome.
    pub(crate) fn finish(self) -> Result<()> {
        // An abandoned bar keeps its failure message on screen
        if !self.progress.is_finished() {
            self.progress.finish_and_clear();
        }
        self.failure.map_or(Ok(()), Err)
    }

    fn emit(&self, report: &Report) -> Result<()> {
        match &self.output {
            Some(path) => {
                write_report_file(report, path, self.format, self.pretty)?;
                if !self.quiet {
                    println!("Output written to: {}", path.display());
                }
            }
            None => {
                let stdout = std::io::stdout();
                write_report(report, stdout.lock(), self.format, self.pretty)?;
            }
        }

        // Keep stdout parseable when it carries JSON
        if self.format == OutputFormat::Text || self.output.is_some() {
            for link in match_links(report) {
                println!("{link}");
            }
        }
        Ok(())
    }
}

impl Presenter for TerminalPresenter {
    fn on_page(&mut self, progress: &PageProgress) {
        self.progress.set_message(format!(
            "{} pages scanned, {} matches from {}",
            progress.pages, progress.matched, progress.year
        ));
    }

    fn on_report(&mut self, report: &Report) {
        self.progress.finish_and_clear();
        if let Err(e) = self.emit(report) {
            self.failure = Some(e);
        }
    }

    fn on_no_data(&mut self, year: i32) {
        self.progress.finish_and_clear();
        println!("{}", no_data_message(year, self.format));
    }

    fn on_fetch_error(&mut self, error: &ProstatsError) {
        self.progress.abandon_with_message(format!("Fetch failed: {error}"));
    }
}

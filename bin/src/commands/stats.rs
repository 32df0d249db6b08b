//! Stats command implementation.
//!
//! Builds a feed client from the command-line flags, runs the pagination
//! driver for one year and hands the outcome to the terminal presenter.

use crate::display::TerminalPresenter;
use anyhow::{Context, Result, bail};
use chrono::{Datelike, Utc};
use clap::Args;
use prostats_lib::prelude::*;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// First year with professional matches in the feed.
pub(crate) const FIRST_YEAR: i32 = 2011;

/// Flags for the `stats` command.
#[derive(Args, Debug)]
pub(crate) struct StatsArgs {
    /// Calendar year (UTC). Defaults to the current year.
    #[arg(short, long, value_parser = clap::value_parser!(i32).range(i64::from(FIRST_YEAR)..))]
    year: Option<i32>,

    /// Output format (text or json)
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Write the report to this file instead of stdout; the format's
    /// extension is added when the path has none
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// API base URL
    #[arg(long, default_value = prostats_lib::url::DEFAULT_BASE_URL)]
    base_url: String,

    /// Retries after a rate-limited (HTTP 429) response
    #[arg(long, default_value = "10")]
    max_retries: u32,

    /// Delay before the first retry, in milliseconds
    #[arg(long, default_value = "2000")]
    retry_delay_ms: u64,

    /// Upper bound for any retry delay, in milliseconds
    #[arg(long, default_value = "30000")]
    max_retry_delay_ms: u64,

    /// Timeout for a single request, in seconds
    #[arg(long, default_value = "30")]
    request_timeout_secs: u64,

    /// Abort the whole run after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl StatsArgs {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                base_delay: Duration::from_millis(self.retry_delay_ms),
                max_delay: Duration::from_millis(self.max_retry_delay_ms.max(self.retry_delay_ms)),
            },
            ..Default::default()
        }
    }
}

/// Resolve the requested year against the current UTC year.
fn resolve_year(requested: Option<i32>, current: i32) -> Result<i32> {
    match requested {
        None => Ok(current),
        Some(year) if year > current => {
            bail!("Year {year} is in the future. Valid years: {FIRST_YEAR}-{current}")
        }
        Some(year) => Ok(year),
    }
}

/// Compute and present statistics for one year.
pub(crate) async fn stats(args: StatsArgs, quiet: bool) -> Result<()> {
    let year = resolve_year(args.year, Utc::now().year())?;

    let client = FeedClient::new(args.client_config()).context("Failed to create HTTP client")?;

    let cancel = CancellationToken::new();
    spawn_ctrl_c(cancel.clone());
    if let Some(secs) = args.timeout_secs {
        spawn_deadline(cancel.clone(), Duration::from_secs(secs));
    }

    info!(year, base_url = %args.base_url, "starting statistics run");

    let mut presenter = TerminalPresenter::new(args.format, args.pretty, args.output, quiet);
    let outcome = present_match_statistics(&client, year, &cancel, &mut presenter).await;

    // Stop the helper tasks
    cancel.cancel();

    presenter.finish()?;
    outcome.with_context(|| format!("Failed to compute statistics for {year}"))?;

    Ok(())
}

fn spawn_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    warn!("interrupted, cancelling run");
                    cancel.cancel();
                }
            }
            () = cancel.cancelled() => {}
        }
    });
}

fn spawn_deadline(cancel: CancellationToken, timeout: Duration) {
    tokio::spawn(async move {
        tokio::select! {
            () = tokio::time::sleep(timeout) => {
                warn!(timeout_secs = timeout.as_secs(), "overall timeout reached, cancelling run");
                cancel.cancel();
            }
            () = cancel.cancelled() => {}
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_defaults_to_current() {
        assert_eq!(resolve_year(None, 2026).unwrap(), 2026);
    }

    #[test]
    fn future_year_is_rejected() {
        assert!(resolve_year(Some(2027), 2026).is_err());
        assert_eq!(resolve_year(Some(2019), 2026).unwrap(), 2019);
    }

    #[test]
    fn retry_cap_never_drops_below_base_delay() {
        let args = StatsArgs {
            year: None,
            format: OutputFormat::Text,
            pretty: false,
            output: None,
            base_url: "http://localhost:1".to_string(),
            max_retries: 3,
            retry_delay_ms: 5_000,
            max_retry_delay_ms: 1_000,
            request_timeout_secs: 5,
            timeout_secs: None,
        };
        let config = args.client_config();
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.base_delay, Duration::from_secs(5));
        assert_eq!(config.retry.max_delay, Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}

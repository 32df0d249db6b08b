//! Pro match statistics from the OpenDota feed, per calendar year.
//!
//! This is a facade crate that re-exports functionality from the prostats
//! workspace crates and provides the pagination driver.
//!
//! # Quick Start
//!
//! ```ignore
//! use prostats_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FeedClient::with_defaults()?;
//!     let cancel = CancellationToken::new();
//!
//!     match get_match_statistics(&client, 2023, &cancel).await? {
//!         StatsOutcome::Report(report) => print!("{}", TextFormatter::new().render(&report)?),
//!         StatsOutcome::NoData { year } => println!("No matches found for the year {year}."),
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/prostats/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod stats;

pub use stats::{
    PageProgress, Presenter, StatsOutcome, get_match_statistics, present_match_statistics,
};

// Re-export core types
pub use prostats_types::*;

// Re-export fetch functionality
pub use prostats_fetch::{
    ClientConfig, FeedClient, FetchError, MatchFeed, ParseError, RetryPolicy, url,
};

// Re-export aggregation
pub use prostats_aggregate::{
    Accumulator, BucketTotals, ContinuationDecision, Extreme, StopReason, YearAggregator,
};

// Re-export report building and formatters
pub use prostats_report::{
    BucketSummary, DateSpan, FormatError, JsonFormatter, OutputFormat, Report, ReportBuilder,
    ReportFormatter, TextFormatter,
};

pub use tokio_util::sync::CancellationToken;

/// Prelude module for convenient imports.
///
/// ```
/// use prostats_lib::prelude::*;
/// ```
pub mod prelude {
    pub use prostats_types::{DurationBucket, MatchId, MatchRecord, ProstatsError, Result};

    pub use prostats_fetch::{ClientConfig, FeedClient, MatchFeed, RetryPolicy};

    pub use prostats_report::{
        JsonFormatter, OutputFormat, Report, ReportFormatter, TextFormatter,
    };

    pub use crate::stats::{
        PageProgress, Presenter, StatsOutcome, get_match_statistics, present_match_statistics,
    };

    pub use tokio_util::sync::CancellationToken;
}

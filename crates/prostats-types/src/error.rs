//! Error types for prostats.

use thiserror::Error;

use crate::MatchId;

/// Result type alias for prostats operations.
pub type Result<T> = std::result::Result<T, ProstatsError>;

/// Errors that abort a statistics run.
///
/// A year without any matches is not an error; see [`NoDataError`].
#[derive(Error, Debug)]
pub enum ProstatsError {
    /// The feed request failed before a response arrived, or the response
    /// could not be read.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The feed answered with a non-success status other than 429.
    #[error("Feed returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The feed kept rate-limiting after all retries were spent.
    #[error("Rate limited by the feed after {attempts} attempts")]
    RateLimited {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// The run was cancelled or timed out.
    #[error("Run cancelled before completion")]
    Cancelled,

    /// The feed returned a record that violates its contract.
    #[error(transparent)]
    Data(#[from] DataError),
}

/// A record from the feed could not be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The record's start time is outside the representable range.
    #[error("Match {match_id} has an invalid start_time: {start_time}")]
    InvalidTimestamp {
        /// The offending match.
        match_id: MatchId,
        /// The raw start time.
        start_time: i64,
    },

    /// A page ended on a match id that is not older than the cursor it was
    /// requested with, so paginating further would never terminate.
    #[error("Feed page ending at match {last} did not advance past cursor {cursor}")]
    StalledCursor {
        /// Cursor the page was requested with.
        cursor: MatchId,
        /// Id of the page's last match.
        last: MatchId,
    },

    /// The page body could not be decoded into match records.
    #[error("Malformed match record: {0}")]
    Malformed(String),
}

/// No matches were found for the requested year.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No matches found for the year {year}")]
pub struct NoDataError {
    /// The year that was requested.
    pub year: i32,
}

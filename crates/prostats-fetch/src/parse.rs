//! Decoding of `proMatches` response bodies.

use prostats_types::MatchRecord;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while decoding a page.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The body is not a JSON array of well-formed match records.
    #[error("Malformed page: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The feed answered with an error object instead of a page.
    #[error("Feed returned an error: {0}")]
    Feed(String),
}

/// Error object OpenDota sends in place of a page.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Parses a page of match records from a response body.
///
/// Every record must carry `match_id`, `start_time`, `duration`,
/// `radiant_score` and `dire_score`; a single malformed record fails the
/// whole page.
///
/// # Errors
///
/// Returns an error if the body is not a valid page.
///
/// # Example
///
/// ```
/// use prostats_fetch::parse_page;
///
/// let body = br#"[{"match_id": 5, "start_time": 1700000000, "duration": 2000,
///                 "radiant_score": 20, "dire_score": 11}]"#;
/// let page = parse_page(body).unwrap();
/// assert_eq!(page[0].match_id, 5);
/// ```
pub fn parse_page(body: &[u8]) -> Result<Vec<MatchRecord>, ParseError> {
    match serde_json::from_slice::<Vec<MatchRecord>>(body) {
        Ok(records) => Ok(records),
        Err(e) => match serde_json::from_slice::<ErrorBody>(body) {
            Ok(feed_error) => Err(ParseError::Feed(feed_error.error)),
            Err(_) => Err(ParseError::Malformed(e)),
        },
    }
}

/// Returns the index of the first record whose id is larger than its
/// predecessor's, or `None` when the page is ordered newest first.
#[must_use]
pub fn first_order_violation(records: &[MatchRecord]) -> Option<usize> {
    records
        .windows(2)
        .position(|pair| pair[1].match_id > pair[0].match_id)
        .map(|i| i + 1)
}

//! OpenDota URL construction.

use prostats_types::MatchId;

/// Base URL for the OpenDota API.
pub const DEFAULT_BASE_URL: &str = "https://api.opendota.com/api";

/// Base URL for human-facing match pages.
pub const MATCH_PAGE_BASE_URL: &str = "https://www.opendota.com/matches";

/// Query parameter carrying the pagination cursor.
pub const CURSOR_PARAM: &str = "less_than_match_id";

/// Builds the `proMatches` endpoint URL for the given API base.
///
/// A trailing slash on `base_url` is ignored.
///
/// # Example
///
/// ```
/// use prostats_fetch::url::pro_matches_url;
///
/// assert_eq!(
///     pro_matches_url("https://api.opendota.com/api/"),
///     "https://api.opendota.com/api/proMatches"
/// );
/// ```
#[must_use]
pub fn pro_matches_url(base_url: &str) -> String {
    format!("{}/proMatches", base_url.trim_end_matches('/'))
}

/// Builds the public page URL for a match.
///
/// # Example
///
/// ```
/// use prostats_fetch::url::match_url;
///
/// assert_eq!(match_url(7_000_000_001), "https://www.opendota.com/matches/7000000001");
/// ```
#[must_use]
pub fn match_url(match_id: MatchId) -> String {
    format!("{MATCH_PAGE_BASE_URL}/{match_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pro_matches_url_default() {
        assert_eq!(
            pro_matches_url(DEFAULT_BASE_URL),
            "https://api.opendota.com/api/proMatches"
        );
    }

    #[test]
    fn test_pro_matches_url_local() {
        assert_eq!(
            pro_matches_url("http://127.0.0.1:8080"),
            "http://127.0.0.1:8080/proMatches"
        );
    }

    #[test]
    fn test_match_url() {
        assert_eq!(match_url(42), "https://www.opendota.com/matches/42");
    }
}

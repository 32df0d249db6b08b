//! Link command implementation.

use prostats_lib::{MatchId, url};

/// Print the OpenDota page for a match.
pub(crate) fn print_link(match_id: MatchId) {
    println!("{}", url::match_url(match_id));
}

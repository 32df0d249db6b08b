//! Page source abstraction.

use async_trait::async_trait;
use prostats_types::{MatchId, MatchRecord};
use tokio_util::sync::CancellationToken;

use crate::{FeedClient, FetchError};

/// A source of match pages ordered newest first.
///
/// [`FeedClient`] is the production implementation; tests substitute
/// scripted feeds.
#[async_trait]
pub trait MatchFeed: Send + Sync {
    /// Fetches the page of matches older than `cursor` (`None` for the newest page).
    ///
    /// An empty page means the feed is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched.
    async fn fetch_page(
        &self,
        cursor: Option<MatchId>,
        cancel: &CancellationToken,
    ) -> Result<Vec<MatchRecord>, FetchError>;
}

#[async_trait]
impl MatchFeed for FeedClient {
    async fn fetch_page(
        &self,
        cursor: Option<MatchId>,
        cancel: &CancellationToken,
    ) -> Result<Vec<MatchRecord>, FetchError> {
        Self::fetch_page(self, cursor, cancel).await
    }
}

//! Pagination driver and presentation hooks.

use prostats_aggregate::{ContinuationDecision, YearAggregator};
use prostats_fetch::MatchFeed;
use prostats_report::{Report, ReportBuilder};
use prostats_types::{DataError, MatchId, NoDataError, ProstatsError, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Result of a statistics run that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsOutcome {
    /// Statistics for the requested year.
    Report(Report),
    /// The feed holds no matches for the requested year.
    NoData {
        /// The requested year.
        year: i32,
    },
}

/// Progress after a page has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// Target year of the run.
    pub year: i32,
    /// Number of pages fetched so far.
    pub pages: u64,
    /// Records in the page just consumed.
    pub page_records: usize,
    /// Matches from the target year accumulated so far.
    pub matched: u64,
    /// Cursor for the next page, `None` when pagination stops.
    pub next_cursor: Option<MatchId>,
}

/// Receives the outcome of a statistics run.
///
/// Exactly one of [`on_report`](Presenter::on_report),
/// [`on_no_data`](Presenter::on_no_data) and
/// [`on_fetch_error`](Presenter::on_fetch_error) is called per run.
pub trait Presenter {
    /// Called after every page; does nothing by default.
    fn on_page(&mut self, _progress: &PageProgress) {}

    /// Called with the finished report.
    fn on_report(&mut self, report: &Report);

    /// Called when the year has no matches.
    fn on_no_data(&mut self, year: i32);

    /// Called when the run fails.
    fn on_fetch_error(&mut self, error: &ProstatsError);
}

/// Computes statistics for the pro matches played in `target_year` (UTC).
///
/// Pages are requested newest first, one at a time, until the feed is
/// exhausted or a page ends before `target_year`. Each call starts from an
/// empty accumulator.
///
/// # Errors
///
/// Returns an error if a page cannot be fetched or decoded, if `cancel`
/// fires, or if the feed stops advancing. No partial report is produced.
pub async fn get_match_statistics<F>(
    feed: &F,
    target_year: i32,
    cancel: &CancellationToken,
) -> Result<StatsOutcome>
where
    F: MatchFeed + ?Sized,
{
    collect(feed, target_year, cancel, |_| {}).await
}

/// Runs [`get_match_statistics`] and hands the outcome to `presenter`.
///
/// # Errors
///
/// Returns the run's error after passing it to
/// [`Presenter::on_fetch_error`].
pub async fn present_match_statistics<F, P>(
    feed: &F,
    target_year: i32,
    cancel: &CancellationToken,
    presenter: &mut P,
) -> Result<StatsOutcome>
where
    F: MatchFeed + ?Sized,
    P: Presenter + ?Sized,
{
    let outcome = collect(feed, target_year, cancel, |progress| {
        presenter.on_page(progress);
    })
    .await;

    match &outcome {
        Ok(StatsOutcome::Report(report)) => presenter.on_report(report),
        Ok(StatsOutcome::NoData { year }) => presenter.on_no_data(*year),
        Err(error) => presenter.on_fetch_error(error),
    }
    outcome
}

async fn collect<F, C>(
    feed: &F,
    target_year: i32,
    cancel: &CancellationToken,
    mut on_page: C,
) -> Result<StatsOutcome>
where
    F: MatchFeed + ?Sized,
    C: FnMut(&PageProgress),
{
    let mut aggregator = YearAggregator::new(target_year);
    let mut cursor: Option<MatchId> = None;

    loop {
        let page = feed.fetch_page(cursor, cancel).await?;
        let decision = aggregator.consume(&page)?;
        let accumulator = aggregator.accumulator();

        on_page(&PageProgress {
            year: target_year,
            pages: accumulator.pages_scanned(),
            page_records: page.len(),
            matched: accumulator.total_count(),
            next_cursor: decision.next_cursor(),
        });

        match decision {
            ContinuationDecision::Continue { cursor: next } => {
                if let Some(previous) = cursor
                    && next >= previous
                {
                    return Err(DataError::StalledCursor {
                        cursor: previous,
                        last: next,
                    }
                    .into());
                }
                debug!(cursor = next, "requesting next page");
                cursor = Some(next);
            }
            ContinuationDecision::Stop(reason) => {
                info!(
                    year = target_year,
                    pages = accumulator.pages_scanned(),
                    matched = accumulator.total_count(),
                    %reason,
                    "pagination finished"
                );
                break;
            }
        }
    }

    match ReportBuilder::build(&aggregator.finalize()) {
        Ok(report) => Ok(StatsOutcome::Report(report)),
        Err(NoDataError { year }) => Ok(StatsOutcome::NoData { year }),
    }
}


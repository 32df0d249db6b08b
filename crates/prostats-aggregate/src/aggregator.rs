//! Page-by-page aggregation with the year-boundary stop rule.

use chrono::Datelike;
use prostats_types::{DataError, MatchId, MatchRecord};
use tracing::debug;

use crate::Accumulator;

/// Why pagination stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The feed returned an empty page.
    FeedExhausted,
    /// The last record of the page started before the target year.
    PassedTargetYear {
        /// Year of the page's last record.
        last_year: i32,
    },
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FeedExhausted => write!(f, "feed exhausted"),
            Self::PassedTargetYear { last_year } => {
                write!(f, "reached matches from {last_year}")
            }
        }
    }
}

/// Outcome of consuming one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationDecision {
    /// Fetch the page of matches older than `cursor`.
    Continue {
        /// Id of the page's last match.
        cursor: MatchId,
    },
    /// Stop paginating.
    Stop(StopReason),
}

impl ContinuationDecision {
    /// Returns the cursor for the next page, or `None` when pagination stops.
    #[must_use]
    pub const fn next_cursor(&self) -> Option<MatchId> {
        match self {
            Self::Continue { cursor } => Some(*cursor),
            Self::Stop(_) => None,
        }
    }
}

/// Streaming aggregator for the matches of one year.
///
/// Feed pages newest first to [`YearAggregator::consume`] until it returns
/// [`ContinuationDecision::Stop`], then call [`YearAggregator::finalize`].
///
/// Only the last record of a page decides whether to stop. A page whose
/// middle record already belongs to an older year while the last one does
/// not keeps pagination going.
#[derive(Debug)]
pub struct YearAggregator {
    target_year: i32,
    accumulator: Accumulator,
}

impl YearAggregator {
    /// Creates an aggregator for `target_year`.
    #[must_use]
    pub const fn new(target_year: i32) -> Self {
        Self {
            target_year,
            accumulator: Accumulator::new(target_year),
        }
    }

    /// Returns the running totals so far.
    #[must_use]
    pub const fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Consumes one page of records, ordered newest first.
    ///
    /// Records from the target year are accumulated; others are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a record's start time cannot be interpreted.
    pub fn consume(&mut self, records: &[MatchRecord]) -> Result<ContinuationDecision, DataError> {
        self.accumulator.note_page(records.len());

        let Some(last) = records.last() else {
            debug!(year = self.target_year, "empty page, feed exhausted");
            return Ok(ContinuationDecision::Stop(StopReason::FeedExhausted));
        };

        let mut last_year = self.target_year;
        let mut matched = 0usize;
        for record in records {
            let started = record.start_datetime()?;
            last_year = started.year();
            if last_year == self.target_year {
                self.accumulator.add(record, started.date_naive());
                matched += 1;
            }
        }

        debug!(
            year = self.target_year,
            records = records.len(),
            matched,
            last_year,
            last_match_id = last.match_id,
            "consumed page"
        );

        if last_year < self.target_year {
            Ok(ContinuationDecision::Stop(StopReason::PassedTargetYear {
                last_year,
            }))
        } else {
            Ok(ContinuationDecision::Continue {
                cursor: last.match_id,
            })
        }
    }

    /// Finishes aggregation, returning the accumulated totals.
    #[must_use]
    pub fn finalize(self) -> Accumulator {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use prostats_types::DurationBucket;

    fn at(year: i32, month: u32, day: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
            .timestamp()
    }

    fn record(id: MatchId, year: i32, duration: u32, radiant: u32, dire: u32) -> MatchRecord {
        MatchRecord::new(id, at(year, 6, 1), duration, radiant, dire)
    }

    #[test]
    fn test_single_page_all_buckets() {
        let mut agg = YearAggregator::new(2023);
        let page = [
            record(3, 2023, 1000, 10, 8),
            record(2, 2023, 2200, 15, 12),
            record(1, 2023, 3000, 20, 25),
        ];

        let decision = agg.consume(&page).unwrap();
        assert_eq!(decision, ContinuationDecision::Continue { cursor: 1 });

        let decision = agg.consume(&[]).unwrap();
        assert_eq!(decision, ContinuationDecision::Stop(StopReason::FeedExhausted));

        let acc = agg.finalize();
        assert_eq!(acc.total_count(), 3);
        assert_eq!(acc.bucket(DurationBucket::Short).count, 1);
        assert_eq!(acc.bucket(DurationBucket::Medium).count, 1);
        assert_eq!(acc.bucket(DurationBucket::Long).count, 1);
        assert_eq!(acc.total_kills(), 90);
        assert_eq!(acc.longest().unwrap().duration, 3000);
        assert_eq!(acc.shortest().unwrap().duration, 1000);
        assert_eq!(acc.pages_scanned(), 2);
        assert_eq!(acc.records_scanned(), 3);
    }

    #[test]
    fn test_older_page_stops() {
        let mut agg = YearAggregator::new(2023);
        let page = [record(20, 2022, 1900, 1, 1), record(19, 2022, 1900, 1, 1)];

        let decision = agg.consume(&page).unwrap();
        assert_eq!(
            decision,
            ContinuationDecision::Stop(StopReason::PassedTargetYear { last_year: 2022 })
        );
        assert!(agg.finalize().is_empty());
    }

    #[test]
    fn test_two_pages_crossing_year() {
        let mut agg = YearAggregator::new(2023);

        let first = [record(40, 2023, 2000, 5, 5), record(39, 2023, 2100, 6, 6)];
        assert_eq!(
            agg.consume(&first).unwrap(),
            ContinuationDecision::Continue { cursor: 39 }
        );

        let second = [record(38, 2022, 2000, 50, 50), record(37, 2022, 2100, 60, 60)];
        assert!(matches!(
            agg.consume(&second).unwrap(),
            ContinuationDecision::Stop(StopReason::PassedTargetYear { .. })
        ));

        let acc = agg.finalize();
        assert_eq!(acc.total_count(), 2);
        assert_eq!(acc.total_kills(), 22);
    }

    #[test]
    fn test_newer_years_are_skipped_but_continue() {
        let mut agg = YearAggregator::new(2022);
        let page = [record(50, 2024, 2000, 1, 1), record(49, 2023, 2000, 1, 1)];

        assert_eq!(
            agg.consume(&page).unwrap(),
            ContinuationDecision::Continue { cursor: 49 }
        );
        assert!(agg.accumulator().is_empty());
    }

    #[test]
    fn test_page_straddling_boundary_in_middle_continues() {
        // Only the last record is checked, so the 2022 match in the middle
        // neither counts nor stops pagination.
        let mut agg = YearAggregator::new(2023);
        let page = [
            record(12, 2023, 2000, 1, 1),
            record(11, 2022, 2000, 1, 1),
            record(10, 2023, 2000, 1, 1),
        ];

        assert_eq!(
            agg.consume(&page).unwrap(),
            ContinuationDecision::Continue { cursor: 10 }
        );
        assert_eq!(agg.accumulator().total_count(), 2);
    }

    #[test]
    fn test_year_uses_utc() {
        let mut agg = YearAggregator::new(2023);
        let new_years_eve = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let new_year = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let page = [
            MatchRecord::new(2, new_year.timestamp(), 2000, 1, 1),
            MatchRecord::new(1, new_years_eve.timestamp(), 2000, 1, 1),
        ];

        agg.consume(&page).unwrap();
        let acc = agg.finalize();
        assert_eq!(acc.total_count(), 1);
        assert_eq!(
            acc.date_span().unwrap().0,
            chrono::NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_invalid_timestamp_fails() {
        let mut agg = YearAggregator::new(2023);
        let page = [MatchRecord::new(7, i64::MIN, 2000, 1, 1)];
        assert!(matches!(
            agg.consume(&page),
            Err(DataError::InvalidTimestamp { match_id: 7, .. })
        ));
    }

    #[test]
    fn test_bucket_counts_sum_to_total() {
        // Deterministic pseudo-random durations and years
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let mut agg = YearAggregator::new(2023);
        let mut id = 100_000;
        for _ in 0..20 {
            let page: Vec<_> = (0..50)
                .map(|_| {
                    id -= 1;
                    let year = 2022 + (next() % 3) as i32;
                    let duration = (next() % 4800) as u32;
                    record(id, year, duration, (next() % 60) as u32, (next() % 60) as u32)
                })
                .collect();
            agg.consume(&page).unwrap();
        }

        let acc = agg.finalize();
        let bucket_sum: u64 = DurationBucket::all()
            .iter()
            .map(|b| acc.bucket(*b).count)
            .sum();
        assert!(acc.total_count() > 0);
        assert_eq!(bucket_sum, acc.total_count());
        assert_eq!(acc.total_kills(), acc.radiant_kills() + acc.dire_kills());
        assert!(acc.longest().unwrap().duration >= acc.shortest().unwrap().duration);
    }

    #[test]
    fn test_next_cursor() {
        assert_eq!(
            ContinuationDecision::Continue { cursor: 5 }.next_cursor(),
            Some(5)
        );
        assert_eq!(
            ContinuationDecision::Stop(StopReason::FeedExhausted).next_cursor(),
            None
        );
    }
}

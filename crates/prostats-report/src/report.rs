//! Immutable statistics report.

use chrono::NaiveDate;
use prostats_aggregate::{Accumulator, Extreme};
use prostats_types::{DurationBucket, MatchId, NoDataError};
use serde::Serialize;

/// Inclusive range of match start dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    /// Earliest start date.
    pub first: NaiveDate,
    /// Latest start date.
    pub last: NaiveDate,
}

impl std::fmt::Display for DateSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.first, self.last)
    }
}

/// Statistics for one duration bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketSummary {
    /// The bucket described.
    pub bucket: DurationBucket,
    /// Number of matches in the bucket.
    pub count: u64,
    /// Share of all matches, in percent.
    pub percentage: f64,
    /// Average kills per match, 0 for an empty bucket.
    pub average_kills: f64,
}

/// Aggregate statistics for the pro matches of one year.
///
/// Built once by [`ReportBuilder::build`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    year: i32,
    date_range: DateSpan,
    total_matches: u64,
    average_duration_minutes: f64,
    longest: Extreme,
    shortest: Extreme,
    buckets: [BucketSummary; 3],
    average_total_kills: f64,
    average_radiant_kills: f64,
    average_dire_kills: f64,
    pages_scanned: u64,
    records_scanned: u64,
}

impl Report {
    /// Returns the year the report covers.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the first and last match dates.
    #[must_use]
    pub const fn date_range(&self) -> DateSpan {
        self.date_range
    }

    /// Returns the number of matches analyzed.
    #[must_use]
    pub const fn total_matches(&self) -> u64 {
        self.total_matches
    }

    /// Returns the average match duration in minutes.
    #[must_use]
    pub const fn average_duration_minutes(&self) -> f64 {
        self.average_duration_minutes
    }

    /// Returns the longest match.
    #[must_use]
    pub const fn longest(&self) -> Extreme {
        self.longest
    }

    /// Returns the shortest match.
    #[must_use]
    pub const fn shortest(&self) -> Extreme {
        self.shortest
    }

    /// Returns the id of the longest match.
    #[must_use]
    pub const fn longest_match_id(&self) -> MatchId {
        self.longest.match_id
    }

    /// Returns the id of the shortest match.
    #[must_use]
    pub const fn shortest_match_id(&self) -> MatchId {
        self.shortest.match_id
    }

    /// Returns the summary of one duration bucket.
    #[must_use]
    pub const fn bucket(&self, bucket: DurationBucket) -> &BucketSummary {
        &self.buckets[bucket.index()]
    }

    /// Returns all bucket summaries, shortest first.
    #[must_use]
    pub const fn buckets(&self) -> &[BucketSummary] {
        &self.buckets
    }

    /// Returns the average combined kills per match.
    #[must_use]
    pub const fn average_total_kills(&self) -> f64 {
        self.average_total_kills
    }

    /// Returns the average Radiant kills per match.
    #[must_use]
    pub const fn average_radiant_kills(&self) -> f64 {
        self.average_radiant_kills
    }

    /// Returns the average Dire kills per match.
    #[must_use]
    pub const fn average_dire_kills(&self) -> f64 {
        self.average_dire_kills
    }

    /// Returns the number of feed pages requested.
    #[must_use]
    pub const fn pages_scanned(&self) -> u64 {
        self.pages_scanned
    }

    /// Returns the number of records scanned across all years.
    #[must_use]
    pub const fn records_scanned(&self) -> u64 {
        self.records_scanned
    }
}

/// Builds reports from finished accumulators.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder;

impl ReportBuilder {
    /// Computes the report for a finished accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`NoDataError`] if the accumulator holds no matches.
    pub fn build(accumulator: &Accumulator) -> Result<Report, NoDataError> {
        let no_data = NoDataError {
            year: accumulator.year(),
        };
        if accumulator.is_empty() {
            return Err(no_data);
        }
        let (Some(longest), Some(shortest), Some((first, last))) = (
            accumulator.longest(),
            accumulator.shortest(),
            accumulator.date_span(),
        ) else {
            return Err(no_data);
        };

        let total = accumulator.total_count() as f64;
        let per_match = |sum: u64| sum as f64 / total;

        let buckets = DurationBucket::ALL.map(|bucket| {
            let totals = accumulator.bucket(bucket);
            BucketSummary {
                bucket,
                count: totals.count,
                percentage: totals.count as f64 / total * 100.0,
                average_kills: if totals.count == 0 {
                    0.0
                } else {
                    totals.kills as f64 / totals.count as f64
                },
            }
        });

        Ok(Report {
            year: accumulator.year(),
            date_range: DateSpan { first, last },
            total_matches: accumulator.total_count(),
            average_duration_minutes: per_match(accumulator.total_duration()) / 60.0,
            longest,
            shortest,
            buckets,
            average_total_kills: per_match(accumulator.total_kills()),
            average_radiant_kills: per_match(accumulator.radiant_kills()),
            average_dire_kills: per_match(accumulator.dire_kills()),
            pages_scanned: accumulator.pages_scanned(),
            records_scanned: accumulator.records_scanned(),
        })
    }
}

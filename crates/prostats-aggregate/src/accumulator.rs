//! Running totals for a single year.

use chrono::NaiveDate;
use prostats_types::{DurationBucket, MatchId, MatchRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Count and kill sum for one duration bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTotals {
    /// Number of matches in the bucket.
    pub count: u64,
    /// Combined kills of those matches.
    pub kills: u64,
}

/// A match at one end of the duration range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extreme {
    /// The match identifier.
    pub match_id: MatchId,
    /// The match duration in seconds.
    pub duration: u32,
}

impl Extreme {
    /// Returns the duration in minutes.
    #[must_use]
    pub fn minutes(&self) -> f64 {
        f64::from(self.duration) / 60.0
    }
}

/// Running statistics for the matches of one year.
///
/// Only [`YearAggregator`](crate::YearAggregator) adds matches, so the
/// bucket counts always sum to [`Accumulator::total_count`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    year: i32,
    total_count: u64,
    total_duration: u64,
    radiant_kills: u64,
    dire_kills: u64,
    buckets: [BucketTotals; 3],
    longest: Option<Extreme>,
    shortest: Option<Extreme>,
    dates: BTreeSet<NaiveDate>,
    pages_scanned: u64,
    records_scanned: u64,
}

impl Accumulator {
    /// Creates an empty accumulator for `year`.
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self {
            year,
            total_count: 0,
            total_duration: 0,
            radiant_kills: 0,
            dire_kills: 0,
            buckets: [BucketTotals { count: 0, kills: 0 }; 3],
            longest: None,
            shortest: None,
            dates: BTreeSet::new(),
            pages_scanned: 0,
            records_scanned: 0,
        }
    }

    /// Adds a match that started on `date` within the accumulator's year.
    pub(crate) fn add(&mut self, record: &MatchRecord, date: NaiveDate) {
        let kills = record.total_kills();

        self.total_count += 1;
        self.total_duration += u64::from(record.duration);
        self.radiant_kills += u64::from(record.radiant_score);
        self.dire_kills += u64::from(record.dire_score);

        let bucket = &mut self.buckets[DurationBucket::classify(record.duration).index()];
        bucket.count += 1;
        bucket.kills += kills;

        let candidate = Extreme {
            match_id: record.match_id,
            duration: record.duration,
        };
        // Ties keep the first match seen
        match self.longest {
            Some(current) if current.duration >= record.duration => {}
            _ => self.longest = Some(candidate),
        }
        match self.shortest {
            Some(current) if current.duration <= record.duration => {}
            _ => self.shortest = Some(candidate),
        }

        self.dates.insert(date);
    }

    /// Records that a page of `records` matches was scanned.
    pub(crate) const fn note_page(&mut self, records: usize) {
        self.pages_scanned += 1;
        self.records_scanned += records as u64;
    }

    /// Returns the year being accumulated.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the number of matches accumulated.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns true if no match has been accumulated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Returns the summed duration in seconds.
    #[must_use]
    pub const fn total_duration(&self) -> u64 {
        self.total_duration
    }

    /// Returns the summed kills of both sides.
    #[must_use]
    pub const fn total_kills(&self) -> u64 {
        self.radiant_kills + self.dire_kills
    }

    /// Returns the summed Radiant kills.
    #[must_use]
    pub const fn radiant_kills(&self) -> u64 {
        self.radiant_kills
    }

    /// Returns the summed Dire kills.
    #[must_use]
    pub const fn dire_kills(&self) -> u64 {
        self.dire_kills
    }

    /// Returns the totals for one duration bucket.
    #[must_use]
    pub const fn bucket(&self, bucket: DurationBucket) -> BucketTotals {
        self.buckets[bucket.index()]
    }

    /// Returns the longest match seen, if any.
    #[must_use]
    pub const fn longest(&self) -> Option<Extreme> {
        self.longest
    }

    /// Returns the shortest match seen, if any.
    #[must_use]
    pub const fn shortest(&self) -> Option<Extreme> {
        self.shortest
    }

    /// Returns the earliest and latest start dates seen, if any.
    #[must_use]
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }

    /// Returns the number of pages scanned, including the final empty page.
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

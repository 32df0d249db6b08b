//! Pro match record representation.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Identifier of a match in the feed.
///
/// Newer matches have larger ids, which is what makes the id usable as a
/// pagination cursor.
pub type MatchId = u64;

/// A single professional match as returned by the `proMatches` feed.
///
/// Only the fields needed for aggregation are kept; anything else the feed
/// sends is ignored during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique match identifier.
    pub match_id: MatchId,
    /// Match start time in Unix seconds (UTC).
    pub start_time: i64,
    /// Match duration in seconds.
    pub duration: u32,
    /// Kills scored by the Radiant side.
    pub radiant_score: u32,
    /// Kills scored by the Dire side.
    pub dire_score: u32,
}

impl MatchRecord {
    /// Creates a new match record.
    #[must_use]
    pub const fn new(
        match_id: MatchId,
        start_time: i64,
        duration: u32,
        radiant_score: u32,
        dire_score: u32,
    ) -> Self {
        Self {
            match_id,
            start_time,
            duration,
            radiant_score,
            dire_score,
        }
    }

    /// Returns the start time as a UTC timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if `start_time` is outside the range chrono can represent.
    pub fn start_datetime(&self) -> Result<DateTime<Utc>, DataError> {
        DateTime::from_timestamp(self.start_time, 0).ok_or(DataError::InvalidTimestamp {
            match_id: self.match_id,
            start_time: self.start_time,
        })
    }

    /// Returns the calendar year the match started in (UTC).
    ///
    /// # Errors
    ///
    /// Returns an error if the start time cannot be represented.
    pub fn year(&self) -> Result<i32, DataError> {
        self.start_datetime().map(|dt| dt.year())
    }

    /// Returns the calendar date the match started on (UTC).
    ///
    /// # Errors
    ///
    /// Returns an error if the start time cannot be represented.
    pub fn date(&self) -> Result<NaiveDate, DataError> {
        self.start_datetime().map(|dt| dt.date_naive())
    }

    /// Returns the combined kills of both sides.
    #[must_use]
    pub const fn total_kills(&self) -> u64 {
        self.radiant_score as u64 + self.dire_score as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(year: i32, month: u32, day: u32, hour: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .unwrap()
            .timestamp()
    }

    #[test]
    fn test_year_and_date_are_utc() {
        // 23:00 UTC on Dec 31 is still the old year regardless of local time
        let record = MatchRecord::new(1, ts(2022, 12, 31, 23), 1900, 10, 20);
        assert_eq!(record.year().unwrap(), 2022);
        assert_eq!(
            record.date().unwrap(),
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_total_kills() {
        let record = MatchRecord::new(1, 0, 1900, 10, 20);
        assert_eq!(record.total_kills(), 30);

        let record = MatchRecord::new(1, 0, 1900, u32::MAX, u32::MAX);
        assert_eq!(record.total_kills(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_invalid_timestamp() {
        let record = MatchRecord::new(42, i64::MAX, 1900, 10, 20);
        assert!(matches!(
            record.year(),
            Err(DataError::InvalidTimestamp { match_id: 42, .. })
        ));
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{
            "match_id": 7000000001,
            "duration": 2345,
            "start_time": 1700000000,
            "radiant_team_id": 15,
            "radiant_name": "Team A",
            "league_name": "Some League",
            "radiant_score": 31,
            "dire_score": 12,
            "radiant_win": true
        }"#;
        let record: MatchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, MatchRecord::new(7_000_000_001, 1_700_000_000, 2345, 31, 12));
    }

    #[test]
    fn test_deserialize_missing_field_fails() {
        let json = r#"{"match_id": 1, "start_time": 1700000000, "duration": 2000, "radiant_score": 3}"#;
        assert!(serde_json::from_str::<MatchRecord>(json).is_err());
    }
}

//! Match duration buckets.

use serde::{Deserialize, Serialize};

/// Duration classification used to partition aggregate statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationBucket {
    /// Under 30 minutes.
    Short,
    /// 30 to 40 minutes, both ends inclusive.
    Medium,
    /// Over 40 minutes.
    Long,
}

impl DurationBucket {
    /// Shortest duration (seconds) that counts as a medium game.
    pub const MEDIUM_MIN_SECS: u32 = 1800;

    /// Longest duration (seconds) that still counts as a medium game.
    pub const MEDIUM_MAX_SECS: u32 = 2400;

    /// Classifies a duration in seconds into exactly one bucket.
    ///
    /// # Example
    ///
    /// ```
    /// use prostats_types::DurationBucket;
    ///
    /// assert_eq!(DurationBucket::classify(1799), DurationBucket::Short);
    /// assert_eq!(DurationBucket::classify(2400), DurationBucket::Medium);
    /// assert_eq!(DurationBucket::classify(2401), DurationBucket::Long);
    /// ```
    #[must_use]
    pub const fn classify(duration_secs: u32) -> Self {
        if duration_secs < Self::MEDIUM_MIN_SECS {
            Self::Short
        } else if duration_secs <= Self::MEDIUM_MAX_SECS {
            Self::Medium
        } else {
            Self::Long
        }
    }

    /// All buckets, shortest first.
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Returns all buckets, shortest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// Returns the position of this bucket in [`DurationBucket::all`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Short => 0,
            Self::Medium => 1,
            Self::Long => 2,
        }
    }

    /// Returns the bucket as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Returns a human-readable label including the duration range.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Short => "Short games (<30 mins)",
            Self::Medium => "Medium games (30-40 mins)",
            Self::Long => "Long games (>40 mins)",
        }
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

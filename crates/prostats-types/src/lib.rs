//! Core types for the prostats pro match statistics tool.
//!
//! This crate provides the fundamental data structures used throughout prostats:
//!
//! - [`MatchRecord`] - A single pro match as returned by the feed
//! - [`MatchId`] - Match identifier, also used as the pagination cursor
//! - [`DurationBucket`] - Short/medium/long classification of match durations

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/prostats/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bucket;
mod error;
mod match_record;

pub use bucket::DurationBucket;
pub use error::{DataError, NoDataError, ProstatsError, Result};
pub use match_record::{MatchId, MatchRecord};

//! Streaming per-year match aggregation for prostats.
//!
//! This crate provides the accumulation side of a statistics run:
//!
//! - [`Accumulator`] - Running totals for one year
//! - [`YearAggregator`] - Page-by-page aggregator with the pagination stop rule
//! - [`ContinuationDecision`] - Whether another page should be fetched

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/prostats/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accumulator;
mod aggregator;

pub use accumulator::{Accumulator, BucketTotals, Extreme};
pub use aggregator::{ContinuationDecision, StopReason, YearAggregator};

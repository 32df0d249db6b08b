//! HTTP feed client for the prostats pro match statistics tool.
//!
//! This crate provides the page fetching side of a statistics run:
//!
//! - [`url::pro_matches_url`] - Constructs the feed endpoint URL
//! - [`FeedClient`] - HTTP client with rate-limit retries and cancellation
//! - [`RetryPolicy`] - Bounded exponential back-off for HTTP 429 responses
//! - [`parse_page`] - JSON page decoding
//! - [`MatchFeed`] - Page source abstraction used by the driver

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/prostats/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod feed;
mod parse;
pub mod url;

pub use client::{ClientConfig, FeedClient, FetchError, RetryPolicy};
pub use feed::MatchFeed;
pub use parse::{ParseError, first_order_violation, parse_page};

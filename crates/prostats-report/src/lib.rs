//! Report building and output formatters for prostats.
//!
//! - [`ReportBuilder`] - Converts a finished accumulator into a [`Report`]
//! - [`TextFormatter`] - Human-readable narrative output
//! - [`JsonFormatter`] - JSON output

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/prostats/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod formatter;
mod json;
mod report;
mod text;

pub use formatter::{FormatError, OutputFormat, ReportFormatter};
pub use json::JsonFormatter;
pub use report::{BucketSummary, DateSpan, Report, ReportBuilder};
pub use text::TextFormatter;

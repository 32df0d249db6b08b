//! CLI command implementations.

pub(crate) mod link;
pub(crate) mod stats;

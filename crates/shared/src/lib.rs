#![warn(missing_docs)]

//! Common types and utilities shared between the mcpack crates, most notably
//! the [output::PackOutput] trait that every build step reports through

/// Reporting messages from packing processes
pub mod output;
/// Common utilities
pub mod util;

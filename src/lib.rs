//! buildpair - Buildbot stage duration report
//!
//! Loads build data for four builders (from a local cache or the Buildbot
//! API), pairs each initiator build with the upload it produced, and
//! renders how long each browser run took.

pub mod builds;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod pairing;
pub mod report;
pub mod ui;

pub use error::{BuildPairError, BuildPairResult};

//! Testing infrastructure for levelscope integration tests.
//!
//! - `TestWorld`: isolated temp directory plus a runner for the binary
//! - `fixtures`: telemetry CSV builders and canned datasets
//! - `assertions`: checks over the files a run writes

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::{Attempt, TelemetryCsv};
pub use world::{CliResult, TestWorld};

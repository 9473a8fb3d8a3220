// levelscope CLI: load telemetry, write cleaned/summary tables, render charts.

mod args;
pub mod charts;
mod commands;
pub mod config;
mod handlers;
pub mod output;
pub mod services;
pub mod types;

pub use args::{Cli, DEFAULT_OUT_DIR};
pub use commands::run;

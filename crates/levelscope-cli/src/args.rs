use crate::types::{LogLevel, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_OUT_DIR: &str = "out_charts_new";

#[derive(Parser, Debug)]
#[command(name = "levelscope")]
#[command(about = "Derive per-level ASR, RL, DAR and RMI metrics from gameplay telemetry", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the telemetry CSV (one row per level attempt)
    #[arg(long)]
    pub csv: PathBuf,

    /// Output directory, created if missing
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Optional TOML file overriding metric and chart settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "plain")]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn")]
    pub log_level: LogLevel,
}

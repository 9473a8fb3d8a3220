use crate::charts::{ChartOutcome, ChartReport};
use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;

/// What one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub rows: usize,
    pub sessions: usize,
    pub levels: Vec<String>,
    pub files: Vec<String>,
    pub charts: Vec<ChartReport>,
}

impl RunReport {
    /// Charts that did not render normally from the data.
    pub fn degraded_charts(&self) -> impl Iterator<Item = &ChartReport> {
        self.charts
            .iter()
            .filter(|c| c.outcome != ChartOutcome::Rendered)
    }
}

pub fn confirmation_line(report: &RunReport) -> String {
    format!(
        "Charts and summaries saved in: {}",
        report.output_dir.display()
    )
}

pub fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Plain => {
            let line = confirmation_line(report);
            if std::io::stdout().is_terminal() {
                println!("{} {}", "✓".green(), line);
                for chart in report.degraded_charts() {
                    println!(
                        "  {} {} ({})",
                        "!".yellow(),
                        chart.file,
                        format!("{:?}", chart.outcome).to_lowercase()
                    );
                }
            } else {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

use crate::charts::{self, ChartReport, ChartStyle};
use crate::config::Config;
use crate::output::{self, RunReport};
use crate::services::writer::{self, GLOBAL_SUMMARY_HEADERS, LEVEL_SUMMARY_HEADERS, RMI_HEADERS};
use crate::services::{
    self, CLEANED_FILE, DIAGNOSTICS_FILE, GLOBAL_SUMMARY_FILE, LEVEL_SUMMARY_FILE, RMI_FILE,
    RMI_PER_SESSION_FILE,
};
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the whole pipeline: load, clean, chart, aggregate, write, report.
pub fn handle(csv: &Path, out: &Path, config: &Config, format: OutputFormat) -> Result<()> {
    let out_dir = services::ensure_output_dir(out)?;

    let table = levelscope_engine::load_path(csv, &config.metrics)
        .with_context(|| format!("Failed to load telemetry CSV: {}", csv.display()))?;
    log::info!("loaded {} cleaned rows from {}", table.len(), csv.display());

    let mut files = Vec::new();
    let mut charts_written: Vec<ChartReport> = Vec::new();
    let style = ChartStyle::from_settings(&config.charts);

    writer::write_cleaned_table(&out_dir.join(CLEANED_FILE), &table)?;
    files.push(CLEANED_FILE.to_string());

    charts_written.push(charts::save(
        charts::draw_asr_density(&table, &style),
        &out_dir,
        charts::ASR_DENSITY_FILE,
    ));
    charts_written.push(charts::save(
        charts::draw_rl_histogram(&table, &style),
        &out_dir,
        charts::RL_HIST_FILE,
    ));
    charts_written.push(charts::save(
        charts::draw_dar_bars(&table, &style),
        &out_dir,
        charts::DAR_BAR_FILE,
    ));

    let analysis = levelscope_engine::analyze(&table);

    writer::write_table(&out_dir.join(RMI_FILE), RMI_HEADERS, &analysis.rmi)?;
    files.push(RMI_FILE.to_string());
    charts_written.push(charts::save(
        charts::draw_rmi_bars(&analysis.rmi, &style),
        &out_dir,
        charts::RMI_BAR_FILE,
    ));

    writer::write_table(
        &out_dir.join(LEVEL_SUMMARY_FILE),
        LEVEL_SUMMARY_HEADERS,
        &analysis.levels,
    )?;
    files.push(LEVEL_SUMMARY_FILE.to_string());

    writer::write_table(
        &out_dir.join(GLOBAL_SUMMARY_FILE),
        GLOBAL_SUMMARY_HEADERS,
        std::slice::from_ref(&analysis.global),
    )?;
    files.push(GLOBAL_SUMMARY_FILE.to_string());

    writer::write_table(
        &out_dir.join(RMI_PER_SESSION_FILE),
        RMI_HEADERS,
        &analysis.rmi,
    )?;
    files.push(RMI_PER_SESSION_FILE.to_string());

    writer::write_text(
        &out_dir.join(DIAGNOSTICS_FILE),
        &analysis.diagnostics.render(),
    )?;
    files.push(DIAGNOSTICS_FILE.to_string());

    for file in &files {
        log::info!("wrote {}", out_dir.join(file).display());
    }

    let report = RunReport {
        output_dir: out_dir,
        rows: analysis.diagnostics.rows,
        sessions: analysis.diagnostics.sessions,
        levels: analysis.diagnostics.levels.clone(),
        files,
        charts: charts_written,
    };
    output::print_report(&report, format)
}

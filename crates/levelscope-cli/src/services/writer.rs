use anyhow::{Context, Result};
use levelscope_types::{CleanedRecord, CleanedTable, TIMESTAMP_FORMAT};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const CLEANED_HEADERS: &[&str] = &[
    "session_id",
    "level_id",
    "attempt_number_in_session",
    "level_outcome",
    "level_duration_ms",
    "level_duration_s",
    "total_kill_attempts",
    "correct_kills",
    "wrong_kills",
    "avg_speed",
    "mean_reaction_latency_ms",
    "mean_reaction_latency_s",
    "timestamp",
    "ASR",
    "RL_s",
    "RL_s_clamped",
    "DAR",
];

pub const RMI_HEADERS: &[&str] = &["level_id", "fail_sessions", "retry_sessions", "RMI_pct"];

pub const LEVEL_SUMMARY_HEADERS: &[&str] = &[
    "level_id",
    "sessions",
    "mean_ASR",
    "median_ASR",
    "mean_RL_s",
    "median_RL_s",
    "mean_DAR",
    "median_DAR",
];

pub const GLOBAL_SUMMARY_HEADERS: &[&str] = &[
    "sessions",
    "mean_ASR",
    "median_ASR",
    "mean_RL_s",
    "median_RL_s",
    "mean_DAR",
    "median_DAR",
];

fn csv_writer(path: &Path) -> Result<csv::Writer<fs::File>> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    Ok(csv::WriterBuilder::new().has_headers(false).from_writer(file))
}

fn number(value: Option<f64>) -> String {
    value.map(|v| format!("{:?}", v)).unwrap_or_default()
}

fn cleaned_row(record: &CleanedRecord, table: &CleanedTable) -> Vec<String> {
    let a = &record.attempt;
    let m = &record.metrics;
    let mut row = vec![
        a.session_id.clone(),
        a.level_id.clone(),
        number(a.attempt_number),
        a.level_outcome.clone(),
        number(a.level_duration_ms),
        number(m.level_duration_s),
        number(a.total_kill_attempts),
        number(a.correct_kills),
        number(a.wrong_kills),
        number(a.avg_speed),
        number(a.mean_reaction_latency_ms),
        number(m.mean_reaction_latency_s),
        a.timestamp
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default(),
        number(m.asr),
        number(m.rl_s),
        number(m.rl_s_clamped),
        number(m.dar),
    ];
    if table.optional_columns.retry_after_failure {
        row.push(number(a.retry_after_failure));
    }
    if table.optional_columns.retry_count_within_5min {
        row.push(number(a.retry_count_within_5min));
    }
    row
}

/// Write every cleaned row with its derived metrics. Retry columns follow
/// the fixed columns only when the source carried them.
pub fn write_cleaned_table(path: &Path, table: &CleanedTable) -> Result<()> {
    let mut writer = csv_writer(path)?;
    let mut headers: Vec<&str> = CLEANED_HEADERS.to_vec();
    if table.optional_columns.retry_after_failure {
        headers.push(levelscope_engine::loader::RETRY_AFTER_FAILURE_COLUMN);
    }
    if table.optional_columns.retry_count_within_5min {
        headers.push(levelscope_engine::loader::RETRY_COUNT_WITHIN_5MIN_COLUMN);
    }
    writer.write_record(&headers)?;
    for record in table.iter() {
        writer.write_record(cleaned_row(record, table))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

/// Write `rows` under an explicit header line, so an empty table still
/// produces a header-only file. `headers` must match the serialized field
/// names of `T`.
pub fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv_writer(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write file: {}", path.display()))
}

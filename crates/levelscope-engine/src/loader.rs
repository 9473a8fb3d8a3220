use crate::clean::clean_attempt;
use crate::{Error, Result};
use levelscope_types::{
    AttemptRecord, CleanedTable, MetricSettings, OptionalColumns, TIMESTAMP_COLUMNS, parse_numeric,
    parse_timestamp,
};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns every telemetry CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "session_id",
    "level_id",
    "attempt_number_in_session",
    "level_outcome",
    "level_duration_ms",
    "total_kill_attempts",
    "correct_kills",
    "wrong_kills",
    "avg_speed",
    "mean_reaction_latency_ms",
];

pub const RETRY_AFTER_FAILURE_COLUMN: &str = "retry_after_failure";
pub const RETRY_COUNT_WITHIN_5MIN_COLUMN: &str = "retry_count_within_5min";

/// Header positions resolved once per file.
#[derive(Debug)]
struct ColumnIndex {
    session_id: usize,
    level_id: usize,
    attempt_number: usize,
    level_outcome: usize,
    level_duration_ms: usize,
    total_kill_attempts: usize,
    correct_kills: usize,
    wrong_kills: usize,
    avg_speed: usize,
    mean_reaction_latency_ms: usize,
    timestamp: Option<(usize, String)>,
    retry_after_failure: Option<usize>,
    retry_count_within_5min: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let names: Vec<&str> = headers.iter().map(str::trim).collect();
        let find = |name: &str| names.iter().position(|h| *h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| find(name).is_none())
            .map(|&name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }

        let required =
            |name: &str| find(name).ok_or_else(|| Error::MissingColumns(vec![name.to_string()]));

        let timestamp = TIMESTAMP_COLUMNS
            .iter()
            .find_map(|&name| find(name).map(|idx| (idx, name.to_string())));

        Ok(Self {
            session_id: required("session_id")?,
            level_id: required("level_id")?,
            attempt_number: required("attempt_number_in_session")?,
            level_outcome: required("level_outcome")?,
            level_duration_ms: required("level_duration_ms")?,
            total_kill_attempts: required("total_kill_attempts")?,
            correct_kills: required("correct_kills")?,
            wrong_kills: required("wrong_kills")?,
            avg_speed: required("avg_speed")?,
            mean_reaction_latency_ms: required("mean_reaction_latency_ms")?,
            timestamp,
            retry_after_failure: find(RETRY_AFTER_FAILURE_COLUMN),
            retry_count_within_5min: find(RETRY_COUNT_WITHIN_5MIN_COLUMN),
        })
    }

    fn optional_columns(&self) -> OptionalColumns {
        OptionalColumns {
            retry_after_failure: self.retry_after_failure.is_some(),
            retry_count_within_5min: self.retry_count_within_5min.is_some(),
        }
    }

    fn read(&self, row: &csv::StringRecord) -> AttemptRecord {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let numeric = |idx: usize| parse_numeric(cell(idx));

        AttemptRecord {
            session_id: cell(self.session_id).to_string(),
            level_id: cell(self.level_id).to_string(),
            attempt_number: numeric(self.attempt_number),
            level_outcome: cell(self.level_outcome).to_lowercase(),
            level_duration_ms: numeric(self.level_duration_ms),
            total_kill_attempts: numeric(self.total_kill_attempts),
            correct_kills: numeric(self.correct_kills),
            wrong_kills: numeric(self.wrong_kills),
            avg_speed: numeric(self.avg_speed),
            mean_reaction_latency_ms: numeric(self.mean_reaction_latency_ms),
            timestamp: self
                .timestamp
                .as_ref()
                .and_then(|(idx, _)| parse_timestamp(cell(*idx))),
            retry_after_failure: self.retry_after_failure.and_then(numeric),
            retry_count_within_5min: self.retry_count_within_5min.and_then(numeric),
        }
    }
}

/// Load and clean a telemetry CSV from disk.
pub fn load_path(path: &Path, settings: &MetricSettings) -> Result<CleanedTable> {
    let file = File::open(path)?;
    load_reader(file, settings)
}

/// Load and clean telemetry from any CSV source.
///
/// Fails only on I/O, undecodable CSV, or missing required columns; bad
/// cells become nulls.
pub fn load_reader<R: Read>(reader: R, settings: &MetricSettings) -> Result<CleanedTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rdr.records() {
        let row = row?;
        match clean_attempt(columns.read(&row), settings) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    log::debug!(
        "loaded {} rows ({} dropped with no key fields)",
        records.len(),
        dropped
    );

    Ok(CleanedTable {
        records,
        optional_columns: columns.optional_columns(),
        timestamp_column: columns.timestamp.map(|(_, name)| name),
    })
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One level attempt as read from the telemetry CSV, after type coercion.
///
/// Identifiers stay opaque strings. Every numeric cell is `None` when it was
/// empty or could not be parsed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub session_id: String,
    pub level_id: String,
    pub attempt_number: Option<f64>,
    /// Lower-cased outcome (`success`, `fail`, `quit`, ...).
    pub level_outcome: String,
    pub level_duration_ms: Option<f64>,
    pub total_kill_attempts: Option<f64>,
    pub correct_kills: Option<f64>,
    pub wrong_kills: Option<f64>,
    pub avg_speed: Option<f64>,
    pub mean_reaction_latency_ms: Option<f64>,
    pub timestamp: Option<NaiveDateTime>,
    pub retry_after_failure: Option<f64>,
    pub retry_count_within_5min: Option<f64>,
}

/// Per-row metrics derived from an [`AttemptRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub level_duration_s: Option<f64>,
    pub mean_reaction_latency_s: Option<f64>,
    /// Adaptive Speed Ratio.
    pub asr: Option<f64>,
    /// Reaction latency in seconds.
    pub rl_s: Option<f64>,
    pub rl_s_clamped: Option<f64>,
    /// Decision Accuracy Ratio.
    pub dar: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub attempt: AttemptRecord,
    pub metrics: DerivedMetrics,
}

impl CleanedRecord {
    /// Whether the attempt's outcome is a failure, ignoring case and padding.
    pub fn is_fail(&self) -> bool {
        self.attempt.level_outcome.trim().eq_ignore_ascii_case("fail")
    }
}

/// Optional source columns that feed retry detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionalColumns {
    pub retry_after_failure: bool,
    pub retry_count_within_5min: bool,
}

/// The cleaned telemetry table: surviving rows in input order plus the
/// schema facts later stages need.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CleanedTable {
    pub records: Vec<CleanedRecord>,
    pub optional_columns: OptionalColumns,
    /// Name of the source column timestamps were read from, if any.
    pub timestamp_column: Option<String>,
}

impl CleanedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CleanedRecord> {
        self.records.iter()
    }
}

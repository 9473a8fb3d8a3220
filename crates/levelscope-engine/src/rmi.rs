//! Retry Motivation Index.
//!
//! For every (session, level) pair that saw at least one failure, decide
//! whether the player came back for another go. Per level, RMI is the share
//! of such pairs that did.

use levelscope_types::{CleanedRecord, CleanedTable, OptionalColumns};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetryRecord {
    pub session_id: String,
    pub level_id: String,
    pub had_fail: bool,
    pub retried_after_failure: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRmi {
    pub level_id: String,
    pub fail_sessions: usize,
    pub retry_sessions: usize,
    #[serde(rename = "RMI_pct")]
    pub rmi_pct: Option<f64>,
}

/// Signals that can establish a retry after failure, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDetector {
    /// A later attempt number than the first failed one exists.
    AttemptNumber,
    /// Pre-computed `retry_after_failure` flag column.
    RetryAfterFailureFlag,
    /// Pre-computed `retry_count_within_5min` column.
    RetryCountWithin5Min,
}

impl RetryDetector {
    pub const ORDER: [RetryDetector; 3] = [
        RetryDetector::AttemptNumber,
        RetryDetector::RetryAfterFailureFlag,
        RetryDetector::RetryCountWithin5Min,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RetryDetector::AttemptNumber => "attempt-number",
            RetryDetector::RetryAfterFailureFlag => "retry-after-failure-flag",
            RetryDetector::RetryCountWithin5Min => "retry-count-within-5min",
        }
    }

    /// `None` when the detector has nothing to go on for this group.
    pub fn evaluate(self, group: &[&CleanedRecord], columns: &OptionalColumns) -> Option<bool> {
        match self {
            RetryDetector::AttemptNumber => {
                let first_fail = group
                    .iter()
                    .filter(|r| r.is_fail())
                    .filter_map(|r| r.attempt.attempt_number)
                    .min_by(|a, b| a.total_cmp(b))?;
                Some(
                    group
                        .iter()
                        .filter_map(|r| r.attempt.attempt_number)
                        .any(|n| n > first_fail),
                )
            }
            RetryDetector::RetryAfterFailureFlag => columns
                .retry_after_failure
                .then(|| any_positive(group, |r| r.attempt.retry_after_failure)),
            RetryDetector::RetryCountWithin5Min => columns
                .retry_count_within_5min
                .then(|| any_positive(group, |r| r.attempt.retry_count_within_5min)),
        }
    }
}

fn any_positive(group: &[&CleanedRecord], field: impl Fn(&CleanedRecord) -> Option<f64>) -> bool {
    group.iter().any(|&r| field(r).unwrap_or(0.0) > 0.0)
}

/// Classify one (session, level) group.
///
/// Returns `(had_fail, retried_after_failure)`. A group without failures
/// never counts as retried, whatever the optional columns say.
pub fn classify_group(group: &[&CleanedRecord], columns: &OptionalColumns) -> (bool, bool) {
    let had_fail = group.iter().any(|r| r.is_fail());
    if !had_fail {
        return (false, false);
    }

    let retried = RetryDetector::ORDER.iter().any(|detector| {
        let verdict = detector.evaluate(group, columns);
        if verdict == Some(true) {
            log::trace!("retry detected by {}", detector.name());
        }
        verdict == Some(true)
    });
    (true, retried)
}

/// Per (session, level) retry classification, sorted by session then level.
pub fn detect_retries(table: &CleanedTable) -> Vec<RetryRecord> {
    let mut groups: BTreeMap<(&str, &str), Vec<&CleanedRecord>> = BTreeMap::new();
    for record in table.iter() {
        groups
            .entry((record.attempt.session_id.as_str(), record.attempt.level_id.as_str()))
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|((session_id, level_id), mut group)| {
            // Ascending attempt number, unnumbered attempts last.
            group.sort_by(|a, b| match (a.attempt.attempt_number, b.attempt.attempt_number) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
            let (had_fail, retried_after_failure) = classify_group(&group, &table.optional_columns);
            RetryRecord {
                session_id: session_id.to_string(),
                level_id: level_id.to_string(),
                had_fail,
                retried_after_failure,
            }
        })
        .collect()
}

/// Roll per-pair records up to one row per level, sorted by level id.
pub fn aggregate_by_level(pairs: &[RetryRecord]) -> Vec<LevelRmi> {
    let mut levels: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for pair in pairs {
        let entry = levels.entry(pair.level_id.as_str()).or_default();
        if pair.had_fail {
            entry.0 += 1;
        }
        if pair.retried_after_failure {
            entry.1 += 1;
        }
    }

    levels
        .into_iter()
        .map(|(level_id, (fail_sessions, retry_sessions))| LevelRmi {
            level_id: level_id.to_string(),
            fail_sessions,
            retry_sessions,
            rmi_pct: (fail_sessions > 0)
                .then(|| 100.0 * retry_sessions as f64 / fail_sessions as f64),
        })
        .collect()
}

pub fn compute_rmi(table: &CleanedTable) -> Vec<LevelRmi> {
    let pairs = detect_retries(table);
    log::debug!("classified {} session/level pairs", pairs.len());
    aggregate_by_level(&pairs)
}

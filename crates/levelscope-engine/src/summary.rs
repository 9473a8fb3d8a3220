use crate::stats;
use levelscope_types::{CleanedRecord, CleanedTable};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSummary {
    pub level_id: String,
    pub sessions: usize,
    #[serde(rename = "mean_ASR")]
    pub mean_asr: Option<f64>,
    #[serde(rename = "median_ASR")]
    pub median_asr: Option<f64>,
    #[serde(rename = "mean_RL_s")]
    pub mean_rl_s: Option<f64>,
    #[serde(rename = "median_RL_s")]
    pub median_rl_s: Option<f64>,
    #[serde(rename = "mean_DAR")]
    pub mean_dar: Option<f64>,
    #[serde(rename = "median_DAR")]
    pub median_dar: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSummary {
    pub sessions: usize,
    #[serde(rename = "mean_ASR")]
    pub mean_asr: Option<f64>,
    #[serde(rename = "median_ASR")]
    pub median_asr: Option<f64>,
    #[serde(rename = "mean_RL_s")]
    pub mean_rl_s: Option<f64>,
    #[serde(rename = "median_RL_s")]
    pub median_rl_s: Option<f64>,
    #[serde(rename = "mean_DAR")]
    pub mean_dar: Option<f64>,
    #[serde(rename = "median_DAR")]
    pub median_dar: Option<f64>,
}

struct Aggregates {
    sessions: usize,
    asr: (Option<f64>, Option<f64>),
    rl_s: (Option<f64>, Option<f64>),
    dar: (Option<f64>, Option<f64>),
}

fn aggregate(records: &[&CleanedRecord]) -> Aggregates {
    let sessions: BTreeSet<&str> = records.iter().map(|r| r.attempt.session_id.as_str()).collect();
    let mean_median = |field: fn(&CleanedRecord) -> Option<f64>| {
        let values: Vec<f64> = records.iter().filter_map(|&r| field(r)).collect();
        (stats::mean(&values), stats::median(&values))
    };

    Aggregates {
        sessions: sessions.len(),
        asr: mean_median(|r| r.metrics.asr),
        rl_s: mean_median(|r| r.metrics.rl_s),
        dar: mean_median(|r| r.metrics.dar),
    }
}

/// Per-level session counts and mean/median metrics, sorted by level id.
pub fn summarize_levels(table: &CleanedTable) -> Vec<LevelSummary> {
    let mut levels: BTreeMap<&str, Vec<&CleanedRecord>> = BTreeMap::new();
    for record in table.iter() {
        levels.entry(record.attempt.level_id.as_str()).or_default().push(record);
    }

    levels
        .into_iter()
        .map(|(level_id, records)| {
            let agg = aggregate(&records);
            LevelSummary {
                level_id: level_id.to_string(),
                sessions: agg.sessions,
                mean_asr: agg.asr.0,
                median_asr: agg.asr.1,
                mean_rl_s: agg.rl_s.0,
                median_rl_s: agg.rl_s.1,
                mean_dar: agg.dar.0,
                median_dar: agg.dar.1,
            }
        })
        .collect()
}

pub fn summarize_global(table: &CleanedTable) -> GlobalSummary {
    let records: Vec<&CleanedRecord> = table.iter().collect();
    let agg = aggregate(&records);
    GlobalSummary {
        sessions: agg.sessions,
        mean_asr: agg.asr.0,
        median_asr: agg.asr.1,
        mean_rl_s: agg.rl_s.0,
        median_rl_s: agg.rl_s.1,
        mean_dar: agg.dar.0,
        median_dar: agg.dar.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelscope_types::{AttemptRecord, DerivedMetrics};

    fn record(session: &str, level: &str, asr: Option<f64>, dar: Option<f64>) -> CleanedRecord {
        CleanedRecord {
            attempt: AttemptRecord {
                session_id: session.to_string(),
                level_id: level.to_string(),
                ..Default::default()
            },
            metrics: DerivedMetrics {
                asr,
                dar,
                rl_s: Some(1.0),
                ..Default::default()
            },
        }
    }

    fn table(records: Vec<CleanedRecord>) -> CleanedTable {
        CleanedTable {
            records,
            ..Default::default()
        }
    }

    #[test]
    fn test_level_summary_counts_distinct_sessions() {
        let t = table(vec![
            record("a", "1", Some(0.5), Some(1.0)),
            record("a", "1", Some(1.5), None),
            record("b", "1", Some(1.0), Some(0.5)),
        ]);
        let levels = summarize_levels(&t);

        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].sessions, 2);
        assert_eq!(levels[0].mean_asr, Some(1.0));
        assert_eq!(levels[0].median_asr, Some(1.0));
        assert_eq!(levels[0].mean_dar, Some(0.75));
        assert_eq!(levels[0].median_dar, Some(0.75));
    }

    #[test]
    fn test_all_null_metric_summarizes_to_null() {
        let t = table(vec![record("a", "1", None, None)]);
        let levels = summarize_levels(&t);

        assert_eq!(levels[0].mean_asr, None);
        assert_eq!(levels[0].median_dar, None);
        assert_eq!(levels[0].mean_rl_s, Some(1.0));
    }

    #[test]
    fn test_levels_sorted_lexicographically() {
        let t = table(vec![
            record("a", "3", Some(1.0), None),
            record("a", "10", Some(1.0), None),
            record("a", "1", Some(1.0), None),
        ]);
        let ids: Vec<_> = summarize_levels(&t).into_iter().map(|l| l.level_id).collect();
        assert_eq!(ids, vec!["1", "10", "3"]);
    }

    #[test]
    fn test_global_summary() {
        let t = table(vec![
            record("a", "1", Some(0.5), None),
            record("b", "2", Some(2.0), None),
            record("b", "1", Some(1.0), None),
        ]);
        let global = summarize_global(&t);

        assert_eq!(global.sessions, 2);
        assert_eq!(global.mean_asr, Some(3.5 / 3.0));
        assert_eq!(global.median_asr, Some(1.0));
        assert_eq!(global.mean_dar, None);
    }

    #[test]
    fn test_global_summary_of_empty_table() {
        let global = summarize_global(&CleanedTable::default());
        assert_eq!(global.sessions, 0);
        assert_eq!(global.mean_asr, None);
    }
}

use crate::stats;
use levelscope_types::CleanedTable;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub rows: usize,
    pub sessions: usize,
    pub levels: Vec<String>,
    pub corr_asr_dar: Option<f64>,
    pub corr_rl_dar: Option<f64>,
}

impl Diagnostics {
    /// Plain-text report, one fact per line, no trailing newline.
    pub fn render(&self) -> String {
        let levels = if self.levels.is_empty() {
            "(none)".to_string()
        } else {
            self.levels.join(", ")
        };

        let mut lines = vec![
            format!("Rows after cleaning: {}", self.rows),
            format!("Unique sessions: {}", self.sessions),
            format!("Levels: {}", levels),
        ];
        if let Some(corr) = self.corr_asr_dar {
            lines.push(format!("Corr(ASR, DAR): {:.3}", corr));
        }
        if let Some(corr) = self.corr_rl_dar {
            lines.push(format!("Corr(RL_s, DAR): {:.3}", corr));
        }
        lines.join("\n")
    }
}

pub fn diagnose(table: &CleanedTable) -> Diagnostics {
    let sessions: BTreeSet<&str> = table.iter().map(|r| r.attempt.session_id.as_str()).collect();
    let levels: BTreeSet<&str> = table.iter().map(|r| r.attempt.level_id.as_str()).collect();

    let asr: Vec<Option<f64>> = table.iter().map(|r| r.metrics.asr).collect();
    let rl: Vec<Option<f64>> = table.iter().map(|r| r.metrics.rl_s).collect();
    let dar: Vec<Option<f64>> = table.iter().map(|r| r.metrics.dar).collect();

    Diagnostics {
        rows: table.len(),
        sessions: sessions.len(),
        levels: levels.into_iter().map(String::from).collect(),
        corr_asr_dar: gated_correlation(&asr, &dar),
        corr_rl_dar: gated_correlation(&rl, &dar),
    }
}

/// Pearson correlation, computed only when both series vary.
///
/// Spread is judged on the non-null values; the coefficient itself is taken
/// over the full series with nulls read as zero.
fn gated_correlation(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let varies = |series: &[Option<f64>]| {
        let present: Vec<f64> = series.iter().flatten().copied().collect();
        stats::population_std(&present).is_some_and(|std| std > 0.0)
    };
    if !varies(xs) || !varies(ys) {
        return None;
    }

    let zero_filled = |series: &[Option<f64>]| -> Vec<f64> {
        series.iter().map(|v| v.unwrap_or(0.0)).collect()
    };
    stats::pearson(&zero_filled(xs), &zero_filled(ys))
}

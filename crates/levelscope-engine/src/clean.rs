use levelscope_types::{AttemptRecord, CleanedRecord, DerivedMetrics, MetricSettings};

/// Derive the per-row metrics for one attempt.
///
/// Every derived value is finite or `None`.
pub fn derive_metrics(attempt: &AttemptRecord, settings: &MetricSettings) -> DerivedMetrics {
    let level_duration_s = finite(attempt.level_duration_ms.map(|ms| ms / 1000.0));
    let mean_reaction_latency_s =
        finite(attempt.mean_reaction_latency_ms.map(|ms| ms / 1000.0));

    let asr = if settings.base_movement_speed > 0.0 {
        finite(attempt.avg_speed.map(|speed| speed / settings.base_movement_speed))
    } else {
        None
    };

    let rl_s = mean_reaction_latency_s;
    let rl_s_clamped = rl_s.map(|rl| rl.min(settings.reaction_latency_clamp_s));

    let dar = match (attempt.total_kill_attempts, attempt.correct_kills) {
        (Some(total), Some(correct)) if total > 0.0 => finite(Some(correct / total)),
        _ => None,
    };

    DerivedMetrics {
        level_duration_s,
        mean_reaction_latency_s,
        asr,
        rl_s,
        rl_s_clamped,
        dar,
    }
}

/// A row carries no usable signal when all four key numeric fields are null.
pub fn is_empty_row(attempt: &AttemptRecord, metrics: &DerivedMetrics) -> bool {
    attempt.avg_speed.is_none()
        && metrics.level_duration_s.is_none()
        && attempt.total_kill_attempts.is_none()
        && attempt.correct_kills.is_none()
}

/// Derive metrics and apply the drop rule. `None` means the row is dropped.
pub fn clean_attempt(attempt: AttemptRecord, settings: &MetricSettings) -> Option<CleanedRecord> {
    let metrics = derive_metrics(&attempt, settings);
    if is_empty_row(&attempt, &metrics) {
        return None;
    }
    Some(CleanedRecord { attempt, metrics })
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

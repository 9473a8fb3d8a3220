use serde::{Deserialize, Serialize};

/// Baseline in-game movement speed used as the ASR denominator.
pub const BASE_MOVEMENT_SPEED: f64 = 6.0;

/// Upper bound applied to reaction latency (seconds) for `RL_s_clamped`.
pub const REACTION_LATENCY_CLAMP_S: f64 = 30.0;

/// Tunables for per-row metric derivation.
///
/// Defaults match the constants above; a config file may override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricSettings {
    pub base_movement_speed: f64,
    pub reaction_latency_clamp_s: f64,
}

impl Default for MetricSettings {
    fn default() -> Self {
        Self {
            base_movement_speed: BASE_MOVEMENT_SPEED,
            reaction_latency_clamp_s: REACTION_LATENCY_CLAMP_S,
        }
    }
}

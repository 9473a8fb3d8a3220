//! PNG charts for the four metrics.
//!
//! Every `draw_*` function is pure: it turns metric data into an
//! [`RgbImage`] plus a [`ChartOutcome`]. Writing to disk happens in
//! [`save`], which never fails the run.

mod asr;
mod bars;
mod canvas;
mod dar;
mod font;
mod frame;
mod placeholder;
mod rl;
mod rmi;
mod style;

pub use asr::{ASR_TITLE, draw_asr_density};
pub use dar::{DAR_TITLE, draw_dar_bars};
pub use placeholder::draw_placeholder;
pub use rl::{RL_TITLE, draw_rl_histogram};
pub use rmi::{RMI_TITLE, draw_rmi_bars};
pub use style::{ChartStyle, Palette};

use image::{ImageFormat, RgbImage};
use levelscope_types::{CleanedTable, DerivedMetrics};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const ASR_DENSITY_FILE: &str = "metric_ASR_density.png";
pub const RL_HIST_FILE: &str = "metric_RL_hist.png";
pub const DAR_BAR_FILE: &str = "metric_DAR_per_level_bar.png";
pub const RMI_BAR_FILE: &str = "metric_RMI_per_level_bar.png";

/// How a chart ended up on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartOutcome {
    /// Drawn from the data as intended.
    Rendered,
    /// Drawn, but at least one series used the histogram fallback.
    Fallback,
    /// No usable data; a "No Data Available" image was written.
    Placeholder,
    /// Encoding or writing the PNG failed.
    Failed,
}

#[derive(Debug, Clone)]
pub struct Drawing {
    pub image: RgbImage,
    pub outcome: ChartOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartReport {
    pub file: String,
    pub outcome: ChartOutcome,
}

/// Write `drawing` as `<out_dir>/<file>`. Failures are logged and reported
/// as [`ChartOutcome::Failed`].
pub fn save(drawing: Drawing, out_dir: &Path, file: &str) -> ChartReport {
    let path = out_dir.join(file);
    let outcome = match drawing.image.save_with_format(&path, ImageFormat::Png) {
        Ok(()) => {
            log::info!("wrote {}", path.display());
            drawing.outcome
        }
        Err(e) => {
            log::warn!("failed to save chart {}: {}", path.display(), e);
            ChartOutcome::Failed
        }
    };
    ChartReport {
        file: file.to_string(),
        outcome,
    }
}

/// Non-null values of one derived metric, grouped by level in
/// lexicographic level order.
pub(crate) fn values_by_level(
    table: &CleanedTable,
    metric: impl Fn(&DerivedMetrics) -> Option<f64>,
) -> BTreeMap<String, Vec<f64>> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for record in table.iter() {
        if let Some(value) = metric(&record.metrics) {
            groups
                .entry(record.attempt.level_id.clone())
                .or_default()
                .push(value);
        }
    }
    groups
}

// Engine - cleaning, aggregation and diagnostics over level-attempt telemetry.
// This layer sits between the raw CSV and the CLI writers/charts.

pub mod clean;
pub mod diagnostics;
mod error;
pub mod loader;
pub mod rmi;
pub mod stats;
pub mod summary;

pub use diagnostics::{Diagnostics, diagnose};
pub use error::{Error, Result};
pub use loader::{REQUIRED_COLUMNS, load_path, load_reader};
pub use rmi::{LevelRmi, RetryDetector, RetryRecord, compute_rmi};
pub use summary::{GlobalSummary, LevelSummary, summarize_global, summarize_levels};

use levelscope_types::CleanedTable;

/// Everything computed from one cleaned table.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub rmi: Vec<LevelRmi>,
    pub levels: Vec<LevelSummary>,
    pub global: GlobalSummary,
    pub diagnostics: Diagnostics,
}

/// Run every table-level aggregation in pipeline order.
pub fn analyze(table: &CleanedTable) -> Analysis {
    Analysis {
        rmi: compute_rmi(table),
        levels: summarize_levels(table),
        global: summarize_global(table),
        diagnostics: diagnose(table),
    }
}

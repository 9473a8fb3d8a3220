pub mod writer;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CLEANED_FILE: &str = "cleaned_metrics_new.csv";
pub const RMI_FILE: &str = "rmi_per_level.csv";
pub const LEVEL_SUMMARY_FILE: &str = "summary_per_level_new_metrics.csv";
pub const GLOBAL_SUMMARY_FILE: &str = "summary_global_new_metrics.csv";
/// Holds the per-level RMI table, not per-session rows; the file name is
/// kept for downstream consumers that already read it.
pub const RMI_PER_SESSION_FILE: &str = "summary_RMI_per_session.csv";
pub const DIAGNOSTICS_FILE: &str = "diagnostics_new_metrics.txt";

/// Create `dir` and its parents if needed, returning its absolute path.
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    fs::canonicalize(dir)
        .with_context(|| format!("Failed to resolve output directory: {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_nested_output_dir_is_created() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("a").join("b");
        let resolved = ensure_output_dir(&nested).unwrap();
        assert!(resolved.is_dir());
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_existing_dir_is_accepted() {
        let root = TempDir::new().unwrap();
        ensure_output_dir(root.path()).unwrap();
        ensure_output_dir(root.path()).unwrap();
    }
}

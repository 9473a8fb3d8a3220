//! Assertions over the files a run writes.

use anyhow::{Context, Result};
use predicates::prelude::*;
use std::path::Path;

/// Every file a successful run leaves in the output directory.
pub const EXPECTED_OUTPUTS: &[&str] = &[
    "cleaned_metrics_new.csv",
    "metric_ASR_density.png",
    "metric_RL_hist.png",
    "metric_DAR_per_level_bar.png",
    "rmi_per_level.csv",
    "metric_RMI_per_level_bar.png",
    "summary_per_level_new_metrics.csv",
    "summary_global_new_metrics.csv",
    "summary_RMI_per_session.csv",
    "diagnostics_new_metrics.txt",
];

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Assert that every expected output exists and that the charts are PNGs.
pub fn assert_all_outputs(out_dir: &Path) -> Result<()> {
    let exists = predicate::path::is_file();
    for name in EXPECTED_OUTPUTS {
        let path = out_dir.join(name);
        if !exists.eval(path.as_path()) {
            anyhow::bail!("Missing output file: {}", path.display());
        }
        if name.ends_with(".png") {
            let bytes = std::fs::read(&path)?;
            if !bytes.starts_with(PNG_SIGNATURE) {
                anyhow::bail!("Not a PNG: {}", path.display());
            }
        }
    }
    Ok(())
}

/// Parse CSV text into its header and rows.
pub fn parse_csv(content: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let header = reader
        .headers()
        .context("CSV has no header")?
        .iter()
        .map(String::from)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(String::from).collect());
    }
    Ok((header, rows))
}

/// Assert the CSV header equals `expected` exactly, in order.
pub fn assert_header(content: &str, expected: &[&str]) -> Result<()> {
    let (header, _) = parse_csv(content)?;
    if header != expected {
        anyhow::bail!("Expected header {:?}, got {:?}", expected, header);
    }
    Ok(())
}

/// Values of one named column, in row order.
pub fn column(content: &str, name: &str) -> Result<Vec<String>> {
    let (header, rows) = parse_csv(content)?;
    let idx = header
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("Column {} not in {:?}", name, header))?;
    Ok(rows
        .into_iter()
        .map(|row| row.get(idx).cloned().unwrap_or_default())
        .collect())
}

/// Assert that the JSON run report marks `file` with `outcome`.
pub fn assert_chart_outcome(json: &serde_json::Value, file: &str, outcome: &str) -> Result<()> {
    let charts = json["charts"]
        .as_array()
        .context("Expected 'charts' array in JSON")?;
    let chart = charts
        .iter()
        .find(|c| c["file"] == file)
        .with_context(|| format!("Chart {} not in report", file))?;
    if chart["outcome"] != outcome {
        anyhow::bail!(
            "Chart {} has outcome {}, expected {}",
            file,
            chart["outcome"],
            outcome
        );
    }
    Ok(())
}

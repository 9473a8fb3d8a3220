//! TestWorld pattern for declarative integration test setup.

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::TelemetryCsv;

/// Isolated environment for running the `levelscope` binary.
///
/// # Example
/// ```no_run
/// use levelscope_testing::{TelemetryCsv, TestWorld};
///
/// let world = TestWorld::new().with_csv("metrics.csv", &TelemetryCsv::sample());
/// let result = world.analyze("metrics.csv", &[]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    out_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let out_dir = temp_dir.path().join("out");
        Self {
            temp_dir,
            out_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory passed as `--out` by [`TestWorld::analyze`].
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write a telemetry CSV into the temp root.
    pub fn with_csv(self, name: &str, csv: &TelemetryCsv) -> Self {
        std::fs::write(self.path(name), csv.render()).expect("Failed to write csv");
        self
    }

    /// Write an arbitrary file (raw CSV text, config TOML) into the temp root.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.path(name), content).expect("Failed to write file");
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Run the binary with exactly `args`, from the temp root.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("levelscope")
            .map_err(|e| anyhow::anyhow!("Failed to find levelscope binary: {}", e))?;
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("RUST_LOG");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd.args(args);

        let output = cmd.output()?;
        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run an analysis of `csv_name` into [`TestWorld::out_dir`].
    pub fn analyze(&self, csv_name: &str, extra: &[&str]) -> Result<CliResult> {
        let csv = self.path(csv_name);
        let csv = csv.to_string_lossy();
        let out = self.out_dir.to_string_lossy();
        let mut args = vec!["--csv", csv.as_ref(), "--out", out.as_ref()];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    /// Read a file the run wrote into the output directory.
    pub fn read_output(&self, name: &str) -> Result<String> {
        let path = self.out_dir.join(name);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read output: {}", path.display()))
    }

    pub fn read_output_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.out_dir.join(name);
        std::fs::read(&path).with_context(|| format!("Failed to read output: {}", path.display()))
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

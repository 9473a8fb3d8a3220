use levelscope_testing::assertions::{
    EXPECTED_OUTPUTS, assert_all_outputs, assert_chart_outcome, assert_header, column,
};
use levelscope_testing::{Attempt, TelemetryCsv, TestWorld};

fn sample_world() -> TestWorld {
    TestWorld::new().with_csv("metrics.csv", &TelemetryCsv::sample())
}

#[test]
fn test_run_writes_every_output() {
    let world = sample_world();
    let result = world.analyze("metrics.csv", &[]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    assert_all_outputs(world.out_dir()).unwrap();

    let resolved = std::fs::canonicalize(world.out_dir()).unwrap();
    assert_eq!(
        result.stdout().trim_end(),
        format!("Charts and summaries saved in: {}", resolved.display())
    );
}

#[test]
fn test_cleaned_table_columns_and_values() {
    let world = sample_world();
    assert!(world.analyze("metrics.csv", &[]).unwrap().success());

    let cleaned = world.read_output("cleaned_metrics_new.csv").unwrap();
    assert_header(
        &cleaned,
        &[
            "session_id",
            "level_id",
            "attempt_number_in_session",
            "level_outcome",
            "level_duration_ms",
            "level_duration_s",
            "total_kill_attempts",
            "correct_kills",
            "wrong_kills",
            "avg_speed",
            "mean_reaction_latency_ms",
            "mean_reaction_latency_s",
            "timestamp",
            "ASR",
            "RL_s",
            "RL_s_clamped",
            "DAR",
        ],
    )
    .unwrap();

    assert_eq!(
        column(&cleaned, "ASR").unwrap(),
        vec!["0.5", "1.0", "1.5", "2.0", "1.0"]
    );
    assert_eq!(
        column(&cleaned, "RL_s_clamped").unwrap(),
        vec!["0.9", "0.9", "30.0", "0.9", "0.9"]
    );
    assert_eq!(column(&cleaned, "RL_s").unwrap()[2], "45.0");
    assert_eq!(
        column(&cleaned, "DAR").unwrap(),
        vec!["0.8", "0.8", "0.8", "", "0.75"]
    );
    assert_eq!(
        column(&cleaned, "timestamp").unwrap(),
        vec![
            "2024-05-01 10:00:00",
            "2024-05-01 10:02:00",
            "2024-05-01 11:00:00",
            "2024-05-01 10:05:00",
            "",
        ]
    );
}

#[test]
fn test_rmi_tables() {
    let world = sample_world();
    assert!(world.analyze("metrics.csv", &[]).unwrap().success());

    let rmi = world.read_output("rmi_per_level.csv").unwrap();
    assert_eq!(
        rmi,
        "level_id,fail_sessions,retry_sessions,RMI_pct\n1,1,1,100.0\n2,1,0,0.0\n"
    );
    // The per-session file carries the same per-level table.
    assert_eq!(world.read_output("summary_RMI_per_session.csv").unwrap(), rmi);
}

#[test]
fn test_summaries_and_diagnostics() {
    let world = sample_world();
    assert!(world.analyze("metrics.csv", &[]).unwrap().success());

    let levels = world.read_output("summary_per_level_new_metrics.csv").unwrap();
    assert_eq!(column(&levels, "level_id").unwrap(), vec!["1", "2"]);
    assert_eq!(column(&levels, "sessions").unwrap(), vec!["2", "2"]);
    assert_eq!(column(&levels, "mean_ASR").unwrap(), vec!["1.0", "1.5"]);
    assert_eq!(column(&levels, "median_ASR").unwrap(), vec!["1.0", "1.5"]);

    let global = world.read_output("summary_global_new_metrics.csv").unwrap();
    assert_eq!(column(&global, "sessions").unwrap(), vec!["3"]);
    assert_eq!(column(&global, "mean_ASR").unwrap(), vec!["1.2"]);

    let diagnostics = world.read_output("diagnostics_new_metrics.txt").unwrap();
    let lines: Vec<&str> = diagnostics.lines().collect();
    assert_eq!(lines[0], "Rows after cleaning: 5");
    assert_eq!(lines[1], "Unique sessions: 3");
    assert_eq!(lines[2], "Levels: 1, 2");
    assert!(lines[3].starts_with("Corr(ASR, DAR): "));
    assert!(lines[4].starts_with("Corr(RL_s, DAR): "));
    assert!(!diagnostics.ends_with('\n'));
}

#[test]
fn test_rerun_is_byte_identical() {
    let world = sample_world();
    assert!(world.analyze("metrics.csv", &[]).unwrap().success());
    let first: Vec<Vec<u8>> = EXPECTED_OUTPUTS
        .iter()
        .map(|name| world.read_output_bytes(name).unwrap())
        .collect();

    assert!(world.analyze("metrics.csv", &[]).unwrap().success());
    for (name, before) in EXPECTED_OUTPUTS.iter().zip(first) {
        assert_eq!(world.read_output_bytes(name).unwrap(), before, "{} changed", name);
    }
}

#[test]
fn test_retry_flag_column_is_carried_and_used() {
    let csv = TelemetryCsv::new()
        .with_retry_flag()
        .row(Attempt::new("s1", "1", 1).outcome("fail").retry_flag("1"))
        .row(Attempt::new("s2", "1", 1).outcome("fail").retry_flag("0"));
    let world = TestWorld::new().with_csv("metrics.csv", &csv);
    assert!(world.analyze("metrics.csv", &[]).unwrap().success());

    let cleaned = world.read_output("cleaned_metrics_new.csv").unwrap();
    assert_eq!(
        column(&cleaned, "retry_after_failure").unwrap(),
        vec!["1.0", "0.0"]
    );
    let rmi = world.read_output("rmi_per_level.csv").unwrap();
    assert_eq!(column(&rmi, "RMI_pct").unwrap(), vec!["50.0"]);
}

#[test]
fn test_json_report_flags_placeholders() {
    let csv = TelemetryCsv::new()
        .row(Attempt::new("s1", "1", 1).speed(""))
        .row(Attempt::new("s2", "1", 1).speed("n/a"));
    let world = TestWorld::new().with_csv("metrics.csv", &csv);
    let result = world
        .analyze("metrics.csv", &["--format", "json"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assert_eq!(json["rows"], 2);
    assert_eq!(json["sessions"], 2);
    assert_eq!(json["levels"], serde_json::json!(["1"]));
    assert_chart_outcome(&json, "metric_ASR_density.png", "placeholder").unwrap();
    assert_chart_outcome(&json, "metric_RL_hist.png", "rendered").unwrap();
    // No failures anywhere, so every RMI is null.
    assert_chart_outcome(&json, "metric_RMI_per_level_bar.png", "placeholder").unwrap();
    assert_all_outputs(world.out_dir()).unwrap();
}

#[test]
fn test_header_only_csv_produces_placeholders_and_empty_tables() {
    let world = TestWorld::new().with_csv("metrics.csv", &TelemetryCsv::new());
    let result = world
        .analyze("metrics.csv", &["--format", "json"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    for chart in [
        "metric_ASR_density.png",
        "metric_RL_hist.png",
        "metric_DAR_per_level_bar.png",
        "metric_RMI_per_level_bar.png",
    ] {
        assert_chart_outcome(&json, chart, "placeholder").unwrap();
    }

    assert_eq!(
        world.read_output("rmi_per_level.csv").unwrap(),
        "level_id,fail_sessions,retry_sessions,RMI_pct\n"
    );
    assert_eq!(
        world.read_output("diagnostics_new_metrics.txt").unwrap(),
        "Rows after cleaning: 0\nUnique sessions: 0\nLevels: (none)"
    );
}

#[test]
fn test_single_value_level_uses_histogram_fallback() {
    let csv = TelemetryCsv::new().row(Attempt::new("s1", "1", 1));
    let world = TestWorld::new().with_csv("metrics.csv", &csv);
    let result = world
        .analyze("metrics.csv", &["--format", "json"])
        .unwrap();
    assert!(result.success());
    assert_chart_outcome(&result.json().unwrap(), "metric_ASR_density.png", "fallback").unwrap();
}

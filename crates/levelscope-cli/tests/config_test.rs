use levelscope_testing::assertions::column;
use levelscope_testing::{Attempt, TelemetryCsv, TestWorld};

fn world_with_config(config: &str) -> TestWorld {
    let csv = TelemetryCsv::new().row(
        Attempt::new("s1", "1", 1)
            .speed("3")
            .latency_ms("20000"),
    );
    TestWorld::new()
        .with_csv("metrics.csv", &csv)
        .with_file("levelscope.toml", config)
}

#[test]
fn test_config_overrides_metric_constants() {
    let world = world_with_config(
        "[metrics]\nbase_movement_speed = 3.0\nreaction_latency_clamp_s = 10.0\n",
    );
    let config = world.path("levelscope.toml");
    let result = world
        .analyze("metrics.csv", &["--config", config.to_str().unwrap()])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let cleaned = world.read_output("cleaned_metrics_new.csv").unwrap();
    assert_eq!(column(&cleaned, "ASR").unwrap(), vec!["1.0"]);
    assert_eq!(column(&cleaned, "RL_s").unwrap(), vec!["20.0"]);
    assert_eq!(column(&cleaned, "RL_s_clamped").unwrap(), vec!["10.0"]);
}

#[test]
fn test_default_constants_without_config() {
    let world = world_with_config("");
    assert!(world.analyze("metrics.csv", &[]).unwrap().success());

    let cleaned = world.read_output("cleaned_metrics_new.csv").unwrap();
    assert_eq!(column(&cleaned, "ASR").unwrap(), vec!["0.5"]);
    assert_eq!(column(&cleaned, "RL_s_clamped").unwrap(), vec!["20.0"]);
}

#[test]
fn test_missing_config_file_falls_back_to_defaults() {
    let world = world_with_config("");
    let missing = world.path("nope.toml");
    let result = world
        .analyze("metrics.csv", &["--config", missing.to_str().unwrap()])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stderr().contains("not found, using defaults"));
}

#[test]
fn test_unknown_config_key_is_rejected() {
    let world = world_with_config("[metrics]\nbase_speed = 3.0\n");
    let config = world.path("levelscope.toml");
    let result = world
        .analyze("metrics.csv", &["--config", config.to_str().unwrap()])
        .unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("Invalid config"), "stderr: {}", result.stderr());
}

#[test]
fn test_chart_size_from_config() {
    let world = world_with_config("[charts]\nwidth = 400\nheight = 300\n");
    let config = world.path("levelscope.toml");
    let result = world
        .analyze("metrics.csv", &["--config", config.to_str().unwrap()])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    // PNG IHDR: width and height are big-endian u32s at bytes 16..24.
    let png = world.read_output_bytes("metric_RL_hist.png").unwrap();
    let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    assert_eq!((width, height), (400, 300));
}

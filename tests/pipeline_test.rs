/*!
 * Pipeline Tests
 * Supervisor runs end to end, environment-driven configuration, and the
 * command-line binary
 */

use pretty_assertions::assert_eq;
use sched_handoff::core::limits::{
    ENV_CHANNEL_SLOTS, ENV_PROCESS_TABLE, ENV_RECORD_CAPACITY, ENV_VALUE_PRECISION,
};
use sched_handoff::{ConfigError, RunConfig, SimError, Supervisor};
use serial_test::serial;
use std::io::Write;
use std::process::Command;

const GOLDEN: &str = "Average waiting time = 6.714286.\nAverage turnaround time = 12.000000.\n";

fn clear_env() {
    for key in [
        ENV_RECORD_CAPACITY,
        ENV_CHANNEL_SLOTS,
        ENV_VALUE_PRECISION,
        ENV_PROCESS_TABLE,
    ] {
        std::env::remove_var(key);
    }
}

fn args(output: &std::path::Path) -> Vec<String> {
    vec![
        "sched-handoff".to_string(),
        output.display().to_string(),
    ]
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_builtin_run_matches_golden_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("metrics.txt");

    let summary = Supervisor::new(RunConfig::new(&output)).run().await.unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), GOLDEN);
    assert_eq!(summary.writer.records_written, 2);
    assert_eq!(summary.writer.batches, 1);
    assert_eq!(summary.report.finish_time, 45);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.txt");
    Supervisor::new(RunConfig::new(&first)).run().await.unwrap();
    let expected = std::fs::read(&first).unwrap();

    for i in 0..25 {
        let output = dir.path().join(format!("run-{i}.txt"));
        Supervisor::new(RunConfig::new(&output)).run().await.unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), expected, "run {i}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_existing_output_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("metrics.txt");
    std::fs::write(&output, "stale contents that are longer than the metrics\n".repeat(4)).unwrap();

    Supervisor::new(RunConfig::new(&output)).run().await.unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), GOLDEN);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unwritable_output_fails_without_hanging() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("metrics.txt");

    let err = Supervisor::new(RunConfig::new(&output)).run().await.unwrap_err();
    assert!(matches!(err, SimError::Writer(_)));
    assert!(!output.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn test_env_overrides_precision_and_table() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("metrics.txt");

    let mut table = tempfile::NamedTempFile::new().unwrap();
    write!(
        table,
        r#"[
            {{"id": 1, "arrival_time": 0, "burst_time": 4}},
            {{"id": 2, "arrival_time": 1, "burst_time": 1}}
        ]"#
    )
    .unwrap();

    std::env::set_var(ENV_VALUE_PRECISION, "2");
    std::env::set_var(ENV_PROCESS_TABLE, table.path());
    let config = RunConfig::from_args(args(&output));
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.precision, 2);

    // P1 runs 0..1, P2 preempts 1..2, P1 finishes at 5
    let summary = Supervisor::new(config).run().await.unwrap();
    assert_eq!(summary.report.total_waiting_time, 1);
    assert_eq!(summary.report.total_turnaround_time, 6);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Average waiting time = 0.50.\nAverage turnaround time = 3.00.\n"
    );
}

#[test]
#[serial]
fn test_env_channel_overrides_are_bounded() {
    clear_env();
    let output = std::path::Path::new("metrics.txt");

    std::env::set_var(ENV_CHANNEL_SLOTS, "8");
    std::env::set_var(ENV_RECORD_CAPACITY, "128");
    let accepted = RunConfig::from_args(args(output));

    std::env::set_var(ENV_RECORD_CAPACITY, "8");
    let rejected = RunConfig::from_args(args(output));
    clear_env();

    let accepted = accepted.unwrap();
    assert_eq!(accepted.channel.slots, 8);
    assert_eq!(accepted.channel.record_capacity, 128);
    assert!(matches!(
        rejected,
        Err(ConfigError::InvalidValue { key, .. }) if key == ENV_RECORD_CAPACITY
    ));
}

#[test]
#[serial]
fn test_binary_writes_output_and_prints_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("metrics.txt");

    let result = Command::new(env!("CARGO_BIN_EXE_sched-handoff"))
        .arg(&output)
        .env_remove(ENV_RECORD_CAPACITY)
        .env_remove(ENV_CHANNEL_SLOTS)
        .env_remove(ENV_VALUE_PRECISION)
        .env_remove(ENV_PROCESS_TABLE)
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(result.status.success());
    assert_eq!(String::from_utf8_lossy(&result.stdout), GOLDEN);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), GOLDEN);
}

#[test]
#[serial]
fn test_binary_rejects_wrong_arity() {
    let none = Command::new(env!("CARGO_BIN_EXE_sched-handoff"))
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(none.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&none.stderr).contains("Usage"));

    let two = Command::new(env!("CARGO_BIN_EXE_sched-handoff"))
        .args(["a.txt", "b.txt"])
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(two.status.code(), Some(1));
}

#[test]
#[serial]
fn test_binary_reports_unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("metrics.txt");

    let result = Command::new(env!("CARGO_BIN_EXE_sched-handoff"))
        .arg(&output)
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(result.status.code(), Some(1));
    assert!(result.stdout.is_empty());
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_binary_reports_failed_flush() {
    if !std::path::Path::new("/dev/full").exists() {
        return;
    }

    let result = Command::new(env!("CARGO_BIN_EXE_sched-handoff"))
        .arg("/dev/full")
        .env_remove(ENV_PROCESS_TABLE)
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(result.status.code(), Some(1));
    assert!(result.stdout.is_empty());
}

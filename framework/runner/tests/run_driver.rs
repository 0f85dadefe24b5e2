#![cfg(unix)]

use std::os::unix::fs::PermissionsExt as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use wrk_driver_runner::prelude::{
    LogNaming, Process, RequestMode, RunDriver, RunOptions, Target, Wrk,
};
use wrk_driver_stats::prelude::{collect_stats, Number, StatsError, COMBINED};

const FAKE_WRK: &str = r#"#!/bin/sh
echo "fake wrk invoked with: $*"
echo "The server is now under siege..."
echo "Transactions:		       12345 hits"
echo "Availability:		      100.00 %"
echo "Elapsed time:		       10.02 secs"
echo "Transaction rate:	     1231.50 trans/sec"
echo "Successful transactions:       12300"
echo "Failed transactions:	          45"
echo "Latency: N/A" >&2
"#;

const HANGING_WRK: &str = r#"#!/bin/sh
echo "The server is now under siege..."
exec sleep 30
"#;

fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write script");
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn write_urls(dir: &Path) -> Target {
    let urls_file = dir.join("urls.txt");
    std::fs::write(&urls_file, "http://__HTTP_HOST__:__HTTP_PORT__/index.php\n").unwrap();
    Target::new(urls_file)
}

#[test]
fn run_benchmark_and_collect_stats() {
    let temp = TempDir::new().unwrap();
    let options = RunOptions {
        wrk: write_script(temp.path(), "wrk", FAKE_WRK),
        no_time_limit: true,
        client_threads: 4,
        temp_dir: temp.path().to_path_buf(),
        ..Default::default()
    };

    let mut wrk = Wrk::new(
        &options,
        write_urls(temp.path()),
        RequestMode::Benchmark,
        &LogNaming::default(),
    )
    .unwrap();
    let outcome = RunDriver::new(false).run(&mut wrk).unwrap();

    assert!(outcome.success());
    assert_eq!(outcome.exit_code(), Some(0));
    assert_eq!(outcome.log_file, wrk.log_file_path());

    let log = std::fs::read_to_string(wrk.log_file_path()).unwrap();
    let staged = wrk.staged_urls().unwrap().local_path();
    assert!(log.contains(&format!(
        "-c 4 -t 4 -s scripts/multi-request-txt.lua http://localhost:8090 -- {}",
        staged.display()
    )));
    assert!(log.contains("Latency: N/A"));
    assert_eq!(
        std::fs::read_to_string(staged).unwrap(),
        "http://localhost:8090/index.php\n"
    );

    let stats = collect_stats(wrk.log_file_path()).unwrap();
    assert_eq!(stats.get(COMBINED, "Wrk requests"), Some(Number::Int(12345)));
    assert_eq!(stats.get(COMBINED, "Wrk wall sec"), Some(Number::Float(10.02)));
    assert_eq!(stats.get(COMBINED, "Wrk RPS"), Some(Number::Float(1231.5)));
    assert_eq!(
        stats.get(COMBINED, "Wrk successful requests"),
        Some(Number::Int(12300))
    );
    assert_eq!(stats.get(COMBINED, "Wrk failed requests"), Some(Number::Int(45)));
}

#[test]
fn timeout_kills_hanging_run() {
    if which::which("timeout").is_err() {
        eprintln!("Skipping, 'timeout' is not installed");
        return;
    }

    let temp = TempDir::new().unwrap();
    let options = RunOptions {
        wrk: write_script(temp.path(), "wrk", HANGING_WRK),
        no_time_limit: false,
        wrk_timeout: Duration::from_secs(1),
        temp_dir: temp.path().to_path_buf(),
        ..Default::default()
    };

    let mut wrk = Wrk::new(
        &options,
        write_urls(temp.path()),
        RequestMode::Warmup,
        &LogNaming::default(),
    )
    .unwrap();
    let outcome = RunDriver::new(false).run(&mut wrk).unwrap();

    assert!(!outcome.success());
    assert!(outcome.elapsed < Duration::from_secs(30));

    let err = collect_stats(wrk.log_file_path()).unwrap_err();
    assert!(matches!(err, StatsError::MissingMetric { .. }));
}

#[test]
fn missing_tool_fails_to_start() {
    let temp = TempDir::new().unwrap();
    let options = RunOptions {
        wrk: temp.path().join("not-wrk"),
        no_time_limit: true,
        temp_dir: temp.path().to_path_buf(),
        ..Default::default()
    };

    let mut wrk = Wrk::new(
        &options,
        write_urls(temp.path()),
        RequestMode::WarmupMulti,
        &LogNaming::default(),
    )
    .unwrap();

    assert!(RunDriver::new(false).run(&mut wrk).is_err());
}

#[test]
fn missing_urls_file_fails_before_start() {
    let temp = TempDir::new().unwrap();
    let options = RunOptions {
        wrk: write_script(temp.path(), "wrk", FAKE_WRK),
        no_time_limit: true,
        temp_dir: temp.path().to_path_buf(),
        ..Default::default()
    };

    let mut wrk = Wrk::new(
        &options,
        Target::new(temp.path().join("missing.txt")),
        RequestMode::Benchmark,
        &LogNaming::default(),
    )
    .unwrap();

    let err = RunDriver::new(false).run(&mut wrk).unwrap_err();
    assert!(err.to_string().starts_with("Failed to prepare wrk benchmark"));
    assert_eq!(std::fs::read_to_string(wrk.log_file()).unwrap(), "");
}

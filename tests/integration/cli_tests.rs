//! Runs the webdiver binary and checks exit status, output directory and error log

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const FAST_CONFIG: &str = r#"
[crawler]
max-retries = 3
backoff-unit-ms = 1
request-timeout-secs = 2
"#;

/// A local URL nothing listens on
fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn run_webdiver(url: &str, dir: &Path, error_log: &Path) -> Output {
    let config = dir.join("webdiver.toml");
    std::fs::write(&config, FAST_CONFIG).unwrap();

    Command::new(env!("CARGO_BIN_EXE_webdiver"))
        .arg(url)
        .arg("--output")
        .arg(dir.join("results"))
        .arg("--config")
        .arg(&config)
        .arg("--error-log")
        .arg(error_log)
        .arg("--quiet")
        .output()
        .expect("Failed to run webdiver binary")
}

fn error_entries(error_log: &Path) -> Vec<String> {
    std::fs::read_to_string(error_log)
        .unwrap()
        .lines()
        .filter(|line| line.contains("ERROR"))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_dead_root_exits_with_failure_and_one_final_entry() {
    let dir = TempDir::new().unwrap();
    let error_log = dir.path().join("error.log");
    let url = dead_url();

    let output = run_webdiver(&url, dir.path(), &error_log);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No data crawled or error occurred."));

    // Output directory is created up front but stays empty
    let results: Vec<_> = std::fs::read_dir(dir.path().join("results"))
        .unwrap()
        .collect();
    assert!(results.is_empty());

    let entries = error_entries(&error_log);
    let retries = entries.iter().filter(|e| e.contains("(attempt")).count();
    let final_failures = entries.iter().filter(|e| e.contains("Giving up")).count();

    assert_eq!(retries, 3, "error log: {:#?}", entries);
    assert_eq!(final_failures, 1, "error log: {:#?}", entries);
    assert_eq!(entries.len(), 4, "error log: {:#?}", entries);
    assert!(entries.iter().all(|e| e.contains(&url)));
}

#[test]
fn test_error_log_is_appended_across_runs() {
    let dir = TempDir::new().unwrap();
    let error_log = dir.path().join("error.log");
    std::fs::write(&error_log, "earlier run\n").unwrap();
    let url = dead_url();

    run_webdiver(&url, dir.path(), &error_log);
    run_webdiver(&url, dir.path(), &error_log);

    let content = std::fs::read_to_string(&error_log).unwrap();
    assert!(content.starts_with("earlier run\n"));
    assert_eq!(error_entries(&error_log).len(), 8);
}

#[test]
fn test_invalid_target_fails_before_crawling() {
    let dir = TempDir::new().unwrap();
    let error_log = dir.path().join("error.log");

    let output = run_webdiver("ftp://example.com/", dir.path(), &error_log);

    assert!(!output.status.success());
    assert!(!dir.path().join("results").exists());
}

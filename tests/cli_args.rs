//! Integration tests for the metaplanet-price binary
//!
//! Tests argument handling and the JSON line printed on stdout. No test
//! reaches the real quote page: the quote URL points at a closed local port.

use std::fs;
use std::net::TcpListener;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_metaplanet-price"))
        .args(args)
        .output()
        .expect("Failed to execute metaplanet-price")
}

/// A URL on a local port nothing listens on
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/quote/3350.T", addr)
}

fn now_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs_f64()
}

fn write_snapshot(path: &Path, price: f64, age_secs: f64) {
    let json = format!(
        r#"{{"price": {}, "timestamp": {}, "updated": "2026-10-19T09:00:00.000000"}}"#,
        price,
        now_secs() - age_secs
    );
    fs::write(path, json).expect("write snapshot");
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "Expected one JSON line: {}", stdout);
    serde_json::from_str(stdout.trim()).expect("stdout should be JSON")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("metaplanet-price"), "Help should mention the binary");
    assert!(stdout.contains("--cache-file"), "Help should mention --cache-file");
    assert!(stdout.contains("--ttl"), "Help should mention --ttl");
}

#[test]
fn test_fresh_cache_prints_price_without_network() {
    let temp_dir = TempDir::new().unwrap();
    let cache_file = temp_dir.path().join("price.json");
    write_snapshot(&cache_file, 487.0, 5.0);
    let url = closed_port_url();

    let output = run_cli(&[
        "--cache-file",
        cache_file.to_str().unwrap(),
        "--quote-url",
        &url,
    ]);

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({"price": 487.0, "currency": "JPY", "symbol": "3350.T"})
    );
}

#[test]
fn test_stale_cache_and_failed_fetch_prints_error_shape() {
    let temp_dir = TempDir::new().unwrap();
    let cache_file = temp_dir.path().join("price.json");
    write_snapshot(&cache_file, 487.0, 301.0);
    let url = closed_port_url();

    let output = run_cli(&[
        "--cache-file",
        cache_file.to_str().unwrap(),
        "--quote-url",
        &url,
    ]);

    assert!(output.status.success(), "Fetch failures still exit 0");
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({"error": "Failed to fetch price", "symbol": "3350.T"})
    );
}

#[test]
fn test_refresh_ignores_fresh_cache() {
    let temp_dir = TempDir::new().unwrap();
    let cache_file = temp_dir.path().join("price.json");
    write_snapshot(&cache_file, 487.0, 5.0);
    let url = closed_port_url();

    let output = run_cli(&[
        "--cache-file",
        cache_file.to_str().unwrap(),
        "--quote-url",
        &url,
        "--refresh",
    ]);

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["error"], "Failed to fetch price");
}

#[test]
fn test_short_ttl_treats_cache_as_stale() {
    let temp_dir = TempDir::new().unwrap();
    let cache_file = temp_dir.path().join("price.json");
    write_snapshot(&cache_file, 487.0, 60.0);
    let url = closed_port_url();

    let output = run_cli(&[
        "--cache-file",
        cache_file.to_str().unwrap(),
        "--quote-url",
        &url,
        "--ttl",
        "30",
    ]);

    assert!(output.status.success());
    assert!(stdout_json(&output).get("error").is_some());
}

#[test]
fn test_zero_ttl_is_rejected() {
    let output = run_cli(&["--ttl", "0"]);
    assert!(!output.status.success(), "Expected zero TTL to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("InvalidTtl") || stderr.contains("Invalid TTL"),
        "Should print error message about the TTL: {}",
        stderr
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_non_numeric_ttl_is_rejected() {
    let output = run_cli(&["--ttl", "soon"]);
    assert!(!output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use metaplanet_price::cli::{Cli, StartupConfig};
    use std::time::Duration;

    #[test]
    fn test_cli_no_args_uses_defaults() {
        let cli = Cli::parse_from(["metaplanet-price"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache.ttl, Duration::from_secs(300));
        assert_eq!(config.target.currency, "JPY");
        assert!(!config.refresh);
    }

    #[test]
    fn test_cli_refresh_flag() {
        let cli = Cli::parse_from(["metaplanet-price", "--refresh"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.refresh);
    }
}

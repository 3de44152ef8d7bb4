#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rl() -> Command {
    let mut cmd = cargo_bin_cmd!("rationlog");
    cmd.env_remove("RATIONLOG_PASSWORD");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rationlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh database with schema applied.
pub fn init_db(db_path: &str) {
    rl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Append one reading through the CLI.
pub fn add(db_path: &str, unit: &str, ending: &str, date: &str, shift: Option<&str>) {
    let mut args = vec!["--db", db_path, "add", unit, ending, "--date", date];
    if let Some(s) = shift {
        args.push("--shift");
        args.push(s);
    }
    rl().args(&args).assert().success();
}

/// Initialize DB and add a small dataset useful for many tests.
/// DZ3007 starts at 45324 (rate 52, tank 1000), EX1022 at 34317 (rate 58, tank 980).
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);
    add(db_path, "DZ3007", "45334", "2025-09-01", Some("1"));
    add(db_path, "DZ3007", "45340", "2025-09-01", Some("2"));
    add(db_path, "EX1022", "34320.5", "2025-09-15", Some("1"));
}

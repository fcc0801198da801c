//! End to end runs of the example programs against in-memory output.

use std::fs;
use trilo_bin::commands::{options, read, Status};

struct Run {
    status: Status,
    stdout: String,
    stderr: String,
}

fn run_options(defaults: &[&str], args: &[&str]) -> Run {
    trilo_log::test();

    let defaults: Vec<String> = defaults.iter().map(|s| s.to_string()).collect();
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = options::run(&defaults, &args, &mut stdout, &mut stderr).expect("run options");
    Run {
        status,
        stdout: String::from_utf8(stdout).expect("utf-8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf-8 stderr"),
    }
}

#[test]
fn no_arguments() {
    let run = run_options(&[], &[]);
    assert_eq!(run.status, Status::Success);
    assert_eq!(run.stdout, "Logging is disabled.\n");
    assert!(run.stderr.is_empty());
}

#[test]
fn threshold_and_auto_mode() {
    let run = run_options(&[], &["--threshold", "50", "--auto_mode", "enable"]);
    assert_eq!(run.status, Status::Success);
    assert_eq!(
        run.stdout,
        "Logging is disabled.\nThreshold is set to 50.\nAuto mode is enabled.\n"
    );
}

#[test]
fn every_option() {
    let run = run_options(
        &[],
        &[
            "--enable_logging",
            "--output_file",
            "out.txt",
            "--auto_mode=auto",
            "--threshold=0",
            "extra",
        ],
    );
    assert_eq!(run.status, Status::Success);
    assert_eq!(
        run.stdout,
        "Logging is enabled.\n\
         Threshold is set to 0.\n\
         Output file is set to 'out.txt'.\n\
         Auto mode is set to 'auto'.\n\
         Positional arguments: extra\n"
    );
}

#[test]
fn disable_choice_reads_as_disabled() {
    let run = run_options(&[], &["--auto_mode", "disable"]);
    assert!(run.stdout.contains("Auto mode is disabled.\n"));
}

#[test]
fn command_line_overrides_config_defaults() {
    let run = run_options(&["--threshold", "10", "--enable_logging"], &["--threshold", "90"]);
    assert_eq!(run.status, Status::Success);
    assert_eq!(
        run.stdout,
        "Logging is enabled.\nThreshold is set to 90.\n"
    );
}

#[test]
fn help_prints_usage() {
    let run = run_options(&[], &["--help"]);
    assert_eq!(run.status, Status::Success);
    assert!(run.stdout.starts_with("Usage: trilo options [OPTIONS] [ARGS]..."));
    assert!(run.stdout.contains("--auto_mode <enable|disable|auto>"));
    assert!(run.stderr.is_empty());
}

#[test]
fn out_of_range_threshold_fails() {
    let run = run_options(&[], &["--threshold", "150"]);
    assert_eq!(run.status, Status::UsageError);
    assert!(run.stdout.is_empty());
    assert!(run
        .stderr
        .contains("value 150 for option `--threshold` is outside 0..100"));
    assert!(run.stderr.contains("Usage: trilo options"));
}

#[test]
fn unknown_flag_fails() {
    let run = run_options(&[], &["--verbose"]);
    assert_eq!(run.status, Status::UsageError);
    assert!(run.stderr.contains("unknown option `--verbose`"));
}

#[test]
fn bad_config_defaults_fail() {
    let run = run_options(&["--auto_mode", "maybe"], &[]);
    assert_eq!(run.status, Status::UsageError);
    assert!(run.stderr.contains("invalid choice `maybe`"));
}

#[test]
fn read_prints_file_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("notes.txt");
    fs::write(&path, "first line\nsecond line\n").expect("write file");

    let mut out = Vec::new();
    read::run(&path, &mut out).expect("read");
    assert_eq!(out, b"first line\nsecond line\n");
}

#[test]
fn read_terminates_last_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("notes.txt");
    fs::write(&path, "no newline").expect("write file");

    let mut out = Vec::new();
    read::run(&path, &mut out).expect("read");
    assert_eq!(out, b"no newline\n");
}

#[test]
fn read_missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.txt");

    let mut out = Vec::new();
    let err = read::run(&path, &mut out).expect_err("missing file");
    assert!(err.to_string().contains("missing.txt"));
    assert!(out.is_empty());
}

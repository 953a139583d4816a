use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

/// Runs a job from an empty working directory, where none of its inputs exist.
fn run_in_empty_dir(program: &str, name: &str) -> (Output, PathBuf) {
    let dir = std::env::temp_dir().join(format!(
        "bilbobus-data-empty-{name}-{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();

    let output = Command::new(program)
        .current_dir(&dir)
        .env("RUST_LOG", "error")
        .output()
        .unwrap();
    (output, dir)
}

fn assert_fails_without_output(program: &str, name: &str) {
    let (output, dir) = run_in_empty_dir(program, name);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
    assert!(!dir.join("data").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn consolidate_exits_with_failure_when_gtfs_is_missing() {
    assert_fails_without_output(env!("CARGO_BIN_EXE_consolidate"), "consolidate");
}

#[test]
fn gtfs_to_json_exits_with_failure_when_gtfs_is_missing() {
    assert_fails_without_output(env!("CARGO_BIN_EXE_gtfs_to_json"), "gtfs_to_json");
}

#[test]
fn extract_stops_exits_with_failure_when_dump_is_missing() {
    assert_fails_without_output(env!("CARGO_BIN_EXE_extract_stops"), "extract_stops");
}

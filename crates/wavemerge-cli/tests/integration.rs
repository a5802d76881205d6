//! Integration tests for wavemerge-cli.
//!
//! Drives the `wavemerge` binary against wave and session files in a
//! temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to get the path to the `wavemerge` binary built by cargo.
fn wavemerge_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wavemerge"))
}

fn run(args: &[&str], dir: &Path) -> Output {
    wavemerge_bin()
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run wavemerge")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// merge
// ---------------------------------------------------------------------------

#[test]
fn merge_prints_waves_and_combined_table() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pulse.txt"),
        "8 8 8 8 -8 -8 -8 -8;\n8 8 -8 -8 -8 -8 -8 -8\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("session.toml"),
        r#"
        nsamp = 8
        maxrange = 15

        [[instruments]]
        file = "pulse.txt"
        mml = "0 1 0"
        "#,
    )
    .unwrap();

    let output = run(&["merge", "session.toml"], dir.path());
    assert!(output.status.success(), "{output:?}");

    let text = stdout(&output);
    let sections: Vec<&str> = text.trim_end().split("\n\n").collect();
    assert_eq!(sections.len(), 3, "got: {text}");

    // Three merged frames, then two unique waves, then the index sequence.
    assert_eq!(sections[0].lines().count(), 3);
    assert_eq!(sections[1].lines().count(), 2);
    assert_eq!(sections[2], "0 1 0");

    for value in sections[0].split(|c: char| c.is_whitespace() || c == ';') {
        if value.is_empty() {
            continue;
        }
        let x: i32 = value.parse().unwrap();
        assert!((-15..=15).contains(&x));
    }
}

#[test]
fn merge_no_combine_writes_only_waves() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("session.toml"),
        r#"
        nsamp = 16
        [[instruments]]
        waves = "0 1 0 -1; 1 0 -1 0"
        "#,
    )
    .unwrap();

    let output = run(
        &["merge", "session.toml", "--no-combine", "-o", "out.txt"],
        dir.path(),
    );
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).is_empty());

    let written = fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert!(!written.trim_end().contains("\n\n"));
    assert_eq!(written.matches(';').count(), 1);
    assert_eq!(written.lines().next().unwrap().split(' ').count(), 16);
}

#[test]
fn merge_rejects_invalid_session() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("session.toml"),
        "style = \"loudest\"\n[[instruments]]\nwaves = \"0 1\"\n",
    )
    .unwrap();

    let output = run(&["merge", "session.toml"], dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loudest"), "got: {stderr}");
}

// ---------------------------------------------------------------------------
// combine / align / correlate
// ---------------------------------------------------------------------------

#[test]
fn combine_reports_unique_waves() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("seq.txt"), "0 1; 2 3; 0 1; 0 1; 2 3").unwrap();

    let output = run(&["combine", "seq.txt"], dir.path());
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "0 1;\n2 3\n\n0 1 0 0 1\n");
}

#[test]
fn align_undoes_rotation() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("seq.txt"),
        "0 1 2 3 4 5 6 7;\n5 6 7 0 1 2 3 4;\n2 3 4 5 6 7 0 1\n",
    )
    .unwrap();

    let output = run(&["align", "seq.txt", "-o", "aligned.txt"], dir.path());
    assert!(output.status.success(), "{output:?}");

    let written = fs::read_to_string(dir.path().join("aligned.txt")).unwrap();
    assert_eq!(
        written,
        "0 1 2 3 4 5 6 7;\n0 1 2 3 4 5 6 7;\n0 1 2 3 4 5 6 7\n"
    );

    let printed = run(&["align", "seq.txt"], dir.path());
    assert!(printed.status.success(), "{printed:?}");
    assert_eq!(stdout(&printed), written);
}

#[test]
fn align_refuses_inverted_frame() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("seq.txt"), "1 1 -1 -1; -1 -1 1 1").unwrap();

    let output = run(&["align", "seq.txt"], dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invert"), "got: {stderr}");
}

#[test]
fn correlate_prints_offset() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("seq.txt"),
        "0 1 2 3 4 5 6 7; 5 6 7 0 1 2 3 4",
    )
    .unwrap();

    let output = run(&["correlate", "seq.txt", "0", "1"], dir.path());
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output).trim(), "5");

    let output = run(&["correlate", "seq.txt", "0", "9"], dir.path());
    assert!(!output.status.success());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&["combine", "absent.txt"], dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("absent.txt"), "got: {stderr}");
}

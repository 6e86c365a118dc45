use crate::common::{history, run_fragtrace_command, session_dir};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;
use std::path::PathBuf;

mod common;

#[rstest]
fn fragment_is_traced_to_every_live_version(
    history: (TempDir, PathBuf),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, log) = history;

    run_fragtrace_command(
        dir.path(),
        &[
            "trace-fragment",
            "--history",
            &log.to_string_lossy(),
            "--path",
            "a.txt",
            "--revision",
            "1",
            "--from",
            "4,1",
            "--to",
            "6,0",
        ],
    )
    .assert()
    .success()
    .stdout("b.txt@3:6,1-8,0\na.txt@4:5,1-7,0\n");

    Ok(())
}

#[rstest]
fn fragment_at_the_latest_revision_is_unchanged(
    history: (TempDir, PathBuf),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, log) = history;

    run_fragtrace_command(
        dir.path(),
        &[
            "trace-fragment",
            "--history",
            &log.to_string_lossy(),
            "--path",
            "a.txt",
            "--revision",
            "4",
            "--from",
            "2,3",
            "--to",
            "2,9",
        ],
    )
    .assert()
    .success()
    .stdout("a.txt@4:2,3-2,9\n");

    Ok(())
}

#[rstest]
fn fragment_of_a_deleted_file_is_untraceable(
    history: (TempDir, PathBuf),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, log) = history;

    run_fragtrace_command(
        dir.path(),
        &[
            "trace-fragment",
            "--history",
            &log.to_string_lossy(),
            "-p",
            "c.txt",
            "-r",
            "5",
            "--from",
            "1,1",
            "--to",
            "2,0",
        ],
    )
    .assert()
    .success()
    .stdout("untraceable: c.txt@5:1,1-2,0\n");

    Ok(())
}

#[rstest]
fn inverted_fragment_is_rejected(
    history: (TempDir, PathBuf),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, log) = history;

    run_fragtrace_command(
        dir.path(),
        &[
            "trace-fragment",
            "--history",
            &log.to_string_lossy(),
            "-p",
            "a.txt",
            "-r",
            "1",
            "--from",
            "5,1",
            "--to",
            "2,0",
        ],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("ends before it starts"));

    Ok(())
}

#[rstest]
fn malformed_position_is_rejected(
    history: (TempDir, PathBuf),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, log) = history;

    run_fragtrace_command(
        dir.path(),
        &[
            "trace-fragment",
            "--history",
            &log.to_string_lossy(),
            "-p",
            "a.txt",
            "-r",
            "1",
            "--from",
            "five",
            "--to",
            "2,0",
        ],
    )
    .assert()
    .failure();

    Ok(())
}

#[rstest]
fn file_is_traced_to_every_live_version(
    history: (TempDir, PathBuf),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, log) = history;

    run_fragtrace_command(
        dir.path(),
        &["trace-file", "--history", &log.to_string_lossy(), "-p", "a.txt", "-r", "1"],
    )
    .assert()
    .success()
    .stdout("a.txt@1 -> b.txt@3\na.txt@1 -> a.txt@4\n");

    Ok(())
}

#[rstest]
fn latest_lists_the_tips_of_history(
    history: (TempDir, PathBuf),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, log) = history;

    run_fragtrace_command(
        dir.path(),
        &["latest", "--history", &log.to_string_lossy(), "-p", "a.txt", "-r", "2"],
    )
    .assert()
    .success()
    .stdout("b.txt@3\na.txt@4\n");

    Ok(())
}

#[rstest]
#[case::deleted("c.txt", "5", "deleted: c.txt@5\n")]
#[case::unknown("z.txt", "1", "unknown: z.txt@1\n")]
#[case::leaf("b.txt", "3", "b.txt@3\n")]
fn latest_reports_files_without_a_tip(
    history: (TempDir, PathBuf),
    #[case] path: &str,
    #[case] revision: &str,
    #[case] expected: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, log) = history;

    run_fragtrace_command(
        dir.path(),
        &["latest", "--history", &log.to_string_lossy(), "-p", path, "-r", revision],
    )
    .assert()
    .success()
    .stdout(predicate::str::diff(expected.to_string()));

    Ok(())
}

#[rstest]
fn missing_history_log_fails(session_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_fragtrace_command(
        session_dir.path(),
        &["trace-file", "--history", "missing.json", "-p", "a.txt", "-r", "1"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unable to read history log"));

    Ok(())
}

#[rstest]
fn inconsistent_history_log_fails(
    session_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = common::write_json(
        &session_dir,
        "history.json",
        r#"[
            {"revision": "1", "path": "a.txt", "change": {"kind": "add"}},
            {"revision": "1", "path": "a.txt", "change": {"kind": "delete"}}
        ]"#,
    );

    run_fragtrace_command(
        session_dir.path(),
        &["latest", "--history", &log.to_string_lossy(), "-p", "a.txt", "-r", "1"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unable to record"));

    Ok(())
}

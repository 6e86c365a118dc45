use crate::common::{history, run_fragtrace_command, session_dir, stop_json, tour_json, write_json};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;
use std::path::PathBuf;

mod common;

#[rstest]
fn overlapping_stops_of_two_tours_are_merged(
    session_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let tours = format!(
        "[{}, {}]",
        tour_json("A", &[stop_json("x.rs", "7", 3, 7)]),
        tour_json("B", &[stop_json("x.rs", "7", 5, 10), stop_json("x.rs", "7", 1, 2)]),
    );
    let tours = write_json(&session_dir, "tours.json", &tours);

    run_fragtrace_command(
        session_dir.path(),
        &["merge-tours", "--tours", &tours.to_string_lossy()],
    )
    .assert()
    .success()
    .stdout("A + B\n  x.rs@7:1,1-2,0\n  x.rs@7:3,1-10,0\n");

    Ok(())
}

#[rstest]
fn stops_are_traced_before_merging(
    history: (TempDir, PathBuf),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, log) = history;
    let tours = format!(
        "[{}, {}]",
        tour_json("A", &[stop_json("a.txt", "1", 4, 6)]),
        tour_json("B", &[stop_json("a.txt", "4", 6, 9)]),
    );
    let tours = write_json(&dir, "tours.json", &tours);

    run_fragtrace_command(
        dir.path(),
        &[
            "merge-tours",
            "--tours",
            &tours.to_string_lossy(),
            "--history",
            &log.to_string_lossy(),
        ],
    )
    .assert()
    .success()
    .stdout("A + B\n  b.txt@3:6,1-8,0\n  a.txt@4:5,1-9,0\n");

    Ok(())
}

#[rstest]
fn merged_tour_can_be_printed_as_json(
    session_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let tours = format!(
        "[{}, {}, {}]",
        tour_json("A", &[]),
        tour_json("B", &[stop_json("x.rs", "7", 3, 7)]),
        tour_json("C", &[]),
    );
    let tours = write_json(&session_dir, "tours.json", &tours);

    run_fragtrace_command(
        session_dir.path(),
        &["merge-tours", "--tours", &tours.to_string_lossy(), "--json"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""description": "A + B + C""#))
    .stdout(predicate::str::contains(r#""path": "x.rs""#));

    Ok(())
}

#[rstest]
fn empty_tour_list_fails(session_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let tours = write_json(&session_dir, "tours.json", "[]");

    run_fragtrace_command(
        session_dir.path(),
        &["merge-tours", "--tours", &tours.to_string_lossy()],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("No tours in"));

    Ok(())
}

#[rstest]
fn malformed_tours_fail(session_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let tours = write_json(&session_dir, "tours.json", r#"{"description": "A"}"#);

    run_fragtrace_command(
        session_dir.path(),
        &["merge-tours", "--tours", &tours.to_string_lossy()],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Malformed tours"));

    Ok(())
}

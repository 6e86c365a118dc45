#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use rstest::fixture;
use std::path::{Path, PathBuf};

/// ```text
///   a.txt@1 ──(2 lines inserted before line 3)──> a.txt@2 ──(copy)──> b.txt@3
///                                                    └──(line 1 deleted)──> a.txt@4
///   c.txt@5 ──> c.txt@6 (deleted)
/// ```
pub const HISTORY: &str = r#"[
    {"revision": "1", "path": "a.txt", "change": {"kind": "add"}},
    {"revision": "2", "parents": ["1"], "path": "a.txt", "change": {"kind": "modify"},
     "hunks": [{"source_from_line": 3, "source_from_column": 1,
                "source_to_line": 3, "source_to_column": 0,
                "target_from_line": 3, "target_from_column": 1,
                "target_to_line": 5, "target_to_column": 0}]},
    {"revision": "3", "parents": ["2"], "path": "b.txt",
     "change": {"kind": "copy", "from_path": "a.txt", "from_revision": "2"}},
    {"revision": "4", "parents": ["3"], "path": "a.txt", "change": {"kind": "modify"},
     "hunks": [{"source_from_line": 1, "source_from_column": 1,
                "source_to_line": 2, "source_to_column": 0,
                "target_from_line": 1, "target_from_column": 1,
                "target_to_line": 1, "target_to_column": 0}]},
    {"revision": "5", "parents": ["4"], "path": "c.txt", "change": {"kind": "add"}},
    {"revision": "6", "parents": ["5"], "path": "c.txt", "change": {"kind": "delete"}}
]"#;

#[fixture]
pub fn session_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn history(session_dir: TempDir) -> (TempDir, PathBuf) {
    let path = write_json(&session_dir, "history.json", HISTORY);
    (session_dir, path)
}

pub fn write_json(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let file = dir.child(name);
    file.write_str(content).expect("Failed to write file");
    file.path().to_path_buf()
}

pub fn run_fragtrace_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("fragtrace").expect("Failed to find binary");
    cmd.current_dir(dir).arg("--no-color").args(args);
    cmd
}

/// A stop on the whole lines `[start, end)` of `path@revision`
pub fn stop_json(path: &str, revision: &str, start: usize, end: usize) -> String {
    format!(
        r#"{{"most_recent_file": {{"path": "{path}", "revision": "{revision}"}},
            "most_recent_fragment": {{"file": {{"path": "{path}", "revision": "{revision}"}},
                                      "from": {{"line": {start}, "column": 1}},
                                      "to": {{"line": {end}, "column": 0}}}}}}"#
    )
}

pub fn tour_json(description: &str, stops: &[String]) -> String {
    format!(
        r#"{{"description": "{description}", "stops": [{}]}}"#,
        stops.join(", ")
    )
}

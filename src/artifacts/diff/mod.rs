//! Line-range edits between revisions of a file
//!
//! - `hunk`: A single edit mapping a source fragment onto a target fragment
//! - `file_diff`: Normalized, ordered set of hunks plus the hunk-merge engine
//! - `error`: Failures of the hunk-merge engine
//!
//! Diffs are never computed from file contents here. Hunks come from an
//! external diff producer and are folded into a `FileDiff` one at a time;
//! the engine keeps the result minimal so that chains of edits to the same
//! region collapse into a single hunk.

pub mod error;
pub mod file_diff;
pub mod hunk;

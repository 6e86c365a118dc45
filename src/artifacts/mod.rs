//! Data structures and algorithms
//!
//! - `revision`: Repositories, revisions and files at a revision
//! - `fragment`: Positions and text ranges in revisioned files
//! - `diff`: Hunks and the hunk-merge engine behind `FileDiff`
//! - `history`: File history graph and its builder
//! - `tracer`: Projection of fragments onto their current versions
//! - `tour`: Review tours and stop merging

pub mod diff;
pub mod fragment;
pub mod history;
pub mod revision;
pub mod tour;
pub mod tracer;

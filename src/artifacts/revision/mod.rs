//! Repository and revision identity
//!
//! Value types naming a repository, a point in its history and a file as it
//! existed at that point:
//!
//! - `repository`: Opaque repository identifier
//! - `revision`: Committed or working-copy revision
//! - `revisioned_file`: A path pinned to a revision of a repository

pub mod repository;
pub mod revision;
pub mod revisioned_file;

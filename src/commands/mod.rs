//! User-facing commands, implemented on `ReviewSession`
//!
//! - `trace`: Tracing fragments and files to their current versions
//! - `tour`: Merging review tours

pub mod trace;
pub mod tour;

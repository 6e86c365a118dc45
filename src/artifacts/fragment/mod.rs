//! Positions and ranges of text inside a revisioned file
//!
//! - `position`: (line, column) pair with lexicographic order
//! - `fragment`: Half-open range of positions in one revisioned file
//! - `line_span`: Line-granular view of a fragment used by the diff engine
//!
//! Lines and columns are 1-based. A column of 0 in an end position stands
//! for "before the first character of that line", so `(3,1)-(5,0)` covers
//! lines 3 and 4 and `(3,1)-(3,0)` is the empty insertion point at line 3.

pub mod fragment;
pub mod line_span;
pub mod position;

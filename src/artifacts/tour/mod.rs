//! Review tours
//!
//! A tour is a described, ordered walk over stops. Each stop points at the
//! most recent version of a file and, optionally, a fragment in it.
//! Merging tours groups their stops by file and combines stops whose
//! fragments overlap or touch.

pub mod stop;
pub mod tour;

//! Projection of fragments and files onto their current location
//!
//! A fragment is traced along every line of history leaving its file, so a
//! single fragment can end up in several places after copies or branches.
//! Deleted lines of history and unknown files yield nothing.

pub mod graph_tracer;

use crate::artifacts::fragment::fragment::Fragment;
use crate::artifacts::revision::revisioned_file::RevisionedFile;

pub trait FragmentTracer {
    /// Current images of `fragment`, in no particular order
    fn trace_fragment(&self, fragment: &Fragment) -> Vec<Fragment>;

    /// Current snapshots `file` lives on as, one per live line of history
    fn trace_file(&self, file: &RevisionedFile) -> Vec<RevisionedFile>;
}

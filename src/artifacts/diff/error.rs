use crate::artifacts::fragment::fragment::Fragment;
use thiserror::Error;

/// A hunk could not be merged into a `FileDiff`
///
/// Merging never mutates the diff it is called on, so callers can drop the
/// offending hunk and keep going with the rest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HunkMergeError {
    #[error("fragment {fragment} ends before it starts")]
    InvertedFragment { fragment: Fragment },

    #[error("merging the hunk {source_fragment} -> {target_fragment} yields an invalid range: {reason}")]
    IncompatibleRange {
        source_fragment: Fragment,
        target_fragment: Fragment,
        reason: String,
    },
}

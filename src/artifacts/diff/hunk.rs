use crate::artifacts::diff::error::HunkMergeError;
use crate::artifacts::fragment::fragment::Fragment;
use crate::artifacts::fragment::line_span::LineSpan;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The text occupying `source` was replaced by the text occupying `target`
///
/// Either side may be empty: an empty source is a pure insertion, an empty
/// target a pure deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Hunk {
    source: Fragment,
    target: Fragment,
}

impl Hunk {
    pub fn source(&self) -> &Fragment {
        &self.source
    }

    pub fn target(&self) -> &Fragment {
        &self.target
    }

    pub fn source_span(&self) -> Result<LineSpan, HunkMergeError> {
        Self::checked_span(&self.source)
    }

    pub fn target_span(&self) -> Result<LineSpan, HunkMergeError> {
        Self::checked_span(&self.target)
    }

    /// Net number of lines this hunk adds (negative when it removes lines)
    pub fn delta(&self) -> Result<i64, HunkMergeError> {
        Ok(self.target_span()?.len() as i64 - self.source_span()?.len() as i64)
    }

    /// Moves the source to the line where the target starts
    ///
    /// Hunks of one raw diff carry sources in pre-change coordinates and
    /// targets in post-change coordinates. Once the hunks above have been
    /// applied, the region a hunk replaces starts where its target starts.
    pub fn rebased(&self) -> Result<Hunk, HunkMergeError> {
        let offset = self.target_span()?.start as i64 - self.source_span()?.start as i64;
        Ok(Hunk::new(self.source.shift_lines(offset), self.target.clone()))
    }

    fn checked_span(fragment: &Fragment) -> Result<LineSpan, HunkMergeError> {
        fragment
            .span()
            .ok_or_else(|| HunkMergeError::InvertedFragment {
                fragment: fragment.clone(),
            })
    }
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

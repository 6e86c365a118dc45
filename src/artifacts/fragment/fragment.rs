use crate::artifacts::fragment::line_span::LineSpan;
use crate::artifacts::fragment::position::Position;
use crate::artifacts::revision::revisioned_file::RevisionedFile;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open range `[from, to)` of text in one revisioned file
///
/// Empty fragments are insertion points. The line-granular extent of a
/// fragment is given by [`Fragment::span`]: an end position with column 0
/// stops before its line, any other column includes the line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Fragment {
    file: RevisionedFile,
    from: Position,
    to: Position,
}

impl Fragment {
    /// Fragment covering the whole lines `[start, end)`
    pub fn lines(file: RevisionedFile, start: usize, end: usize) -> Self {
        Self::new(file, Position::new(start, 1), Position::new(end, 0))
    }

    pub fn file(&self) -> &RevisionedFile {
        &self.file
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    /// Line extent of the fragment, `None` if the fragment is inverted
    pub fn span(&self) -> Option<LineSpan> {
        let start = self.from.line();
        let end = if self.to.column() == 0 {
            self.to.line()
        } else {
            self.to.line() + 1
        };

        (start <= end).then(|| LineSpan::new(start, end))
    }

    pub fn is_well_formed(&self) -> bool {
        self.span().is_some()
    }

    pub fn with_file(&self, file: RevisionedFile) -> Self {
        Self::new(file, self.from, self.to)
    }

    pub fn shift_lines(&self, delta: i64) -> Self {
        Self::new(
            self.file.clone(),
            self.from.shift_lines(delta),
            self.to.shift_lines(delta),
        )
    }

    /// Whether both fragments denote the same file and overlap or touch
    pub fn can_be_merged_with(&self, other: &Fragment) -> bool {
        if self.file != other.file {
            return false;
        }

        match (self.span(), other.span()) {
            (Some(this), Some(that)) => this.touches(&that),
            _ => false,
        }
    }

    /// Smallest fragment containing both fragments
    pub fn merge(&self, other: &Fragment) -> Fragment {
        Self::new(
            self.file.clone(),
            self.from.min(other.from),
            self.to.max(other.to),
        )
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.file, self.from, self.to)
    }
}

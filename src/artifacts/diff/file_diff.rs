//! Normalized diff between two revisions of one file
//!
//! A `FileDiff` is an ordered list of hunks whose sources live in the
//! coordinates of the oldest revision and whose targets live in the
//! coordinates of the newest revision. Hunks never overlap or touch, in
//! either space, so the list is both minimal and unambiguous.
//!
//! ## Merging
//!
//! [`FileDiff::merge`] folds one more hunk into the diff. The new hunk's
//! source is expressed in the diff's current target coordinates (the file
//! as it looks after every hunk already in the diff). The existing hunks
//! are split into three groups by comparing their targets to the new
//! hunk's source:
//!
//! - strictly before: kept as they are
//! - strictly after: kept, with targets moved by the line delta of the new hunk
//! - overlapping or touching: collapsed together with the new hunk
//!
//! The collapsed hunk's source is the pre-image of all merged edits in the
//! oldest revision, its target the image of all of them in the newest one.
//! An earlier edit that the new hunk deletes entirely simply disappears
//! into the collapsed hunk.
//!
//! All arithmetic happens on whole lines (see [`LineSpan`]).

use crate::artifacts::diff::error::HunkMergeError;
use crate::artifacts::diff::hunk::Hunk;
use crate::artifacts::fragment::fragment::Fragment;
use crate::artifacts::fragment::line_span::LineSpan;
use crate::artifacts::fragment::position::Position;
use crate::artifacts::revision::revisioned_file::RevisionedFile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileDiff {
    hunks: Vec<Hunk>,
}

/// Where a line ends up after applying a diff
enum TracedLine {
    /// Outside every hunk, moved by the net delta of the hunks above it
    Shifted(i64),
    /// Inside a hunk, interpolated into the hunk's target
    Interpolated(usize),
}

impl FileDiff {
    /// The identity diff
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Returns a new diff with `hunk` applied on top of this one
    ///
    /// `self` is left untouched when the merge fails.
    pub fn merge(&self, hunk: &Hunk) -> Result<FileDiff, HunkMergeError> {
        let source = hunk.source_span()?;
        let target = hunk.target_span()?;
        let target_file = hunk.target().file();
        let base_file = self
            .hunks
            .first()
            .map_or_else(|| hunk.source().file(), |first| first.source().file());

        let (new_start, new_end) = (source.start as i64, source.end as i64);
        let shift_after = target.end as i64 - new_end;

        let mut before = Vec::new();
        let mut overlapping = Vec::new();
        let mut after = Vec::new();
        for existing in &self.hunks {
            let existing_target = existing.target_span()?;
            if (existing_target.end as i64) < new_start {
                before.push(existing);
            } else if (existing_target.start as i64) > new_end {
                after.push(existing);
            } else {
                overlapping.push(existing);
            }
        }

        let delta_before = Self::net_delta(&before)?;

        let merged = match (overlapping.first(), overlapping.last()) {
            (Some(first), Some(last)) => {
                let delta_through = delta_before + Self::net_delta(&overlapping)?;
                let (first_source, first_target) = (first.source_span()?, first.target_span()?);
                let (last_source, last_target) = (last.source_span()?, last.target_span()?);

                let base_start = (first_source.start as i64).min(new_start - delta_before);
                let base_end = (last_source.end as i64).max(new_end - delta_through);
                let target_start = if (first_target.start as i64) < new_start {
                    first_target.start as i64
                } else {
                    target.start as i64
                };
                let target_end = (last_target.end as i64 + shift_after).max(target.end as i64);

                if base_start < 0 || base_start > base_end || target_start > target_end {
                    return Err(Self::incompatible(
                        hunk,
                        format!(
                            "collapsed hunk would map lines [{base_start}, {base_end}) onto [{target_start}, {target_end})"
                        ),
                    ));
                }

                Hunk::new(
                    Fragment::lines(base_file.clone(), base_start as usize, base_end as usize),
                    Fragment::lines(
                        target_file.clone(),
                        target_start as usize,
                        target_end as usize,
                    ),
                )
            }
            _ => {
                if new_start - delta_before < 0 {
                    return Err(Self::incompatible(
                        hunk,
                        format!("source would start at line {}", new_start - delta_before),
                    ));
                }

                Hunk::new(
                    hunk.source().with_file(base_file.clone()).shift_lines(-delta_before),
                    hunk.target().clone(),
                )
            }
        };

        let mut hunks = Vec::with_capacity(before.len() + after.len() + 1);
        hunks.extend(
            before
                .into_iter()
                .map(|h| Hunk::new(h.source().clone(), h.target().with_file(target_file.clone()))),
        );
        hunks.push(merged);
        hunks.extend(after.into_iter().map(|h| {
            Hunk::new(
                h.source().clone(),
                h.target()
                    .with_file(target_file.clone())
                    .shift_lines(shift_after),
            )
        }));

        let diff = FileDiff { hunks };
        diff.check_normalized(hunk)?;

        Ok(diff)
    }

    /// Composes `self` (A -> B) with `other` (B -> C) into A -> C
    pub fn merge_diff(&self, other: &FileDiff) -> Result<FileDiff, HunkMergeError> {
        other
            .hunks
            .iter()
            .try_fold(self.clone(), |diff, hunk| diff.merge(&hunk.rebased()?))
    }

    /// Builds a diff from the hunks of one raw diff, given in source order
    ///
    /// Hunks that cannot be merged are skipped and returned alongside the
    /// diff built from the rest.
    pub fn from_raw_hunks(hunks: &[Hunk]) -> (FileDiff, Vec<HunkMergeError>) {
        FileDiff::new().merge_raw_hunks(hunks)
    }

    /// Applies the hunks of one raw diff on top of this diff
    pub fn merge_raw_hunks(&self, hunks: &[Hunk]) -> (FileDiff, Vec<HunkMergeError>) {
        let mut diff = self.clone();
        let mut rejected = Vec::new();

        for hunk in hunks {
            match hunk.rebased().and_then(|rebased| diff.merge(&rebased)) {
                Ok(merged) => diff = merged,
                Err(error) => {
                    tracing::warn!(%hunk, %error, "skipping hunk that cannot be merged");
                    rejected.push(error);
                }
            }
        }

        (diff, rejected)
    }

    /// Maps `fragment` through this diff into `target_file`
    ///
    /// Fragments outside every hunk keep their columns and move by the line
    /// delta of the hunks above them: their text is untouched, but lines
    /// inserted or removed above it change where it now sits. Ends falling
    /// inside a hunk are
    /// interpolated into the hunk's target; a fragment crossing several hunks
    /// widens to cover all of them.
    pub fn trace_fragment(&self, fragment: &Fragment, target_file: &RevisionedFile) -> Fragment {
        let Some(span) = fragment.span() else {
            return fragment.with_file(target_file.clone());
        };

        let spans = self
            .hunks
            .iter()
            .filter_map(|hunk| Some((hunk.source().span()?, hunk.target().span()?)))
            .collect::<Vec<_>>();

        let from = match Self::trace_start(&spans, span.start) {
            TracedLine::Shifted(delta) => fragment.from().shift_lines(delta),
            TracedLine::Interpolated(line) => Position::new(line, 1),
        };
        let to = match Self::trace_end(&spans, span.end) {
            TracedLine::Shifted(delta) => fragment.to().shift_lines(delta),
            TracedLine::Interpolated(line) => Position::new(line, 0),
        };

        let traced = Fragment::new(target_file.clone(), from, to);
        if traced.is_well_formed() {
            traced
        } else {
            Fragment::new(target_file.clone(), from, Position::new(from.line(), 0))
        }
    }

    fn trace_start(spans: &[(LineSpan, LineSpan)], line: usize) -> TracedLine {
        let mut delta = 0i64;
        for (source, target) in spans {
            if source.end <= line {
                delta += target.len() as i64 - source.len() as i64;
                continue;
            }
            if source.start <= line {
                let offset = (line - source.start) * target.len() / source.len();
                return TracedLine::Interpolated(target.start + offset);
            }
            break;
        }

        TracedLine::Shifted(delta)
    }

    fn trace_end(spans: &[(LineSpan, LineSpan)], line: usize) -> TracedLine {
        let mut delta = 0i64;
        for (source, target) in spans {
            if source.start >= line {
                break;
            }
            if source.end <= line {
                delta += target.len() as i64 - source.len() as i64;
                continue;
            }
            let offset = ((line - source.start) * target.len()).div_ceil(source.len());
            return TracedLine::Interpolated(target.start + offset);
        }

        TracedLine::Shifted(delta)
    }

    fn net_delta(hunks: &[&Hunk]) -> Result<i64, HunkMergeError> {
        hunks.iter().map(|hunk| hunk.delta()).sum()
    }

    fn check_normalized(&self, merged: &Hunk) -> Result<(), HunkMergeError> {
        for pair in self.hunks.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.source_span()?.end >= next.source_span()?.start
                || prev.target_span()?.end >= next.target_span()?.start
            {
                return Err(Self::incompatible(
                    merged,
                    format!("hunks {prev} and {next} would overlap"),
                ));
            }
        }

        Ok(())
    }

    fn incompatible(hunk: &Hunk, reason: String) -> HunkMergeError {
        HunkMergeError::IncompatibleRange {
            source_fragment: hunk.source().clone(),
            target_fragment: hunk.target().clone(),
            reason,
        }
    }
}

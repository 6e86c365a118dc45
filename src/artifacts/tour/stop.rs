use crate::artifacts::fragment::fragment::Fragment;
use crate::artifacts::revision::revisioned_file::RevisionedFile;
use crate::artifacts::tracer::FragmentTracer;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A waypoint of a tour
///
/// Stops without a fragment stand for the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Stop {
    most_recent_file: RevisionedFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    most_recent_fragment: Option<Fragment>,
}

impl Stop {
    pub fn for_file(file: RevisionedFile) -> Self {
        Self::new(file, None)
    }

    pub fn for_fragment(fragment: Fragment) -> Self {
        Self::new(fragment.file().clone(), Some(fragment))
    }

    /// Stops for a fragment flagged at an older revision
    ///
    /// One stop per current image of `origin`. A fragment that cannot be
    /// traced stays where it was flagged.
    pub fn trace(origin: &Fragment, tracer: &impl FragmentTracer) -> Vec<Stop> {
        let traced = tracer.trace_fragment(origin);
        if traced.is_empty() {
            return vec![Self::for_fragment(origin.clone())];
        }

        traced.into_iter().map(Self::for_fragment).collect()
    }

    /// Moves this stop to the current version of what it points at
    pub fn retrace(&self, tracer: &impl FragmentTracer) -> Vec<Stop> {
        if let Some(fragment) = &self.most_recent_fragment {
            return Self::trace(fragment, tracer);
        }

        let files = tracer.trace_file(&self.most_recent_file);
        if files.is_empty() {
            return vec![self.clone()];
        }

        files.into_iter().map(Self::for_file).collect()
    }

    pub fn most_recent_file(&self) -> &RevisionedFile {
        &self.most_recent_file
    }

    pub fn most_recent_fragment(&self) -> Option<&Fragment> {
        self.most_recent_fragment.as_ref()
    }

    /// Line the stop starts at, 0 for whole-file stops
    pub fn line(&self) -> usize {
        self.most_recent_fragment
            .as_ref()
            .map_or(0, |fragment| fragment.from().line())
    }

    /// Stops on the same file merge if both cover the whole file or if
    /// their fragments overlap or touch
    pub fn can_be_merged_with(&self, other: &Stop) -> bool {
        if self.most_recent_file != other.most_recent_file {
            return false;
        }

        match (&self.most_recent_fragment, &other.most_recent_fragment) {
            (None, None) => true,
            (Some(this), Some(that)) => this.can_be_merged_with(that),
            _ => false,
        }
    }

    /// Only meaningful if [`Stop::can_be_merged_with`] holds
    pub fn merge(&self, other: &Stop) -> Stop {
        let fragment = match (&self.most_recent_fragment, &other.most_recent_fragment) {
            (Some(this), Some(that)) => Some(this.merge(that)),
            (this, that) => this.clone().or_else(|| that.clone()),
        };

        Self::new(self.most_recent_file.clone(), fragment)
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.most_recent_fragment {
            Some(fragment) => write!(f, "{fragment}"),
            None => write!(f, "{}", self.most_recent_file),
        }
    }
}

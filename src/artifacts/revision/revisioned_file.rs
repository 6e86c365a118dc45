use crate::artifacts::revision::repository::Repository;
use crate::artifacts::revision::revision::Revision;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A file path pinned to a revision of a repository
///
/// This is pure identity: the contents are never held here, collaborators
/// outside the core fetch them when they compute hunks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevisionedFile {
    path: String,
    revision: Revision,
    #[serde(default)]
    repository: Repository,
}

impl RevisionedFile {
    pub fn new(path: impl Into<String>, revision: Revision, repository: Repository) -> Self {
        Self {
            path: path.into(),
            revision,
            repository,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// The same path in the same repository at another revision
    pub fn at_revision(&self, revision: Revision) -> Self {
        Self::new(self.path.clone(), revision, self.repository.clone())
    }
}

impl fmt::Display for RevisionedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.path, self.revision)
    }
}

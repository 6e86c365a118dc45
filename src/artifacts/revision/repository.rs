use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_REPOSITORY: &str = "default";

/// Opaque identifier of a version-controlled repository
///
/// Revisions and files are only meaningful relative to the repository they
/// belong to, so every `RevisionedFile` carries one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Repository(String);

impl Repository {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new(DEFAULT_REPOSITORY)
    }
}

impl AsRef<str> for Repository {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

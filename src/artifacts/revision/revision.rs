use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Textual form of the working-copy revision
pub const LOCAL_REVISION: &str = "LOCAL";

/// A point in the history of a repository
///
/// Revisions carry no global order: whether one precedes another is only
/// known through the parent links recorded while building a file history
/// graph.
///
/// # Examples
///
/// ```ignore
/// let committed: Revision = "r42".parse()?;
/// let local: Revision = "LOCAL".parse()?;
/// assert!(local.is_local());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Revision {
    /// A revision recorded in the repository (commit hash, svn revision number, ...)
    Committed(String),
    /// The not yet committed state of the working copy
    Local,
}

impl Revision {
    pub fn committed(id: impl Into<String>) -> Self {
        Revision::Committed(id.into())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Revision::Local)
    }

    pub fn id(&self) -> &str {
        match self {
            Revision::Committed(id) => id,
            Revision::Local => LOCAL_REVISION,
        }
    }
}

impl From<String> for Revision {
    fn from(value: String) -> Self {
        if value == LOCAL_REVISION {
            Revision::Local
        } else {
            Revision::Committed(value)
        }
    }
}

impl From<&str> for Revision {
    fn from(value: &str) -> Self {
        Revision::from(value.to_string())
    }
}

impl From<Revision> for String {
    fn from(value: Revision) -> Self {
        match value {
            Revision::Committed(id) => id,
            Revision::Local => LOCAL_REVISION.to_string(),
        }
    }
}

impl FromStr for Revision {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Revision::from(s))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

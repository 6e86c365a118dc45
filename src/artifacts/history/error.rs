use crate::artifacts::history::node::NodeKind;
use crate::artifacts::revision::revisioned_file::RevisionedFile;
use thiserror::Error;

/// Ingestion left the graph inconsistent
///
/// These are ordering or data errors of whoever feeds the builder. The
/// builder refuses any further work once one of them occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("an edge from {ancestor} to {descendant} would create a cycle")]
    Cycle {
        ancestor: RevisionedFile,
        descendant: RevisionedFile,
    },

    #[error("the edge from {ancestor} to {descendant} already carries a different diff")]
    ConflictingDiff {
        ancestor: RevisionedFile,
        descendant: RevisionedFile,
    },

    #[error("{file} is already recorded as {existing} and cannot become {requested}")]
    ConflictingNodeKind {
        file: RevisionedFile,
        existing: NodeKind,
        requested: NodeKind,
    },

    #[error("there is no edge from {ancestor} to {descendant}")]
    MissingEdge {
        ancestor: RevisionedFile,
        descendant: RevisionedFile,
    },

    #[error("the file history graph is unusable after an earlier ingestion error")]
    Poisoned,
}

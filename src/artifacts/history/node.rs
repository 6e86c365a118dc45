use crate::artifacts::diff::file_diff::FileDiff;
use crate::artifacts::history::edge::FileHistoryEdge;
use crate::artifacts::history::store::{GraphStore, NodeId};
use crate::artifacts::revision::revisioned_file::RevisionedFile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a snapshot holds a file or marks its deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Existing,
    Deleted,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Existing => write!(f, "existing"),
            NodeKind::Deleted => write!(f, "deleted"),
        }
    }
}

/// A file snapshot in a `FileHistoryGraph`
#[derive(Clone, Copy)]
pub struct FileHistoryNode<'g> {
    store: &'g GraphStore,
    id: NodeId,
}

impl<'g> FileHistoryNode<'g> {
    pub(crate) fn new(store: &'g GraphStore, id: NodeId) -> Self {
        Self { store, id }
    }

    pub fn file(&self) -> &'g RevisionedFile {
        &self.store.node(self.id).file
    }

    pub fn kind(&self) -> NodeKind {
        self.store.node(self.id).kind
    }

    pub fn is_deleted(&self) -> bool {
        self.kind() == NodeKind::Deleted
    }

    pub fn is_root(&self) -> bool {
        self.store.node(self.id).incoming.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.store.node(self.id).outgoing.is_empty()
    }

    pub fn incoming_edges(&self) -> Vec<FileHistoryEdge<'g>> {
        self.store
            .node(self.id)
            .incoming
            .iter()
            .map(|&edge| FileHistoryEdge::new(self.store, edge))
            .collect()
    }

    pub fn outgoing_edges(&self) -> Vec<FileHistoryEdge<'g>> {
        self.store
            .node(self.id)
            .outgoing
            .iter()
            .map(|&edge| FileHistoryEdge::new(self.store, edge))
            .collect()
    }

    pub fn ancestors(&self) -> Vec<FileHistoryNode<'g>> {
        self.incoming_edges().iter().map(|edge| edge.ancestor()).collect()
    }

    pub fn descendants(&self) -> Vec<FileHistoryNode<'g>> {
        self.outgoing_edges().iter().map(|edge| edge.descendant()).collect()
    }

    /// Composed diffs from `ancestor` to this node, one per distinct path
    ///
    /// Paths that compose to the same diff are reported once. A node is its
    /// own ancestor through the empty path; an unrelated node yields nothing.
    pub fn build_histories(&self, ancestor: &FileHistoryNode<'_>) -> Vec<FileDiff> {
        if !std::ptr::eq(self.store, ancestor.store) {
            return Vec::new();
        }

        self.store.histories(ancestor.id, self.id)
    }

    pub(crate) fn id(&self) -> NodeId {
        self.id
    }
}

impl PartialEq for FileHistoryNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.store, other.store) && self.id == other.id
    }
}

impl Eq for FileHistoryNode<'_> {}

impl fmt::Debug for FileHistoryNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHistoryNode")
            .field("file", self.file())
            .field("kind", &self.kind())
            .finish()
    }
}

impl fmt::Display for FileHistoryNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Existing => write!(f, "{}", self.file()),
            NodeKind::Deleted => write!(f, "{} (deleted)", self.file()),
        }
    }
}

use crate::artifacts::diff::file_diff::FileDiff;
use crate::artifacts::history::node::FileHistoryNode;
use crate::artifacts::history::store::{EdgeId, GraphStore};

/// Ancestor-to-descendant link in a `FileHistoryGraph`
#[derive(Clone, Copy)]
pub struct FileHistoryEdge<'g> {
    store: &'g GraphStore,
    id: EdgeId,
}

impl<'g> FileHistoryEdge<'g> {
    pub(crate) fn new(store: &'g GraphStore, id: EdgeId) -> Self {
        Self { store, id }
    }

    pub fn ancestor(&self) -> FileHistoryNode<'g> {
        FileHistoryNode::new(self.store, self.store.edge(self.id).ancestor)
    }

    pub fn descendant(&self) -> FileHistoryNode<'g> {
        FileHistoryNode::new(self.store, self.store.edge(self.id).descendant)
    }

    pub fn diff(&self) -> &'g FileDiff {
        &self.store.edge(self.id).diff
    }
}

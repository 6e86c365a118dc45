use crate::artifacts::history::node::{FileHistoryNode, NodeKind};
use crate::artifacts::history::store::GraphStore;
use crate::artifacts::revision::revisioned_file::RevisionedFile;

/// Immutable file history graph, ready for queries
///
/// Obtained from [`FileHistoryGraphBuilder::build`]. Holds no interior
/// mutability, so it can be shared between threads once built.
///
/// [`FileHistoryGraphBuilder::build`]: crate::artifacts::history::builder::FileHistoryGraphBuilder::build
#[derive(Debug, Clone, Default)]
pub struct FileHistoryGraph {
    store: GraphStore,
}

impl FileHistoryGraph {
    pub(crate) fn new(store: GraphStore) -> Self {
        Self { store }
    }

    /// Exact lookup of the snapshot for `file`
    pub fn get_node_for(&self, file: &RevisionedFile) -> Option<FileHistoryNode<'_>> {
        self.store
            .lookup(file)
            .map(|id| FileHistoryNode::new(&self.store, id))
    }

    /// Current tips of every line of history `file` takes part in
    ///
    /// These are the existing snapshots reachable from `file` that have no
    /// descendants. A line ending in a deletion has no tip. Unknown files
    /// yield nothing.
    pub fn get_latest_files(&self, file: &RevisionedFile) -> Vec<RevisionedFile> {
        let Some(node) = self.get_node_for(file) else {
            return Vec::new();
        };

        self.store
            .leaves(node.id())
            .into_iter()
            .map(|id| FileHistoryNode::new(&self.store, id))
            .filter(|leaf| leaf.kind() == NodeKind::Existing)
            .map(|leaf| leaf.file().clone())
            .collect()
    }

    pub fn contains(&self, file: &RevisionedFile) -> bool {
        self.store.lookup(file).is_some()
    }

    pub fn nodes(&self) -> impl Iterator<Item = FileHistoryNode<'_>> + '_ {
        self.store
            .node_ids()
            .map(|id| FileHistoryNode::new(&self.store, id))
    }

    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.store.node_count() == 0
    }
}

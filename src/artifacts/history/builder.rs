//! Ingestion phase of the file history graph
//!
//! The builder is fed revision events in increasing revision order by a
//! single writer. Every call records the parents of the revision it is
//! about, so later calls can find the last snapshot of a path before a
//! given revision by walking those parent links (see [`RevisionDag`]).
//!
//! ## Synthesized snapshots
//!
//! When no snapshot of a path is reachable from an ancestor revision, the
//! file is assumed to have existed there unchanged since before the
//! ingested history, and a root snapshot is created at that revision. This
//! keeps changes and deletions traceable back to a known state.
//!
//! ## Failure
//!
//! A [`GraphError`] poisons the builder: every later call, including
//! [`FileHistoryGraphBuilder::build`], fails with [`GraphError::Poisoned`].

use crate::artifacts::diff::error::HunkMergeError;
use crate::artifacts::diff::file_diff::FileDiff;
use crate::artifacts::diff::hunk::Hunk;
use crate::artifacts::history::error::GraphError;
use crate::artifacts::history::graph::FileHistoryGraph;
use crate::artifacts::history::node::NodeKind;
use crate::artifacts::history::revision_dag::RevisionDag;
use crate::artifacts::history::store::{GraphStore, NodeId};
use crate::artifacts::revision::repository::Repository;
use crate::artifacts::revision::revision::Revision;
use crate::artifacts::revision::revisioned_file::RevisionedFile;

#[derive(Debug, Clone, Default)]
pub struct FileHistoryGraphBuilder {
    store: GraphStore,
    revisions: RevisionDag,
    poisoned: bool,
}

impl FileHistoryGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the parents of a revision without touching any file
    pub fn record_revision(
        &mut self,
        repository: &Repository,
        revision: &Revision,
        parents: &[Revision],
    ) {
        self.revisions.record(repository, revision, parents);
    }

    /// The file at `path` was added or changed in `revision`
    ///
    /// Pass no ancestor revisions for a plain addition. Each ancestor
    /// revision is linked through the last snapshot of `path` reachable from
    /// it, or through a synthesized snapshot if there is none.
    pub fn add_addition_or_change(
        &mut self,
        path: &str,
        revision: &Revision,
        ancestor_revisions: &[Revision],
        repository: &Repository,
    ) -> Result<(), GraphError> {
        self.guarded(|builder| {
            builder.revisions.record(repository, revision, ancestor_revisions);
            let file = RevisionedFile::new(path, revision.clone(), repository.clone());
            let node = builder.store.get_or_insert(file, NodeKind::Existing)?;

            for ancestor_revision in ancestor_revisions {
                for ancestor in builder.resolve_ancestors(path, ancestor_revision, repository)? {
                    builder.store.insert_edge(ancestor, node, FileDiff::new())?;
                }
            }

            Ok(())
        })
    }

    /// The file at `path` was deleted in `revision`
    ///
    /// The deletion is linked to a snapshot at each ancestor revision. When
    /// the last snapshot reachable from an ancestor revision is older, an
    /// intermediate snapshot is created at the ancestor revision itself, so
    /// the last revision before the deletion stays known.
    pub fn add_deletion(
        &mut self,
        path: &str,
        revision: &Revision,
        ancestor_revisions: &[Revision],
        repository: &Repository,
    ) -> Result<(), GraphError> {
        self.guarded(|builder| {
            builder.revisions.record(repository, revision, ancestor_revisions);
            let file = RevisionedFile::new(path, revision.clone(), repository.clone());
            let deletion = builder.store.get_or_insert(file, NodeKind::Deleted)?;

            for ancestor_revision in ancestor_revisions {
                let at_ancestor =
                    RevisionedFile::new(path, ancestor_revision.clone(), repository.clone());
                let ancestors = builder.resolve_ancestors(path, ancestor_revision, repository)?;

                // resolving may have synthesized the snapshot at the ancestor revision
                let direct = builder.store.lookup(&at_ancestor);
                if direct.is_some() || ancestors.is_empty() {
                    for ancestor in ancestors {
                        builder.store.insert_edge(ancestor, deletion, FileDiff::new())?;
                    }
                    continue;
                }

                tracing::trace!(file = %at_ancestor, "adding snapshot before deletion");
                let intermediate = builder.store.get_or_insert(at_ancestor, NodeKind::Existing)?;
                for ancestor in ancestors {
                    builder.store.insert_edge(ancestor, intermediate, FileDiff::new())?;
                }
                builder.store.insert_edge(intermediate, deletion, FileDiff::new())?;
            }

            Ok(())
        })
    }

    /// `path_from` as of `revision_from` was copied to `path_to` in `revision_to`
    pub fn add_copy(
        &mut self,
        path_from: &str,
        path_to: &str,
        revision_from: &Revision,
        revision_to: &Revision,
        repository: &Repository,
    ) -> Result<(), GraphError> {
        self.guarded(|builder| {
            let sources = builder.resolve_ancestors(path_from, revision_from, repository)?;
            let file = RevisionedFile::new(path_to, revision_to.clone(), repository.clone());
            let target = builder.store.get_or_insert(file, NodeKind::Existing)?;

            for source in sources {
                builder.store.insert_edge(source, target, FileDiff::new())?;
            }

            Ok(())
        })
    }

    /// Sets the diff of the edge from `ancestor` to `descendant`
    ///
    /// `hunks` are the hunks of one raw diff in source order. Hunks the merge
    /// engine rejects are skipped and returned; they never fail ingestion.
    pub fn add_hunks(
        &mut self,
        ancestor: &RevisionedFile,
        descendant: &RevisionedFile,
        hunks: &[Hunk],
    ) -> Result<Vec<HunkMergeError>, GraphError> {
        self.guarded(|builder| {
            let missing = || GraphError::MissingEdge {
                ancestor: ancestor.clone(),
                descendant: descendant.clone(),
            };
            let from = builder.store.lookup(ancestor).ok_or_else(missing)?;
            let to = builder.store.lookup(descendant).ok_or_else(missing)?;
            let edge = builder.store.find_edge(from, to).ok_or_else(missing)?;

            let (diff, rejected) = FileDiff::from_raw_hunks(hunks);
            builder.store.set_diff(edge, diff)?;

            Ok(rejected)
        })
    }

    /// Direct ancestors of `file` recorded so far
    pub fn ancestors_of(&self, file: &RevisionedFile) -> Vec<RevisionedFile> {
        let Some(id) = self.store.lookup(file) else {
            return Vec::new();
        };

        self.store
            .node(id)
            .incoming
            .iter()
            .map(|&edge| self.store.node(self.store.edge(edge).ancestor).file.clone())
            .collect()
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Ends ingestion and hands out the queryable graph
    pub fn build(self) -> Result<FileHistoryGraph, GraphError> {
        if self.poisoned {
            return Err(GraphError::Poisoned);
        }

        tracing::debug!(
            nodes = self.store.node_count(),
            edges = self.store.edge_count(),
            "file history graph built"
        );

        let graph = FileHistoryGraph::new(self.store);

        #[cfg(feature = "debug_history")]
        for node in graph.nodes() {
            for edge in node.outgoing_edges() {
                tracing::debug!(
                    ancestor = %node,
                    descendant = %edge.descendant(),
                    hunks = edge.diff().hunks().len(),
                    "edge"
                );
            }
        }

        Ok(graph)
    }

    /// Existing snapshots of `path` closest to `revision` on each line of history
    ///
    /// Synthesizes a root snapshot at `revision` when the path has no
    /// snapshot reachable from it at all. Lines ending in a deletion
    /// contribute nothing.
    fn resolve_ancestors(
        &mut self,
        path: &str,
        revision: &Revision,
        repository: &Repository,
    ) -> Result<Vec<NodeId>, GraphError> {
        let probe = RevisionedFile::new(path, revision.clone(), repository.clone());
        let found = self
            .revisions
            .nearest(repository, revision, |candidate| {
                self.store
                    .lookup(&probe.at_revision(candidate.clone()))
                    .is_some()
            })
            .into_iter()
            .filter_map(|candidate| self.store.lookup(&probe.at_revision(candidate)))
            .collect::<Vec<_>>();

        if found.is_empty() {
            tracing::trace!(file = %probe, "synthesizing snapshot without known history");
            return Ok(vec![self.store.get_or_insert(probe, NodeKind::Existing)?]);
        }

        Ok(found
            .into_iter()
            .filter(|&id| self.store.node(id).kind == NodeKind::Existing)
            .collect())
    }

    fn guarded<T>(
        &mut self,
        operation: impl FnOnce(&mut Self) -> Result<T, GraphError>,
    ) -> Result<T, GraphError> {
        if self.poisoned {
            return Err(GraphError::Poisoned);
        }

        let result = operation(self);
        if let Err(error) = &result {
            tracing::error!(%error, "file history ingestion failed");
            self.poisoned = true;
        }

        result
    }
}

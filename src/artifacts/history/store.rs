use crate::artifacts::diff::file_diff::FileDiff;
use crate::artifacts::history::error::GraphError;
use crate::artifacts::history::node::NodeKind;
use crate::artifacts::revision::revisioned_file::RevisionedFile;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EdgeId(usize);

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub file: RevisionedFile,
    pub kind: NodeKind,
    pub incoming: Vec<EdgeId>,
    pub outgoing: Vec<EdgeId>,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeData {
    pub ancestor: NodeId,
    pub descendant: NodeId,
    pub diff: FileDiff,
}

/// Arena of nodes and edges; edges refer to nodes by index only
#[derive(Debug, Clone, Default)]
pub(crate) struct GraphStore {
    nodes: Vec<NodeData>,
    edges: Vec<EdgeData>,
    index: HashMap<RevisionedFile, NodeId>,
}

impl GraphStore {
    pub fn lookup(&self, file: &RevisionedFile) -> Option<NodeId> {
        self.index.get(file).copied()
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &EdgeData {
        &self.edges[id.0]
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the node for `file`, creating it when it is new
    ///
    /// Revisiting a node with the same kind extends it; a snapshot cannot be
    /// both existing and deleted.
    pub fn get_or_insert(
        &mut self,
        file: RevisionedFile,
        kind: NodeKind,
    ) -> Result<NodeId, GraphError> {
        if let Some(id) = self.lookup(&file) {
            let existing = self.node(id).kind;
            if existing != kind {
                return Err(GraphError::ConflictingNodeKind {
                    file,
                    existing,
                    requested: kind,
                });
            }
            return Ok(id);
        }

        let id = NodeId(self.nodes.len());
        tracing::trace!(%file, %kind, "adding node");
        self.index.insert(file.clone(), id);
        self.nodes.push(NodeData {
            file,
            kind,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        });

        Ok(id)
    }

    pub fn find_edge(&self, ancestor: NodeId, descendant: NodeId) -> Option<EdgeId> {
        self.node(ancestor)
            .outgoing
            .iter()
            .copied()
            .find(|&edge| self.edge(edge).descendant == descendant)
    }

    /// Links `ancestor` to `descendant`, reusing an existing edge between them
    pub fn insert_edge(
        &mut self,
        ancestor: NodeId,
        descendant: NodeId,
        diff: FileDiff,
    ) -> Result<EdgeId, GraphError> {
        if let Some(edge) = self.find_edge(ancestor, descendant) {
            self.set_diff(edge, diff)?;
            return Ok(edge);
        }

        if ancestor == descendant || self.reaches(descendant, ancestor) {
            return Err(GraphError::Cycle {
                ancestor: self.node(ancestor).file.clone(),
                descendant: self.node(descendant).file.clone(),
            });
        }

        let id = EdgeId(self.edges.len());
        tracing::trace!(
            ancestor = %self.node(ancestor).file,
            descendant = %self.node(descendant).file,
            hunks = diff.hunks().len(),
            "adding edge"
        );
        self.edges.push(EdgeData {
            ancestor,
            descendant,
            diff,
        });
        self.nodes[ancestor.0].outgoing.push(id);
        self.nodes[descendant.0].incoming.push(id);

        Ok(id)
    }

    /// Sets the diff of an edge that has none yet
    ///
    /// Setting an empty or identical diff again is a no-op.
    pub fn set_diff(&mut self, edge: EdgeId, diff: FileDiff) -> Result<(), GraphError> {
        let current = &self.edges[edge.0].diff;
        if diff.is_empty() || *current == diff {
            return Ok(());
        }
        if !current.is_empty() {
            let data = self.edge(edge);
            return Err(GraphError::ConflictingDiff {
                ancestor: self.node(data.ancestor).file.clone(),
                descendant: self.node(data.descendant).file.clone(),
            });
        }

        self.edges[edge.0].diff = diff;
        Ok(())
    }

    pub fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![from];

        while let Some(id) = stack.pop() {
            if id == to {
                return true;
            }
            if visited.insert(id) {
                stack.extend(self.node(id).outgoing.iter().map(|&e| self.edge(e).descendant));
            }
        }

        false
    }

    /// Nodes without outgoing edges reachable from `start`, in depth-first order
    pub fn leaves(&self, start: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let outgoing = &self.node(id).outgoing;
            if outgoing.is_empty() {
                leaves.push(id);
            }
            stack.extend(outgoing.iter().rev().map(|&e| self.edge(e).descendant));
        }

        leaves
    }

    /// Composed diffs along every distinct path from `ancestor` to `node`
    pub fn histories(&self, ancestor: NodeId, node: NodeId) -> Vec<FileDiff> {
        let mut memo = HashMap::new();
        self.histories_memoized(ancestor, node, &mut memo)
    }

    fn histories_memoized(
        &self,
        ancestor: NodeId,
        node: NodeId,
        memo: &mut HashMap<NodeId, Vec<FileDiff>>,
    ) -> Vec<FileDiff> {
        if node == ancestor {
            return vec![FileDiff::new()];
        }
        if let Some(known) = memo.get(&node) {
            return known.clone();
        }

        let mut histories = Vec::new();
        for &edge_id in &self.node(node).incoming {
            let edge = self.edge(edge_id);
            if !self.reaches(ancestor, edge.ancestor) {
                continue;
            }

            for prefix in self.histories_memoized(ancestor, edge.ancestor, memo) {
                match prefix.merge_diff(&edge.diff) {
                    Ok(history) if !histories.contains(&history) => histories.push(history),
                    Ok(_) => {}
                    Err(error) => tracing::warn!(
                        ancestor = %self.node(edge.ancestor).file,
                        descendant = %self.node(node).file,
                        %error,
                        "dropping history that cannot be composed"
                    ),
                }
            }
        }

        memo.insert(node, histories.clone());
        histories
    }
}

//! File history graph
//!
//! Records how files are added, changed, copied and deleted across
//! revisions. Nodes are file snapshots keyed by `(path, revision)`, edges
//! lead from an ancestor snapshot to a descendant snapshot and carry the
//! `FileDiff` between them.
//!
//! - `builder`: Ingestion phase, fed with revision events in revision order
//! - `graph`: Immutable, queryable graph produced by the builder
//! - `node` / `edge`: Borrowed views into the graph
//! - `revision_dag`: Parent links between revisions, used to find the last
//!   snapshot of a path before a given revision
//! - `store`: Arena holding nodes and edges
//! - `error`: Ingestion failures
//!
//! ## Phases
//!
//! ```text
//!   revision events ──> FileHistoryGraphBuilder ──build()──> FileHistoryGraph ──> tracer
//!                        (single writer)                      (shared readers)
//! ```
//!
//! The graph is rebuilt from scratch for every review session and never
//! persisted.

pub mod builder;
pub mod edge;
pub mod error;
pub mod graph;
pub mod node;
pub mod revision_dag;
mod store;

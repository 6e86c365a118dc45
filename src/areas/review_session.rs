use crate::areas::history_log::HistoryLog;
use crate::artifacts::history::graph::FileHistoryGraph;
use crate::artifacts::revision::repository::Repository;
use crate::artifacts::tracer::graph_tracer::GraphFragmentTracer;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// State of one tracing session: the built history graph and the output
pub struct ReviewSession {
    graph: FileHistoryGraph,
    repository: Repository,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl ReviewSession {
    pub fn new(
        graph: FileHistoryGraph,
        repository: Repository,
        writer: Box<dyn std::io::Write>,
    ) -> Self {
        ReviewSession {
            graph,
            repository,
            writer: RefCell::new(writer),
        }
    }

    /// Builds the history graph from the log at `history`, if any
    pub fn open(
        history: Option<&Path>,
        repository: Repository,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        let graph = match history {
            Some(path) => HistoryLog::load(path)?.build_graph()?,
            None => FileHistoryGraph::default(),
        };

        Ok(Self::new(graph, repository, writer))
    }

    pub fn graph(&self) -> &FileHistoryGraph {
        &self.graph
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn tracer(&self) -> GraphFragmentTracer<'_> {
        GraphFragmentTracer::new(&self.graph)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }
}

use crate::artifacts::fragment::fragment::Fragment;
use crate::artifacts::history::graph::FileHistoryGraph;
use crate::artifacts::revision::revisioned_file::RevisionedFile;
use crate::artifacts::tracer::FragmentTracer;
use derive_new::new;

/// Traces through the composed diffs of a built `FileHistoryGraph`
#[derive(Debug, Clone, Copy, new)]
pub struct GraphFragmentTracer<'g> {
    graph: &'g FileHistoryGraph,
}

impl FragmentTracer for GraphFragmentTracer<'_> {
    fn trace_fragment(&self, fragment: &Fragment) -> Vec<Fragment> {
        let Some(origin) = self.graph.get_node_for(fragment.file()) else {
            tracing::debug!(%fragment, "fragment is not part of any known history");
            return Vec::new();
        };

        let mut traced = Vec::new();
        for latest in self.graph.get_latest_files(fragment.file()) {
            let Some(leaf) = self.graph.get_node_for(&latest) else {
                continue;
            };

            for history in leaf.build_histories(&origin) {
                let image = history.trace_fragment(fragment, &latest);
                if !traced.contains(&image) {
                    traced.push(image);
                }
            }
        }

        tracing::trace!(%fragment, images = traced.len(), "fragment traced");
        traced
    }

    fn trace_file(&self, file: &RevisionedFile) -> Vec<RevisionedFile> {
        self.graph.get_latest_files(file)
    }
}

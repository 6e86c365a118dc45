use crate::artifacts::diff::hunk::Hunk;
use crate::artifacts::fragment::fragment::Fragment;
use crate::artifacts::fragment::position::Position;
use crate::artifacts::history::builder::FileHistoryGraphBuilder;
use crate::artifacts::history::graph::FileHistoryGraph;
use crate::artifacts::revision::repository::Repository;
use crate::artifacts::revision::revision::Revision;
use crate::artifacts::revision::revisioned_file::RevisionedFile;
use anyhow::Context;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One hunk of a raw per-file diff between two adjacent revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RawHunk {
    pub source_from_line: usize,
    pub source_from_column: usize,
    pub source_to_line: usize,
    pub source_to_column: usize,
    pub target_from_line: usize,
    pub target_from_column: usize,
    pub target_to_line: usize,
    pub target_to_column: usize,
}

impl RawHunk {
    pub fn to_hunk(&self, source_file: &RevisionedFile, target_file: &RevisionedFile) -> Hunk {
        Hunk::new(
            Fragment::new(
                source_file.clone(),
                Position::new(self.source_from_line, self.source_from_column),
                Position::new(self.source_to_line, self.source_to_column),
            ),
            Fragment::new(
                target_file.clone(),
                Position::new(self.target_from_line, self.target_from_column),
                Position::new(self.target_to_line, self.target_to_column),
            ),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeKind {
    Add,
    Modify,
    Delete,
    Copy {
        from_path: String,
        from_revision: Revision,
    },
}

/// What happened to one path in one revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RevisionEvent {
    #[serde(default)]
    pub repository: Repository,
    pub revision: Revision,
    #[serde(default)]
    pub parents: Vec<Revision>,
    pub path: String,
    pub change: ChangeKind,
    /// Raw diff of `path` against the snapshot(s) this event links it to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hunks: Vec<RawHunk>,
}

impl RevisionEvent {
    fn file(&self) -> RevisionedFile {
        RevisionedFile::new(
            self.path.as_str(),
            self.revision.clone(),
            self.repository.clone(),
        )
    }
}

/// Revision events in increasing revision order, as read from a JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(transparent)]
pub struct HistoryLog {
    events: Vec<RevisionEvent>,
}

impl HistoryLog {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read history log {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Malformed history log {}", path.display()))
    }

    pub fn events(&self) -> &[RevisionEvent] {
        &self.events
    }

    pub fn build_graph(&self) -> anyhow::Result<FileHistoryGraph> {
        let mut builder = FileHistoryGraphBuilder::new();
        self.ingest(&mut builder)?;

        Ok(builder.build()?)
    }

    /// Feeds every event to `builder`, in order
    ///
    /// Raw hunks are attached to the edges the event created. Hunks the
    /// merge engine rejects are logged and skipped.
    pub fn ingest(&self, builder: &mut FileHistoryGraphBuilder) -> anyhow::Result<()> {
        for event in &self.events {
            let file = event.file();
            let known_ancestors = builder.ancestors_of(&file);
            builder.record_revision(&event.repository, &event.revision, &event.parents);

            match &event.change {
                ChangeKind::Add => builder.add_addition_or_change(
                    &event.path,
                    &event.revision,
                    &[],
                    &event.repository,
                ),
                ChangeKind::Modify => builder.add_addition_or_change(
                    &event.path,
                    &event.revision,
                    &event.parents,
                    &event.repository,
                ),
                ChangeKind::Delete => builder.add_deletion(
                    &event.path,
                    &event.revision,
                    &event.parents,
                    &event.repository,
                ),
                ChangeKind::Copy {
                    from_path,
                    from_revision,
                } => builder.add_copy(
                    from_path,
                    &event.path,
                    from_revision,
                    &event.revision,
                    &event.repository,
                ),
            }
            .with_context(|| format!("Unable to record {:?} of {file}", event.change))?;

            if event.hunks.is_empty() {
                continue;
            }

            for ancestor in builder.ancestors_of(&file) {
                if known_ancestors.contains(&ancestor) {
                    continue;
                }

                let hunks = event
                    .hunks
                    .iter()
                    .map(|raw| raw.to_hunk(&ancestor, &file))
                    .collect::<Vec<_>>();
                let rejected = builder
                    .add_hunks(&ancestor, &file, &hunks)
                    .with_context(|| format!("Unable to attach the diff {ancestor} -> {file}"))?;
                if !rejected.is_empty() {
                    tracing::warn!(
                        %ancestor,
                        descendant = %file,
                        rejected = rejected.len(),
                        "some hunks were skipped"
                    );
                }
            }
        }

        tracing::debug!(events = self.events.len(), "history log ingested");
        Ok(())
    }
}

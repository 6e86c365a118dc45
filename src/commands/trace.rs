use crate::areas::review_session::ReviewSession;
use crate::artifacts::fragment::fragment::Fragment;
use crate::artifacts::fragment::position::Position;
use crate::artifacts::revision::revision::Revision;
use crate::artifacts::revision::revisioned_file::RevisionedFile;
use crate::artifacts::tracer::FragmentTracer;
use colored::Colorize;

#[derive(Debug, Clone)]
pub struct TraceFragmentOptions {
    pub path: String,
    pub revision: Revision,
    pub from: Position,
    pub to: Position,
}

impl ReviewSession {
    pub fn trace_fragment(&self, opts: &TraceFragmentOptions) -> anyhow::Result<()> {
        let fragment = Fragment::new(self.file_at(&opts.path, &opts.revision), opts.from, opts.to);
        if !fragment.is_well_formed() {
            anyhow::bail!("Fragment {fragment} ends before it starts");
        }

        let traced = self.tracer().trace_fragment(&fragment);
        if traced.is_empty() {
            writeln!(self.writer(), "{} {fragment}", "untraceable:".red())?;
            return Ok(());
        }

        for image in traced {
            writeln!(self.writer(), "{}", image.to_string().green())?;
        }

        Ok(())
    }

    pub fn trace_file(&self, path: &str, revision: &Revision) -> anyhow::Result<()> {
        let file = self.file_at(path, revision);
        let traced = self.tracer().trace_file(&file);
        if traced.is_empty() {
            writeln!(self.writer(), "{} {file}", "untraceable:".red())?;
            return Ok(());
        }

        for latest in traced {
            writeln!(self.writer(), "{file} -> {}", latest.to_string().green())?;
        }

        Ok(())
    }

    pub fn latest(&self, path: &str, revision: &Revision) -> anyhow::Result<()> {
        let file = self.file_at(path, revision);
        let Some(node) = self.graph().get_node_for(&file) else {
            writeln!(self.writer(), "{} {file}", "unknown:".red())?;
            return Ok(());
        };

        let latest = self.graph().get_latest_files(&file);
        if latest.is_empty() {
            writeln!(self.writer(), "{} {node}", "deleted:".yellow())?;
            return Ok(());
        }

        for file in latest {
            writeln!(self.writer(), "{file}")?;
        }

        Ok(())
    }

    fn file_at(&self, path: &str, revision: &Revision) -> RevisionedFile {
        RevisionedFile::new(path, revision.clone(), self.repository().clone())
    }
}

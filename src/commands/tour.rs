use crate::areas::review_session::ReviewSession;
use crate::artifacts::tour::tour::Tour;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct MergeToursOptions {
    pub json: bool,
}

impl ReviewSession {
    /// Merges all tours of the JSON array at `tours` into one
    ///
    /// Every stop is first moved to the current version of what it points
    /// at, so stops flagged at different revisions can meet.
    pub fn merge_tours(&self, tours: &Path, opts: &MergeToursOptions) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(tours)
            .with_context(|| format!("Unable to read tours {}", tours.display()))?;
        let parsed: Vec<Tour> = serde_json::from_str(&content)
            .with_context(|| format!("Malformed tours {}", tours.display()))?;

        let tracer = self.tracer();
        let merged = parsed
            .into_iter()
            .map(|tour| {
                let stops = tour
                    .stops()
                    .iter()
                    .flat_map(|stop| stop.retrace(&tracer))
                    .collect();
                Tour::new(tour.description().to_string(), stops)
            })
            .reduce(|merged, tour| merged.merge_with(&tour))
            .ok_or_else(|| anyhow::anyhow!("No tours in {}", tours.display()))?;

        if opts.json {
            serde_json::to_writer_pretty(&mut *self.writer(), &merged)?;
            writeln!(self.writer())?;
            return Ok(());
        }

        writeln!(self.writer(), "{}", merged.description().bold())?;
        for stop in merged.stops() {
            writeln!(self.writer(), "  {stop}")?;
        }

        Ok(())
    }
}

use crate::artifacts::revision::repository::Repository;
use crate::artifacts::revision::revision::Revision;
use std::collections::{HashMap, HashSet, VecDeque};

/// Parent links of every revision seen during ingestion
///
/// Revision events only mention the files a revision touched, so the last
/// snapshot of a path before revision `R` is usually not at `R`'s parent.
/// Walking the parent links back from the parent finds it.
#[derive(Debug, Clone, Default)]
pub struct RevisionDag {
    parents: HashMap<(Repository, Revision), Vec<Revision>>,
}

impl RevisionDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `parents` for `revision`, adding to parents recorded earlier
    pub fn record(&mut self, repository: &Repository, revision: &Revision, parents: &[Revision]) {
        let known = self
            .parents
            .entry((repository.clone(), revision.clone()))
            .or_default();
        for parent in parents {
            if parent != revision && !known.contains(parent) {
                known.push(parent.clone());
            }
        }
    }

    pub fn parents(&self, repository: &Repository, revision: &Revision) -> &[Revision] {
        self.parents
            .get(&(repository.clone(), revision.clone()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, repository: &Repository, revision: &Revision) -> bool {
        self.parents
            .contains_key(&(repository.clone(), revision.clone()))
    }

    /// Walks from `start` towards the roots and returns, for every line of
    /// history, the first revision accepted by `is_match`
    ///
    /// `start` itself is checked first; the walk does not continue past a
    /// matching revision. Revisions with unknown parents end their line.
    pub fn nearest<F>(&self, repository: &Repository, start: &Revision, is_match: F) -> Vec<Revision>
    where
        F: Fn(&Revision) -> bool,
    {
        let mut found = Vec::new();
        let mut visited = HashSet::from([start.clone()]);
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(revision) = queue.pop_front() {
            if is_match(&revision) {
                found.push(revision);
                continue;
            }

            for parent in self.parents(repository, &revision) {
                if visited.insert(parent.clone()) {
                    queue.push_back(parent.clone());
                }
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn rev(id: &str) -> Revision {
        Revision::committed(id)
    }

    /// History:
    ///       A
    ///      / \
    ///     B   C
    ///      \ /
    ///       D
    ///       |
    ///       E
    #[fixture]
    fn diamond() -> RevisionDag {
        let repository = Repository::default();
        let mut dag = RevisionDag::new();
        dag.record(&repository, &rev("A"), &[]);
        dag.record(&repository, &rev("B"), &[rev("A")]);
        dag.record(&repository, &rev("C"), &[rev("A")]);
        dag.record(&repository, &rev("D"), &[rev("B"), rev("C")]);
        dag.record(&repository, &rev("E"), &[rev("D")]);
        dag
    }

    #[rstest]
    fn start_matching_itself_is_returned_alone(diamond: RevisionDag) {
        let found = diamond.nearest(&Repository::default(), &rev("E"), |_| true);

        assert_eq!(found, vec![rev("E")]);
    }

    #[rstest]
    fn walk_stops_at_first_match_on_each_line(diamond: RevisionDag) {
        let found = diamond.nearest(&Repository::default(), &rev("E"), |r| {
            *r == rev("B") || *r == rev("A")
        });

        // A is still reached through C
        assert_eq!(found, vec![rev("B"), rev("A")]);
    }

    #[rstest]
    fn shared_ancestor_is_reported_once(diamond: RevisionDag) {
        let found = diamond.nearest(&Repository::default(), &rev("D"), |r| *r == rev("A"));

        assert_eq!(found, vec![rev("A")]);
    }

    #[rstest]
    fn unknown_revision_has_no_parents(diamond: RevisionDag) {
        let found = diamond.nearest(&Repository::default(), &rev("Z"), |r| *r == rev("A"));

        assert!(found.is_empty());
        assert!(!diamond.contains(&Repository::default(), &rev("Z")));
    }

    #[test]
    fn parents_recorded_twice_are_unioned() {
        let repository = Repository::default();
        let mut dag = RevisionDag::new();
        dag.record(&repository, &rev("M"), &[rev("A")]);
        dag.record(&repository, &rev("M"), &[rev("A"), rev("B"), rev("M")]);

        assert_eq!(dag.parents(&repository, &rev("M")), &[rev("A"), rev("B")]);
    }
}

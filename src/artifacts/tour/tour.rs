use crate::artifacts::revision::revisioned_file::RevisionedFile;
use crate::artifacts::tour::stop::Stop;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Tour {
    description: String,
    stops: Vec<Stop>,
}

impl Tour {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Combines the stops of both tours into a new tour
    ///
    /// Stops are grouped by file, files in the order they first appear
    /// (this tour's first). Within a file, stops that overlap or touch are
    /// merged until no two remaining stops can be merged, then sorted by
    /// starting line.
    pub fn merge_with(&self, other: &Tour) -> Tour {
        let mut buckets: Vec<(&RevisionedFile, Vec<Stop>)> = Vec::new();
        for stop in self.stops.iter().chain(&other.stops) {
            let file = stop.most_recent_file();
            match buckets.iter_mut().find(|(known, _)| *known == file) {
                Some((_, stops)) => stops.push(stop.clone()),
                None => buckets.push((file, vec![stop.clone()])),
            }
        }

        let stops = buckets
            .into_iter()
            .flat_map(|(_, stops)| {
                let mut merged = Self::merge_in_same_file(stops);
                merged.sort_by_key(Stop::line);
                merged
            })
            .collect();

        Tour::new(format!("{} + {}", self.description, other.description), stops)
    }

    fn merge_in_same_file(mut remaining: Vec<Stop>) -> Vec<Stop> {
        let mut merged = Vec::new();

        while !remaining.is_empty() {
            let mut current = remaining.remove(0);
            loop {
                let (mergeable, rest): (Vec<_>, Vec<_>) = remaining
                    .into_iter()
                    .partition(|stop| current.can_be_merged_with(stop));
                remaining = rest;
                if mergeable.is_empty() {
                    break;
                }
                current = mergeable
                    .iter()
                    .fold(current, |acc, stop| acc.merge(stop));
            }
            merged.push(current);
        }

        merged
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.description)?;
        for stop in &self.stops {
            writeln!(f, "  {stop}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::fragment::fragment::Fragment;
    use crate::artifacts::revision::repository::Repository;
    use crate::artifacts::revision::revision::Revision;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn file(path: &str) -> RevisionedFile {
        RevisionedFile::new(path, Revision::committed("12"), Repository::default())
    }

    fn at(path: &str, start: usize, end: usize) -> Stop {
        Stop::for_fragment(Fragment::lines(file(path), start, end))
    }

    #[rstest]
    fn overlapping_stops_of_two_tours_become_one() {
        let a = Tour::new("A".into(), vec![at("x.rs", 3, 7)]);
        let b = Tour::new("B".into(), vec![at("x.rs", 5, 10)]);

        let merged = a.merge_with(&b);

        assert_eq!(merged, Tour::new("A + B".into(), vec![at("x.rs", 3, 10)]));
        assert_eq!(a.stops(), &[at("x.rs", 3, 7)]);
    }

    #[rstest]
    fn stops_are_grouped_by_file_and_sorted_by_line() {
        let a = Tour::new(
            "A".into(),
            vec![at("x.rs", 20, 22), at("y.rs", 1, 2), at("x.rs", 4, 6)],
        );
        let b = Tour::new("B".into(), vec![Stop::for_file(file("x.rs")), at("y.rs", 8, 9)]);

        let merged = a.merge_with(&b);

        assert_eq!(
            merged.stops(),
            &[
                Stop::for_file(file("x.rs")),
                at("x.rs", 4, 6),
                at("x.rs", 20, 22),
                at("y.rs", 1, 2),
                at("y.rs", 8, 9),
            ]
        );
    }

    #[rstest]
    fn bridging_stop_merges_stops_seen_before_it() {
        let a = Tour::new("A".into(), vec![at("x.rs", 1, 3), at("x.rs", 6, 8)]);
        let b = Tour::new("B".into(), vec![at("x.rs", 10, 12), at("x.rs", 2, 7)]);

        let merged = a.merge_with(&b);

        assert_eq!(merged.stops(), &[at("x.rs", 1, 8), at("x.rs", 10, 12)]);
    }

    #[rstest]
    fn description_joins_both_tours() {
        let a = Tour::new("A".into(), Vec::new());
        let b = Tour::new("B".into(), Vec::new());

        let merged = a.merge_with(&b).merge_with(&Tour::new("C".into(), Vec::new()));

        assert_eq!(merged.description(), "A + B + C");
        assert!(merged.stops().is_empty());
    }

    proptest! {
        #[test]
        fn merged_stops_of_one_file_never_touch(
            ranges in prop::collection::vec((1usize..40, 0usize..6), 0..12)
        ) {
            let stops = ranges
                .iter()
                .map(|&(start, len)| at("x.rs", start, start + len))
                .collect::<Vec<_>>();
            let merged = Tour::new("A".into(), stops).merge_with(&Tour::new("B".into(), Vec::new()));

            for pair in merged.stops().windows(2) {
                prop_assert!(pair[0].line() <= pair[1].line());
                prop_assert!(!pair[0].can_be_merged_with(&pair[1]));
            }
        }
    }
}

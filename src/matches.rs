//! Result types produced by match detection, collapse and refill.

use crate::board::Coord;
use std::collections::BTreeSet;

/// A deduplicated set of coordinates found to be mutually matched in one detection pass.
///
/// Insertion is idempotent. Iteration is row-major so results are stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchSet {
    cells: BTreeSet<Coord>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a coordinate. Returns `false` if it was already present.
    pub fn insert(&mut self, coord: Coord) -> bool {
        self.cells.insert(coord)
    }

    /// Unions `other` into `self`.
    pub fn union_with(&mut self, other: &MatchSet) {
        self.cells.extend(other.cells.iter().copied());
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }

    /// The distinct columns touched by this match, in ascending order.
    pub fn columns(&self) -> Vec<usize> {
        let columns: BTreeSet<usize> = self.cells.iter().map(|&(_, c)| c).collect();
        columns.into_iter().collect()
    }
}

impl FromIterator<Coord> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        MatchSet {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Coord> for MatchSet {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

/// Cells that received a token during a collapse or refill, plus the largest
/// number of rows any token travelled.
///
/// `max_distance` is for callers that pace animation; the engine never waits on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollapseResult {
    pub affected: BTreeSet<Coord>,
    pub max_distance: usize,
}

impl CollapseResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `coord` received a token that travelled `distance` rows.
    pub fn record(&mut self, coord: Coord, distance: usize) {
        self.affected.insert(coord);
        self.max_distance = self.max_distance.max(distance);
    }

    /// Unions `other` into `self`, keeping the larger distance.
    pub fn merge(&mut self, other: &CollapseResult) {
        self.affected.extend(other.affected.iter().copied());
        self.max_distance = self.max_distance.max(other.max_distance);
    }

    pub fn is_empty(&self) -> bool {
        self.affected.is_empty()
    }
}

/// Outcome of refilling empty cells from a token source.
///
/// `unfilled` lists cells the source could not supply; they stay empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Refill {
    pub filled: CollapseResult,
    pub unfilled: Vec<Coord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_set_insert_is_idempotent() {
        let mut set = MatchSet::new();
        assert!(set.insert((1, 1)));
        assert!(!set.insert((1, 1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_match_set_columns_are_distinct_and_sorted() {
        let set: MatchSet = [(0, 3), (1, 3), (2, 3), (2, 1), (2, 2)].into_iter().collect();
        assert_eq!(set.columns(), vec![1, 2, 3]);
    }

    #[test]
    fn test_match_set_iterates_row_major() {
        let set: MatchSet = [(2, 0), (0, 1), (0, 0)].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![(0, 0), (0, 1), (2, 0)]);
    }

    #[test]
    fn test_collapse_result_merge_keeps_max_distance() {
        let mut a = CollapseResult::new();
        a.record((3, 0), 2);
        let mut b = CollapseResult::new();
        b.record((0, 0), 1);
        b.record((3, 0), 1);

        a.merge(&b);
        assert_eq!(a.max_distance, 2);
        assert_eq!(a.affected.len(), 2);
    }
}

use itertools::Itertools;

use crate::{nfa::StateIndex, Show};

/// A set of NFA states in canonical form, i.e. its members are sorted ascending and free of
/// duplicates. Two state sets compare equal (and hash equally) precisely if they contain the
/// same states, no matter in which order these were discovered, which makes `StateSet` usable
/// as the identity of a state in the subset construction.
///
/// The empty state set corresponds to the trap state of a determinized automaton.
#[derive(Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StateSet(Vec<StateIndex>);

impl StateSet {
    /// Creates the empty state set.
    pub fn empty() -> Self {
        Self(vec![])
    }

    /// Builds a state set from a vector whose entries may be in arbitrary order and may
    /// repeat.
    pub fn from_unsorted(mut states: Vec<StateIndex>) -> Self {
        states.sort_unstable();
        states.dedup();
        Self(states)
    }

    /// Returns true if the set has no members, i.e. it represents the trap state.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks for membership, uses binary search as the members are sorted.
    pub fn contains(&self, q: StateIndex) -> bool {
        self.0.binary_search(&q).is_ok()
    }

    /// Iterates over the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.0.iter().copied()
    }

    /// Gives access to the sorted members.
    pub fn as_slice(&self) -> &[StateIndex] {
        &self.0
    }

    /// The canonical label of the set: its members in ascending order, separated by a single
    /// space. The empty set has the empty label.
    pub fn label(&self) -> String {
        self.0.iter().join(" ")
    }
}

impl FromIterator<StateIndex> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateIndex>>(iter: T) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

impl IntoIterator for StateSet {
    type Item = StateIndex;
    type IntoIter = std::vec::IntoIter<StateIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "{{{}}}", self.0.iter().join(", "))
        }
    }
}

impl Show for StateSet {
    fn show(&self) -> String {
        format!("[{}]", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::StateSet;
    use crate::Show;

    #[test]
    fn canonical_form() {
        let left: StateSet = [3, 1, 2, 1].into_iter().collect();
        let right = StateSet::from_unsorted(vec![2, 3, 1]);
        assert_eq!(left, right);
        assert_eq!(left.as_slice(), &[1, 2, 3]);
        assert_eq!(left.label(), "1 2 3");
        assert_eq!(left.show(), "[1 2 3]");
        assert!(left.contains(2));
        assert!(!left.contains(0));
    }

    #[test]
    fn empty_set_has_empty_label() {
        let empty = StateSet::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.label(), "");
        assert_eq!(empty.show(), "[]");
        assert_eq!(format!("{empty:?}"), "∅");
        assert_eq!(StateSet::from_unsorted(vec![4, 4]).label(), "4");
    }
}

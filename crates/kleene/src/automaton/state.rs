//! State types for automata.

use std::collections::BTreeSet;
use std::fmt;

/// A state identifier represented as a u32.
pub type StateId = u32;

/// An ordered set of states.
///
/// Identifiers are opaque: the set stores its members, so its size depends
/// on how many states it holds and not on how large their identifiers are.
/// Algorithms that need bit sets index the states of one automaton densely
/// instead (see [`crate::FiniteAutomaton::epsilon_closure`]).
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet {
    states: BTreeSet<StateId>,
}

impl StateSet {
    /// Create a state set containing a single state.
    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::default();
        set.insert(state);
        set
    }

    /// Insert a state into the set. Returns `true` if it was not present.
    pub fn insert(&mut self, state: StateId) -> bool {
        self.states.insert(state)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.states.contains(&state)
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Iterate over all states in the set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().copied()
    }

    /// The smallest state in the set, if any.
    pub fn first(&self) -> Option<StateId> {
        self.states.first().copied()
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        self.states.extend(other.iter());
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|state| large.contains(state))
    }

    /// The states as a sorted vector.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        self.states.extend(iter);
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::default();
        assert!(set.is_empty());

        assert!(set.insert(3));
        assert!(set.insert(7));
        assert!(!set.insert(7));
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
        assert!(!set.contains(500));
        assert_eq!(format!("{set:?}"), "{3, 7}");
    }

    #[test]
    fn test_state_set_with_large_identifiers() {
        let mut set = StateSet::singleton(u32::MAX);
        set.insert(40);
        assert_eq!(set.len(), 2);
        assert_eq!(set.first(), Some(40));
        assert_eq!(set.to_vec(), vec![40, u32::MAX]);
    }

    #[test]
    fn test_state_set_union() {
        let mut set1: StateSet = [1, 3].into_iter().collect();
        let set2: StateSet = [2, 3, 12].into_iter().collect();

        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![1, 2, 3, 12]);
    }

    #[test]
    fn test_state_set_intersects() {
        let set1: StateSet = [1, 3, 5, 20].into_iter().collect();
        let set2: StateSet = [2, 5].into_iter().collect();
        let set3: StateSet = [2, 4, 6, 8, 10].into_iter().collect();

        assert!(set1.intersects(&set2));
        assert!(set2.intersects(&set1));
        assert!(!set1.intersects(&set3));
        assert!(!set1.intersects(&StateSet::default()));
    }
}

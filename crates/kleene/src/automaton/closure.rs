//! Epsilon closure and single-symbol steps.
//!
//! The work happens on bit sets over the dense state indices of one
//! automaton; the public methods translate from and to [`StateSet`].

use crate::automaton::finite_automaton::FiniteAutomaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Label, Symbol};
use fixedbitset::FixedBitSet;
use std::collections::VecDeque;

impl FiniteAutomaton {
    /// Get the epsilon closure of a set of states: the smallest superset
    /// closed under epsilon transitions.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut dense = self.dense_set(states);
        self.close(&mut dense);

        let mut closure = states.clone();
        closure.extend(dense.ones().map(|index| self.state_at(index)));
        closure
    }

    /// Get the states reachable from a set of states on a given symbol.
    /// Returns the epsilon closure of the reached states.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        let reached = self.step(&self.dense_set(states), symbol);
        reached.ones().map(|index| self.state_at(index)).collect()
    }

    /// An empty bit set with room for every state.
    pub(crate) fn empty_dense_set(&self) -> FixedBitSet {
        FixedBitSet::with_capacity(self.num_states())
    }

    /// The declared states of `states` as a bit set of dense indices.
    fn dense_set(&self, states: &StateSet) -> FixedBitSet {
        let mut dense = self.empty_dense_set();
        dense.extend(states.iter().filter_map(|state| self.index_of(state)));
        dense
    }

    /// The epsilon closure of the initial state.
    pub(crate) fn initial_closure(&self) -> FixedBitSet {
        let mut dense = self.empty_dense_set();
        dense.insert(self.initial_index());
        self.close(&mut dense);
        dense
    }

    /// Close `set` under epsilon transitions, in place.
    pub(crate) fn close(&self, set: &mut FixedBitSet) {
        let mut queue: VecDeque<usize> = set.ones().collect();

        while let Some(index) = queue.pop_front() {
            if let Some(destinations) = self.successors(self.state_at(index), Label::Epsilon) {
                for dest in destinations.iter().filter_map(|state| self.index_of(state)) {
                    if !set.put(dest) {
                        queue.push_back(dest);
                    }
                }
            }
        }
    }

    /// Move every state of `set` on `symbol`, then close the result.
    pub(crate) fn step(&self, set: &FixedBitSet, symbol: Symbol) -> FixedBitSet {
        let mut reached = self.empty_dense_set();

        for index in set.ones() {
            if let Some(destinations) = self.successors(self.state_at(index), symbol) {
                reached.extend(destinations.iter().filter_map(|state| self.index_of(state)));
            }
        }

        self.close(&mut reached);
        reached
    }

    /// Check whether any state of `set` is final.
    pub(crate) fn any_final(&self, set: &FixedBitSet) -> bool {
        set.ones().any(|index| self.is_final(self.state_at(index)))
    }

    /// The states of `set`, in ascending order.
    pub(crate) fn members(&self, set: &FixedBitSet) -> Vec<StateId> {
        let mut members: Vec<StateId> = set.ones().map(|index| self.state_at(index)).collect();
        members.sort_unstable();
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_closure() {
        let mut fa = FiniteAutomaton::new(0);

        // 0 -ε-> 1 -ε-> 2, 3 is isolated
        fa.add_transition(0, Label::Epsilon, 1);
        fa.add_transition(1, Label::Epsilon, 2);
        fa.add_state(3);

        let closure = fa.epsilon_closure(&StateSet::singleton(0));
        assert_eq!(closure.to_vec(), vec![0, 1, 2]);

        let closure = fa.epsilon_closure(&StateSet::singleton(3));
        assert_eq!(closure.to_vec(), vec![3]);
    }

    #[test]
    fn test_epsilon_closure_with_cycle() {
        let mut fa = FiniteAutomaton::new(0);
        fa.add_transition(0, Label::Epsilon, 1);
        fa.add_transition(1, Label::Epsilon, 0);
        fa.add_transition(1, 'a', 2);

        let closure = fa.epsilon_closure(&StateSet::singleton(1));
        assert_eq!(closure.to_vec(), vec![0, 1]);
    }

    #[test]
    fn test_epsilon_closure_of_empty_set() {
        let mut fa = FiniteAutomaton::new(0);
        fa.add_transition(0, Label::Epsilon, 1);
        assert!(fa.epsilon_closure(&StateSet::default()).is_empty());
    }

    #[test]
    fn test_epsilon_closure_keeps_undeclared_states() {
        let mut fa = FiniteAutomaton::new(0);
        fa.add_transition(0, Label::Epsilon, 1);

        let closure = fa.epsilon_closure(&[0, 9].into_iter().collect::<StateSet>());
        assert_eq!(closure.to_vec(), vec![0, 1, 9]);
    }

    #[test]
    fn test_dense_sets_follow_declaration_order() {
        let mut fa = FiniteAutomaton::new(30);
        fa.add_transition(30, Label::Epsilon, 10);
        fa.add_transition(10, 'a', 20);
        fa.add_final_state(20);

        let initial = fa.initial_closure();
        assert_eq!(initial.len(), 3);
        assert_eq!(initial.ones().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(fa.members(&initial), vec![10, 30]);
        assert!(!fa.any_final(&initial));

        let reached = fa.step(&initial, 'a');
        assert_eq!(fa.members(&reached), vec![20]);
        assert!(fa.any_final(&reached));
    }

    #[test]
    fn test_move_on_symbol() {
        let mut fa = FiniteAutomaton::new(0);

        // 0 -a-> 1, 0 -a-> 2, 1 -ε-> 3
        fa.add_transition(0, 'a', 1);
        fa.add_transition(0, 'a', 2);
        fa.add_transition(1, Label::Epsilon, 3);

        let reached = fa.move_on_symbol(&StateSet::singleton(0), 'a');
        // 3 is reached via epsilon from 1
        assert_eq!(reached.to_vec(), vec![1, 2, 3]);

        assert!(fa.move_on_symbol(&StateSet::singleton(0), 'b').is_empty());
    }
}

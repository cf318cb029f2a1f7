//! Subset construction algorithm for converting an ε-NFA into a DFA.

use crate::automaton::finite_automaton::FiniteAutomaton;
use crate::automaton::state::StateId;
use fixedbitset::FixedBitSet;
use indexmap::IndexMap;
use indexmap::map::Entry;
use log::{debug, trace};
use std::collections::VecDeque;

impl FiniteAutomaton {
    /// Convert the automaton into an equivalent DFA using the powerset
    /// construction.
    ///
    /// Every state of the result stands for the epsilon closure of a set of
    /// original states (see [`FiniteAutomaton::state_mapping`]). The result
    /// has no epsilon transitions and exactly one transition per state and
    /// symbol: moves that lead nowhere in the original go to a non-accepting
    /// sink state, the compound state of the empty set, which loops on every
    /// symbol. States are numbered in discovery order, so the initial state
    /// is always `0`.
    pub fn determinize(&self) -> FiniteAutomaton {
        // Each DFA state corresponds to a set of original states. All the
        // bit sets have one bit per original state, so equal sets hash alike.
        let mut dfa_states: IndexMap<FixedBitSet, StateId> = IndexMap::new();
        let mut worklist: VecDeque<(FixedBitSet, StateId)> = VecDeque::new();

        let initial_set = self.initial_closure();
        let mut dfa = FiniteAutomaton::new(0);
        for &symbol in self.alphabet() {
            dfa.add_symbol(symbol);
        }

        if self.any_final(&initial_set) {
            dfa.add_final_state(0);
        }
        trace!("Add state 0: {:?}", self.members(&initial_set));
        dfa_states.insert(initial_set.clone(), 0);
        worklist.push_back((initial_set, 0));

        while let Some((current_set, current_dfa_state)) = worklist.pop_front() {
            for &symbol in self.alphabet() {
                let next_set = self.step(&current_set, symbol);

                let next_dfa_state = match dfa_states.entry(next_set) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let new_state = entry.index() as StateId;
                        let next_set = entry.key().clone();
                        entry.insert(new_state);
                        dfa.add_state(new_state);

                        // A compound state accepts as soon as one member does.
                        if self.any_final(&next_set) {
                            dfa.add_final_state(new_state);
                        }

                        trace!("Add state {}: {:?}", new_state, self.members(&next_set));
                        worklist.push_back((next_set, new_state));
                        new_state
                    }
                };

                dfa.add_transition(current_dfa_state, symbol, next_dfa_state);
            }
        }

        debug!(
            "Determinized {} states into {} states",
            self.num_states(),
            dfa_states.len()
        );

        let inverse_mapping: IndexMap<StateId, Vec<StateId>> = dfa_states
            .into_iter()
            .map(|(members, dfa_state)| (dfa_state, self.members(&members)))
            .collect();
        dfa.set_state_mapping(inverse_mapping);

        dfa
    }
}

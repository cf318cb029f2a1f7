//! Finite automaton with optional epsilon transitions.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Label, Symbol};
use crate::error::{AutomatonError, Result};
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeSet, HashMap};
use std::iter;

/// A finite automaton. Depending on how it was produced it may be an
/// epsilon-NFA, an NFA or a DFA; the same representation serves all three.
///
/// State identifiers are opaque. Every declared state also has a dense
/// index, its position in `states`, which the set-based algorithms use to
/// size their bit sets by the number of states.
#[derive(Debug, Clone)]
pub struct FiniteAutomaton {
    /// Dense index of the initial state
    initial: usize,
    /// Declared states, in declaration order
    states: IndexSet<StateId>,
    /// All symbols of the alphabet (never contains epsilon)
    alphabet: BTreeSet<Symbol>,
    /// Transitions: (source, label) -> set of destination states
    transitions: HashMap<(StateId, Label), StateSet>,
    /// Final (accepting) states
    final_states: StateSet,
    /// For automata produced by subset construction or minimization, the
    /// original states each state stands for.
    state_mapping: Option<IndexMap<StateId, Vec<StateId>>>,
}

impl FiniteAutomaton {
    /// Create an automaton holding only its initial state, which is not
    /// final. It accepts the empty language.
    pub fn new(initial: StateId) -> Self {
        let mut states = IndexSet::new();
        states.insert(initial);
        Self {
            initial: 0,
            states,
            alphabet: BTreeSet::new(),
            transitions: HashMap::new(),
            final_states: StateSet::default(),
            state_mapping: None,
        }
    }

    /// Build an automaton from a complete description, checking that the
    /// description is consistent: the initial state, the final states and
    /// every transition endpoint must be declared states, and every
    /// transition symbol must belong to the alphabet.
    pub fn from_parts(
        initial: StateId,
        states: impl IntoIterator<Item = StateId>,
        alphabet: impl IntoIterator<Item = Symbol>,
        transitions: impl IntoIterator<Item = (StateId, Label, StateId)>,
        final_states: impl IntoIterator<Item = StateId>,
    ) -> Result<Self> {
        let states: IndexSet<StateId> = states.into_iter().collect();
        let alphabet: BTreeSet<Symbol> = alphabet.into_iter().collect();

        let Some(initial_index) = states.get_index_of(&initial) else {
            return Err(AutomatonError::UnknownInitialState(initial).into());
        };

        let mut final_set = StateSet::default();
        for state in final_states {
            if !states.contains(&state) {
                return Err(AutomatonError::UnknownFinalState(state).into());
            }
            final_set.insert(state);
        }

        let mut automaton = Self {
            initial: initial_index,
            states,
            alphabet,
            transitions: HashMap::new(),
            final_states: final_set,
            state_mapping: None,
        };

        for (from, label, to) in transitions {
            if !automaton.states.contains(&from) || !automaton.states.contains(&to) {
                return Err(AutomatonError::UnknownTransitionState { from, to }.into());
            }
            if let Label::Symbol(symbol) = label {
                if !automaton.alphabet.contains(&symbol) {
                    return Err(AutomatonError::UnknownSymbol {
                        symbol,
                        state: from,
                    }
                    .into());
                }
            }
            automaton.insert_transition(from, label, to);
        }

        Ok(automaton)
    }

    /// Declare a state.
    pub(crate) fn add_state(&mut self, state: StateId) {
        self.states.insert(state);
    }

    /// Declare a state and mark it as final.
    pub(crate) fn add_final_state(&mut self, state: StateId) {
        self.states.insert(state);
        self.final_states.insert(state);
    }

    /// Declare a state and make it the initial state.
    pub(crate) fn set_initial(&mut self, state: StateId) {
        self.initial = self.states.insert_full(state).0;
    }

    /// Unmark every final state, returning the states that were final.
    pub(crate) fn take_final_states(&mut self) -> StateSet {
        std::mem::take(&mut self.final_states)
    }

    /// Add a symbol to the alphabet, even if no transition uses it.
    pub(crate) fn add_symbol(&mut self, symbol: Symbol) {
        self.alphabet.insert(symbol);
    }

    pub(crate) fn set_state_mapping(&mut self, mapping: IndexMap<StateId, Vec<StateId>>) {
        self.state_mapping = Some(mapping);
    }

    /// Move the states, alphabet, transitions and final states of `other`
    /// into this automaton, which keeps its initial state. The two automata
    /// must not share states.
    pub(crate) fn absorb(&mut self, other: FiniteAutomaton) {
        self.states.extend(other.states);
        self.alphabet.extend(other.alphabet);
        self.final_states.union_with(&other.final_states);
        for (key, targets) in other.transitions {
            self.transitions.entry(key).or_default().union_with(&targets);
        }
    }

    /// Dense index of a declared state.
    pub(crate) fn index_of(&self, state: StateId) -> Option<usize> {
        self.states.get_index_of(&state)
    }

    /// The state with the given dense index. Indices come from this
    /// automaton and are always below [`Self::num_states`].
    pub(crate) fn state_at(&self, index: usize) -> StateId {
        self.states[index]
    }

    pub(crate) fn initial_index(&self) -> usize {
        self.initial
    }

    /// Add a transition from source to destination on the given label.
    ///
    /// Both endpoints become declared states and a symbol label joins the
    /// alphabet. Adding the same transition twice has no further effect.
    pub fn add_transition(&mut self, source: StateId, label: impl Into<Label>, destination: StateId) {
        let label = label.into();
        self.states.insert(source);
        self.states.insert(destination);
        if let Label::Symbol(symbol) = label {
            self.alphabet.insert(symbol);
        }
        self.insert_transition(source, label, destination);
    }

    fn insert_transition(&mut self, source: StateId, label: Label, destination: StateId) {
        self.transitions
            .entry((source, label))
            .or_default()
            .insert(destination);
    }

    pub fn initial(&self) -> StateId {
        self.state_at(self.initial)
    }

    /// Get the declared states, in ascending order.
    pub fn states(&self) -> StateSet {
        self.states.iter().copied().collect()
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Get the alphabet (all symbols except epsilon), in ascending order.
    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Get the destinations of a state on a label, if there are any.
    pub fn successors(&self, state: StateId, label: impl Into<Label>) -> Option<&StateSet> {
        self.transitions.get(&(state, label.into()))
    }

    /// Get every outgoing transition of a state, grouped by label, epsilon
    /// first and then symbols in ascending order.
    pub fn transitions_from(&self, state: StateId) -> Vec<(Label, &StateSet)> {
        iter::once(Label::Epsilon)
            .chain(self.alphabet.iter().map(|&symbol| Label::Symbol(symbol)))
            .filter_map(|label| self.successors(state, label).map(|targets| (label, targets)))
            .collect()
    }

    /// Get all transitions as an iterator, in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Label, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, label), dests)| dests.iter().map(move |dst| (src, label, dst)))
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.values().map(StateSet::len).sum()
    }

    /// Get the mapping from each state to the original states it stands for,
    /// when the automaton was produced by determinization or minimization.
    pub fn state_mapping(&self) -> Option<&IndexMap<StateId, Vec<StateId>>> {
        self.state_mapping.as_ref()
    }

    /// Convert to an ordered map representation (state, then label), suitable
    /// for rendering and for comparing automata in tests.
    pub fn to_transition_map(&self) -> IndexMap<StateId, IndexMap<Label, Vec<StateId>>> {
        let mut map: IndexMap<StateId, IndexMap<Label, Vec<StateId>>> = IndexMap::new();

        for state in self.states().iter() {
            for (label, targets) in self.transitions_from(state) {
                map.entry(state)
                    .or_default()
                    .insert(label, targets.to_vec());
            }
        }

        map
    }

    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions
            .iter()
            .any(|(&(_, label), targets)| label.is_epsilon() && !targets.is_empty())
    }

    /// Check that there are no epsilon transitions and at most one
    /// destination for every (state, symbol) pair.
    pub fn is_deterministic(&self) -> bool {
        !self.has_epsilon_transitions() && self.transitions.values().all(|targets| targets.len() <= 1)
    }

    /// Check that the automaton is deterministic and that every state has
    /// exactly one transition on every symbol of the alphabet.
    pub fn is_complete(&self) -> bool {
        self.is_deterministic()
            && self.states.iter().all(|&state| {
                self.alphabet
                    .iter()
                    .all(|&symbol| self.successors(state, symbol).is_some_and(|t| t.len() == 1))
            })
    }

    /// Check if the automaton accepts no string at all, that is if no final
    /// state is reachable from the initial state.
    pub fn is_empty(&self) -> bool {
        self.final_states.is_empty() || !self.reachable_states().intersects(&self.final_states)
    }
}

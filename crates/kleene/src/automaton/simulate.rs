//! Membership test by simulating the automaton on a string.

use crate::automaton::finite_automaton::FiniteAutomaton;
use log::trace;

impl FiniteAutomaton {
    /// Check if the automaton accepts `input`.
    ///
    /// Tracks the set of live states, taking the epsilon closure after
    /// every step, so it works unchanged for ε-NFAs, NFAs and DFAs. Stops
    /// as soon as no state is live.
    pub fn accepts(&self, input: &str) -> bool {
        let mut live = self.initial_closure();

        for (position, symbol) in input.chars().enumerate() {
            live = self.step(&live, symbol);
            if live.is_clear() {
                trace!("No live states after symbol {} ({:?})", position, symbol);
                return false;
            }
        }

        self.any_final(&live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Label;

    #[test]
    fn test_accepts_with_epsilon() {
        // 0 -ε-> 1 -a-> 2 -ε-> 3(final), 3 -ε-> 1
        let mut fa = FiniteAutomaton::new(0);
        fa.add_transition(0, Label::Epsilon, 1);
        fa.add_transition(1, 'a', 2);
        fa.add_transition(2, Label::Epsilon, 3);
        fa.add_transition(3, Label::Epsilon, 1);
        fa.add_final_state(3);

        assert!(!fa.accepts(""));
        assert!(fa.accepts("a"));
        assert!(fa.accepts("aaaa"));
        assert!(!fa.accepts("ab"));
    }

    #[test]
    fn test_accepts_empty_string_when_initial_is_final() {
        let mut fa = FiniteAutomaton::new(0);
        fa.add_final_state(0);
        assert!(fa.accepts(""));
        assert!(!fa.accepts("a"));
    }

    #[test]
    fn test_symbols_outside_alphabet_reject() {
        let mut fa = FiniteAutomaton::new(0);
        fa.add_transition(0, 'a', 0);
        fa.add_final_state(0);
        assert!(fa.accepts("aa"));
        assert!(!fa.accepts("aza"));
        assert!(!fa.accepts("λ"));
    }
}

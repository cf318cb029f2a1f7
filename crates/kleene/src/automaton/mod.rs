//! Finite automata over character alphabets.
//!
//! This module provides a single automaton type covering ε-NFAs, NFAs and
//! DFAs, with:
//! - Epsilon closure computation
//! - Subset construction (ε-NFA to complete DFA)
//! - Moore partition-refinement minimization
//! - Membership testing by closure-and-step simulation

mod closure;
mod finite_automaton;
mod minimize;
mod simulate;
mod state;
mod subset_construction;
mod symbol;

pub use finite_automaton::FiniteAutomaton;
pub use state::{StateId, StateSet};
pub use symbol::{Label, Symbol};

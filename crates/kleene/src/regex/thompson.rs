//! Thompson construction: builds an ε-NFA from an expression in reverse
//! Polish notation, one automaton per operator.

use crate::automaton::{FiniteAutomaton, Label, StateId, Symbol};
use crate::error::{ExpressionError, Result};
use crate::regex::rpn::{Rpn, Token};
use log::{debug, trace};
use std::collections::HashMap;

/// Hands out state identifiers that are unique across one whole
/// construction.
#[derive(Debug, Default)]
pub struct StateAllocator {
    next_id: StateId,
}

impl StateAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a state identifier never returned before by this allocator.
    pub fn fresh(&mut self) -> StateId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of identifiers handed out so far.
    pub fn allocated(&self) -> usize {
        self.next_id as usize
    }
}

/// Builds automata with the Thompson operators.
///
/// None of the public operators modify their operands. Their results live
/// in a fresh namespace obtained from the builder's [`StateAllocator`]:
/// operands are copied with relabeled states, so no two automata ever
/// share states or transitions.
///
/// [`ThompsonBuilder::build`] owns the intermediate automata of the
/// expression, which already have disjoint states, so it composes them
/// directly. Every identifier it allocates ends up in the result, whose
/// states are therefore numbered `0..n`.
#[derive(Debug, Default)]
pub struct ThompsonBuilder {
    allocator: StateAllocator,
}

impl ThompsonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocator(&self) -> &StateAllocator {
        &self.allocator
    }

    /// Evaluate an expression in reverse Polish notation.
    ///
    /// An empty expression denotes the empty language.
    pub fn build(&mut self, rpn: &Rpn) -> Result<FiniteAutomaton> {
        let mut stack: Vec<FiniteAutomaton> = Vec::new();

        for (token, position) in rpn.iter() {
            let operator = token.as_char(rpn.epsilon_token());
            let automaton = match token {
                Token::Symbol(symbol) => self.symbol(symbol),
                Token::Epsilon => self.epsilon(),
                Token::Star => {
                    let operand = pop_operand(&mut stack, operator, position)?;
                    self.star_of(operand)
                }
                Token::Union | Token::Concat => {
                    // The right operand was pushed last
                    let right = pop_operand(&mut stack, operator, position)?;
                    let left = pop_operand(&mut stack, operator, position)?;
                    if token == Token::Union {
                        self.union_of(left, right)
                    } else {
                        Self::concat_of(left, right)
                    }
                }
            };
            trace!(
                "Applied `{}`: {} states, {} transitions",
                operator,
                automaton.num_states(),
                automaton.num_transitions()
            );
            stack.push(automaton);
        }

        let automaton = match stack.len() {
            0 => self.empty(),
            1 => stack.remove(0),
            count => return Err(ExpressionError::DanglingOperands { count }.into()),
        };

        debug!(
            "Built automaton with {} states and {} transitions",
            automaton.num_states(),
            automaton.num_transitions()
        );
        Ok(automaton)
    }

    /// An automaton accepting nothing: one non-final state.
    pub fn empty(&mut self) -> FiniteAutomaton {
        FiniteAutomaton::new(self.allocator.fresh())
    }

    /// An automaton accepting only the empty string: one final state.
    pub fn epsilon(&mut self) -> FiniteAutomaton {
        let state = self.allocator.fresh();
        let mut automaton = FiniteAutomaton::new(state);
        automaton.add_final_state(state);
        automaton
    }

    /// An automaton accepting exactly the one-symbol string `symbol`.
    pub fn symbol(&mut self, symbol: Symbol) -> FiniteAutomaton {
        let initial = self.allocator.fresh();
        let accepting = self.allocator.fresh();
        let mut automaton = FiniteAutomaton::new(initial);
        automaton.add_transition(initial, symbol, accepting);
        automaton.add_final_state(accepting);
        automaton
    }

    /// The Kleene star of `operand`.
    pub fn star(&mut self, operand: &FiniteAutomaton) -> FiniteAutomaton {
        let copy = self.relabeled(operand);
        self.star_of(copy)
    }

    /// An automaton accepting the strings accepted by `left` or `right`.
    pub fn union(&mut self, left: &FiniteAutomaton, right: &FiniteAutomaton) -> FiniteAutomaton {
        let left = self.relabeled(left);
        let right = self.relabeled(right);
        self.union_of(left, right)
    }

    /// An automaton accepting a string accepted by `left` followed by a
    /// string accepted by `right`.
    pub fn concat(&mut self, left: &FiniteAutomaton, right: &FiniteAutomaton) -> FiniteAutomaton {
        let left = self.relabeled(left);
        let right = self.relabeled(right);
        Self::concat_of(left, right)
    }

    /// New initial and final states around `operand`: ε from the new
    /// initial to the old initial and to the new final, and from every old
    /// final back to the old initial and on to the new final.
    fn star_of(&mut self, mut operand: FiniteAutomaton) -> FiniteAutomaton {
        let initial = self.allocator.fresh();
        let accepting = self.allocator.fresh();
        let inner_initial = operand.initial();
        let inner_finals = operand.take_final_states();

        operand.set_initial(initial);
        operand.add_final_state(accepting);
        operand.add_transition(initial, Label::Epsilon, inner_initial);
        // Zero repetitions
        operand.add_transition(initial, Label::Epsilon, accepting);
        for state in inner_finals.iter() {
            operand.add_transition(state, Label::Epsilon, inner_initial);
            operand.add_transition(state, Label::Epsilon, accepting);
        }

        operand
    }

    /// New initial and final states joining both operands in parallel.
    fn union_of(&mut self, mut left: FiniteAutomaton, mut right: FiniteAutomaton) -> FiniteAutomaton {
        let initial = self.allocator.fresh();
        let accepting = self.allocator.fresh();
        let initials = [left.initial(), right.initial()];
        let mut finals = left.take_final_states();
        finals.union_with(&right.take_final_states());

        let mut automaton = merge(left, right);
        automaton.set_initial(initial);
        automaton.add_final_state(accepting);
        for inner_initial in initials {
            automaton.add_transition(initial, Label::Epsilon, inner_initial);
        }
        for state in finals.iter() {
            automaton.add_transition(state, Label::Epsilon, accepting);
        }

        automaton
    }

    /// ε from every final of `left` to the initial of `right`. No wrapper
    /// states: the result starts where `left` does and accepts where
    /// `right` does.
    fn concat_of(mut left: FiniteAutomaton, right: FiniteAutomaton) -> FiniteAutomaton {
        let initial = left.initial();
        let right_initial = right.initial();
        let left_finals = left.take_final_states();

        let mut automaton = merge(left, right);
        automaton.set_initial(initial);
        for state in left_finals.iter() {
            automaton.add_transition(state, Label::Epsilon, right_initial);
        }

        automaton
    }

    /// Copy `source` under fresh names: states, alphabet, transitions, the
    /// initial state and the final states.
    fn relabeled(&mut self, source: &FiniteAutomaton) -> FiniteAutomaton {
        let mut renaming: HashMap<StateId, StateId> = HashMap::with_capacity(source.num_states());
        let initial = self.relabel(source.initial(), &mut renaming);
        let mut copy = FiniteAutomaton::new(initial);

        for state in source.states().iter() {
            let new_state = self.relabel(state, &mut renaming);
            copy.add_state(new_state);
        }
        for &symbol in source.alphabet() {
            copy.add_symbol(symbol);
        }
        for (from, label, to) in source.transitions() {
            let new_from = self.relabel(from, &mut renaming);
            let new_to = self.relabel(to, &mut renaming);
            copy.add_transition(new_from, label, new_to);
        }
        for state in source.final_states().iter() {
            let new_state = self.relabel(state, &mut renaming);
            copy.add_final_state(new_state);
        }

        copy
    }

    fn relabel(&mut self, state: StateId, renaming: &mut HashMap<StateId, StateId>) -> StateId {
        *renaming
            .entry(state)
            .or_insert_with(|| self.allocator.fresh())
    }
}

/// Join two automata with disjoint states into one. The larger one
/// absorbs the smaller, and the caller picks the initial state.
fn merge(left: FiniteAutomaton, right: FiniteAutomaton) -> FiniteAutomaton {
    let (mut larger, smaller) = if left.num_states() >= right.num_states() {
        (left, right)
    } else {
        (right, left)
    };
    larger.absorb(smaller);
    larger
}

fn pop_operand(
    stack: &mut Vec<FiniteAutomaton>,
    operator: char,
    position: usize,
) -> Result<FiniteAutomaton> {
    stack
        .pop()
        .ok_or_else(|| ExpressionError::MissingOperand { operator, position }.into())
}

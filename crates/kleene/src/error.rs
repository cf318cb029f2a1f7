use thiserror::Error;

use crate::automaton::{StateId, Symbol};

/// Errors returned by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed expression: {0}")]
    MalformedExpression(#[from] ExpressionError),

    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] AutomatonError),
}

/// Problems found while converting or evaluating a regular expression.
///
/// Positions are byte offsets into the expression text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("`)` at position {position} has no matching `(`")]
    UnmatchedCloseParen { position: usize },

    #[error("`(` at position {position} is never closed")]
    UnclosedParen { position: usize },

    #[error("operator `{operator}` at position {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },

    #[error("{count} operands are left without an operator joining them")]
    DanglingOperands { count: usize },

    #[error("`{token}` is an operator and can't stand for the empty string")]
    ReservedEpsilonToken { token: char },
}

/// Automaton descriptions that break the structural invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("initial state {0} is not a declared state")]
    UnknownInitialState(StateId),

    #[error("final state {0} is not a declared state")]
    UnknownFinalState(StateId),

    #[error("transition {from} -> {to} uses an undeclared state")]
    UnknownTransitionState { from: StateId, to: StateId },

    #[error("symbol `{symbol}` on a transition from state {state} is not in the alphabet")]
    UnknownSymbol { symbol: Symbol, state: StateId },
}

pub type Result<T> = std::result::Result<T, Error>;

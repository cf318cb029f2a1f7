//! Regular expressions in Kleene syntax.
//!
//! Expressions are built from single-character symbols, `+` (union), `.`
//! (concatenation), `*` (Kleene star), parentheses and an epsilon token
//! standing for the empty string. The empty expression denotes the empty
//! language.
//!
//! ```
//! use kleene::regex::ReParser;
//!
//! let automaton = ReParser::new().create_automaton("(a+b)*abb").unwrap();
//! assert!(automaton.accepts("babb"));
//! assert!(!automaton.accepts("abba"));
//! ```

mod rpn;
mod thompson;

pub use rpn::{Rpn, Token, to_rpn};
pub use thompson::{StateAllocator, ThompsonBuilder};

use crate::automaton::FiniteAutomaton;
use crate::error::Result;

/// Turns regular expressions into automata.
#[derive(Debug, Clone)]
pub struct ReParser {
    epsilon_token: char,
    implicit_concatenation: bool,
}

impl ReParser {
    /// The character denoting the empty string unless configured otherwise.
    pub const DEFAULT_EPSILON_TOKEN: char = 'λ';

    pub fn new() -> Self {
        Self {
            epsilon_token: Self::DEFAULT_EPSILON_TOKEN,
            implicit_concatenation: true,
        }
    }

    /// Sets the character that stands for the empty string. It can't be
    /// used as a symbol afterwards. Operator and parenthesis characters keep
    /// their meaning: converting an expression with one of them as the
    /// epsilon token fails with [`ExpressionError::ReservedEpsilonToken`].
    ///
    /// [`ExpressionError::ReservedEpsilonToken`]: crate::error::ExpressionError::ReservedEpsilonToken
    pub fn epsilon_token(&mut self, token: char) -> &mut Self {
        self.epsilon_token = token;
        self
    }

    /// When enabled (the default), adjacent operands such as `ab` or `a(b)`
    /// are concatenated as if written `a.b`. When disabled, concatenation
    /// must be written with `.`.
    pub fn implicit_concatenation(&mut self, yes: bool) -> &mut Self {
        self.implicit_concatenation = yes;
        self
    }

    /// Convert an expression into reverse Polish notation.
    pub fn to_rpn(&self, expression: &str) -> Result<Rpn> {
        rpn::convert(expression, self.epsilon_token, self.implicit_concatenation)
    }

    /// Build an ε-NFA accepting the language of `expression`.
    ///
    /// State identifiers start from `0` on every call, so building the same
    /// expression twice gives identical automata.
    pub fn create_automaton(&self, expression: &str) -> Result<FiniteAutomaton> {
        let rpn = self.to_rpn(expression)?;
        ThompsonBuilder::new().build(&rpn)
    }
}

impl Default for ReParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::StateId;
    use crate::error::{Error, ExpressionError};
    use std::time::{Duration, Instant};

    #[test]
    fn test_create_automaton() {
        let aut = ReParser::new().create_automaton("ab").unwrap();
        assert!(aut.accepts("ab"));
        assert!(!aut.accepts("a"));
        assert!(!aut.accepts("b"));
        assert!(!aut.accepts("abab"));
    }

    #[test]
    fn test_custom_epsilon_token() {
        let mut parser = ReParser::new();
        parser.epsilon_token('#');

        let aut = parser.create_automaton("a(#+b)").unwrap();
        assert!(aut.accepts("a"));
        assert!(aut.accepts("ab"));
        assert!(!aut.accepts("a#"));

        // The default token is an ordinary symbol now
        let aut = parser.create_automaton("λ").unwrap();
        assert!(aut.accepts("λ"));
        assert!(!aut.accepts(""));
    }

    #[test]
    fn test_rpn_uses_configured_epsilon_token() {
        let mut parser = ReParser::new();
        parser.epsilon_token('#');
        assert_eq!(parser.to_rpn("a(#+b)").unwrap().to_string(), "a#b+.");
    }

    #[test]
    fn test_operator_as_epsilon_token() {
        let mut parser = ReParser::new();
        parser.epsilon_token('*');
        assert_eq!(
            parser.create_automaton("a*").unwrap_err(),
            Error::MalformedExpression(ExpressionError::ReservedEpsilonToken { token: '*' })
        );
    }

    #[test]
    fn test_long_expressions_stay_dense() {
        let started = Instant::now();
        let parser = ReParser::new();

        let word = "a".repeat(2000);
        let aut = parser.create_automaton(&word).unwrap();
        assert_eq!(aut.num_states(), 4000);
        assert_eq!(aut.states().to_vec(), (0..4000).collect::<Vec<StateId>>());
        assert!(aut.accepts(&word));
        assert!(!aut.accepts(&word[1..]));

        let aut = parser.create_automaton(&"(a+b)*c".repeat(300)).unwrap();
        assert_eq!(aut.states().iter().max(), Some(aut.num_states() as StateId - 1));
        assert!(aut.accepts(&"abc".repeat(300)));
        assert!(!aut.accepts(&"abc".repeat(299)));

        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_explicit_concatenation() {
        let mut parser = ReParser::new();
        parser.implicit_concatenation(false);

        let aut = parser.create_automaton("a.b*").unwrap();
        assert!(aut.accepts("abbb"));
        assert!(matches!(
            parser.create_automaton("ab"),
            Err(Error::MalformedExpression(ExpressionError::DanglingOperands { .. }))
        ));
    }

    #[test]
    fn test_malformed_expressions() {
        let parser = ReParser::new();
        for expression in ["(a", "a)", "+", "a+", "*", "(+b)", "a..b"] {
            assert!(
                matches!(
                    parser.create_automaton(expression),
                    Err(Error::MalformedExpression(_))
                ),
                "`{expression}` should be rejected"
            );
        }
    }
}

//! Compiles regular expressions in Kleene syntax into finite automata,
//! determinizes and minimizes them, and tests strings for membership.
//!
//! ```
//! use kleene::regex::ReParser;
//!
//! let nfa = ReParser::new().create_automaton("(a+b)*.a.b.b").unwrap();
//! let dfa = nfa.determinize();
//! let minimal = dfa.minimize();
//!
//! assert_eq!(minimal.num_states(), 4);
//! for word in ["abb", "aabb", "babb"] {
//!     assert!(nfa.accepts(word) && minimal.accepts(word));
//! }
//! ```

pub mod automaton;
pub mod error;
pub mod regex;

pub use automaton::{FiniteAutomaton, Label, StateId, StateSet, Symbol};
pub use error::{AutomatonError, Error, ExpressionError, Result};
pub use regex::ReParser;

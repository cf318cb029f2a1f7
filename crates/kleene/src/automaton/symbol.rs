//! Symbol types for automata transitions.

use std::fmt;

/// An input symbol. Every symbol is a single character.
pub type Symbol = char;

/// The label of a transition: either an input symbol or the epsilon marker.
///
/// Epsilon sorts before every symbol, so ordered views of a state's
/// transitions list the spontaneous moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Epsilon,
    Symbol(Symbol),
}

impl Label {
    /// Check if the label is the epsilon marker.
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// The symbol carried by the label, `None` for epsilon.
    #[inline]
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(symbol) => Some(symbol),
        }
    }
}

impl From<Symbol> for Label {
    fn from(symbol: Symbol) -> Self {
        Label::Symbol(symbol)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => f.write_str("λ"),
            Label::Symbol(symbol) => write!(f, "{symbol}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(Label::Epsilon.is_epsilon());
        assert!(!Label::from('a').is_epsilon());
        assert_eq!(Label::Epsilon.symbol(), None);
        assert_eq!(Label::Symbol('x').symbol(), Some('x'));
    }

    #[test]
    fn test_epsilon_sorts_first() {
        let mut labels = vec![Label::from('b'), Label::Epsilon, Label::from('a')];
        labels.sort();
        assert_eq!(labels, vec![Label::Epsilon, Label::from('a'), Label::from('b')]);
        assert_eq!(Label::Epsilon.to_string(), "λ");
    }
}

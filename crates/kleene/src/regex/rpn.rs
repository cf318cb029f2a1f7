//! Conversion of infix Kleene expressions into reverse Polish notation.

use crate::automaton::Symbol;
use crate::error::{ExpressionError, Result};
use crate::regex::ReParser;
use log::debug;
use std::fmt;

/// An item of an expression in reverse Polish notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A literal symbol.
    Symbol(Symbol),
    /// The empty string.
    Epsilon,
    /// `+`, binary.
    Union,
    /// `.`, binary. Also produced for adjacent operands when implicit
    /// concatenation is enabled.
    Concat,
    /// `*`, unary postfix.
    Star,
}

impl Token {
    /// The character the token is written with in expressions that use
    /// `epsilon_token` for the empty string.
    pub fn as_char(self, epsilon_token: char) -> char {
        match self {
            Token::Symbol(symbol) => symbol,
            Token::Epsilon => epsilon_token,
            Token::Union => '+',
            Token::Concat => '.',
            Token::Star => '*',
        }
    }
}

/// An expression in reverse Polish notation. Each token keeps the byte
/// offset of the character of the infix expression it comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rpn {
    items: Vec<(Token, usize)>,
    epsilon_token: char,
}

impl Rpn {
    fn new(epsilon_token: char) -> Self {
        Self {
            items: Vec::new(),
            epsilon_token,
        }
    }

    /// The character that stood for the empty string in the expression.
    pub fn epsilon_token(&self) -> char {
        self.epsilon_token
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the tokens with their positions, in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, usize)> + '_ {
        self.items.iter().copied()
    }

    fn push(&mut self, token: Token, position: usize) {
        self.items.push((token, position));
    }
}

impl fmt::Display for Rpn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (token, _) in &self.items {
            write!(f, "{}", token.as_char(self.epsilon_token))?;
        }
        Ok(())
    }
}

/// Entries of the shunting-yard stack: open parentheses and the binary
/// operators waiting for their right operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    OpenParen,
    Operator(Token),
}

/// Convert `expression` into reverse Polish notation with the default
/// settings of [`ReParser`].
pub fn to_rpn(expression: &str) -> Result<Rpn> {
    ReParser::new().to_rpn(expression)
}

/// Characters with a meaning of their own, which can't stand for the empty
/// string.
const OPERATORS: [char; 5] = ['+', '.', '*', '(', ')'];

/// The shunting-yard pass. `*` binds tighter than anything else and is
/// already postfix, so it goes straight to the output; `.` binds tighter
/// than `+`.
pub(crate) fn convert(
    expression: &str,
    epsilon_token: char,
    implicit_concatenation: bool,
) -> Result<Rpn> {
    if OPERATORS.contains(&epsilon_token) {
        return Err(ExpressionError::ReservedEpsilonToken { token: epsilon_token }.into());
    }

    let mut rpn = Rpn::new(epsilon_token);
    let mut stack: Vec<(Pending, usize)> = Vec::new();
    // Whether the previous character closed an operand.
    let mut after_operand = false;

    for (position, c) in expression.char_indices() {
        let starts_operand = !matches!(c, '+' | '.' | '*' | ')');
        if implicit_concatenation && after_operand && starts_operand {
            push_concat(&mut rpn, &mut stack, position);
        }

        match c {
            '*' => rpn.push(Token::Star, position),
            '+' => {
                while let Some(&(Pending::Operator(op), op_position)) = stack.last() {
                    stack.pop();
                    rpn.push(op, op_position);
                }
                stack.push((Pending::Operator(Token::Union), position));
            }
            '.' => push_concat(&mut rpn, &mut stack, position),
            '(' => stack.push((Pending::OpenParen, position)),
            ')' => loop {
                match stack.pop() {
                    Some((Pending::OpenParen, _)) => break,
                    Some((Pending::Operator(op), op_position)) => rpn.push(op, op_position),
                    None => return Err(ExpressionError::UnmatchedCloseParen { position }.into()),
                }
            },
            c if c == epsilon_token => rpn.push(Token::Epsilon, position),
            c => rpn.push(Token::Symbol(c), position),
        }

        after_operand = !matches!(c, '+' | '.' | '(');
    }

    while let Some((pending, position)) = stack.pop() {
        match pending {
            Pending::Operator(op) => rpn.push(op, position),
            Pending::OpenParen => {
                return Err(ExpressionError::UnclosedParen { position }.into());
            }
        }
    }

    debug!("RPN of {:?}: {}", expression, rpn);
    Ok(rpn)
}

fn push_concat(rpn: &mut Rpn, stack: &mut Vec<(Pending, usize)>, position: usize) {
    while let Some(&(Pending::Operator(Token::Concat), op_position)) = stack.last() {
        stack.pop();
        rpn.push(Token::Concat, op_position);
    }
    stack.push((Pending::Operator(Token::Concat), position));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn rpn(expression: &str) -> String {
        to_rpn(expression).unwrap().to_string()
    }

    fn explicit_rpn(expression: &str) -> String {
        convert(expression, 'λ', false).unwrap().to_string()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(explicit_rpn("a+b.c"), "abc.+");
        assert_eq!(explicit_rpn("a.b+c"), "ab.c+");
        assert_eq!(explicit_rpn("a.b*"), "ab*.");
        assert_eq!(explicit_rpn("a.b.c"), "ab.c.");
        assert_eq!(explicit_rpn("a+b+c"), "ab+c+");
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(explicit_rpn("(a+b)*"), "ab+*");
        assert_eq!(explicit_rpn("(a+b).c"), "ab+c.");
        assert_eq!(explicit_rpn("a.(b+c)"), "abc+.");
        assert_eq!(explicit_rpn("((a))"), "a");
    }

    #[test]
    fn test_implicit_concatenation() {
        assert_eq!(rpn("ab"), "ab.");
        assert_eq!(rpn("a*b"), "a*b.");
        assert_eq!(rpn("a+bc"), "abc.+");
        assert_eq!(rpn("(a)(b)"), "ab.");
        assert_eq!(rpn("(a+b)*abb"), "ab+*a.b.b.");
        assert_eq!(rpn("aλ"), "aλ.");
        // Explicit and implicit forms agree
        assert_eq!(rpn("a.b"), rpn("ab"));
    }

    #[test]
    fn test_explicit_concatenation_only() {
        // Without implicit concatenation adjacent operands stay apart
        assert_eq!(explicit_rpn("ab"), "ab");
    }

    #[test]
    fn test_epsilon_token() {
        let rpn = convert("λ+a", 'λ', true).unwrap();
        assert_eq!(
            rpn.iter().map(|(token, _)| token).collect::<Vec<_>>(),
            vec![Token::Epsilon, Token::Symbol('a'), Token::Union]
        );

        let rpn = convert("e+a", 'e', true).unwrap();
        assert_eq!(rpn.iter().next(), Some((Token::Epsilon, 0)));
    }

    #[test]
    fn test_custom_epsilon_token_is_displayed() {
        let rpn = convert("a(#+b)", '#', true).unwrap();
        assert_eq!(rpn.to_string(), "a#b+.");
        assert_eq!(rpn.epsilon_token(), '#');
        assert_eq!(Token::Epsilon.as_char('#'), '#');
    }

    #[test]
    fn test_operator_epsilon_token_is_rejected() {
        for token in ['+', '.', '*', '(', ')'] {
            assert_eq!(
                convert("a", token, true).unwrap_err(),
                Error::MalformedExpression(ExpressionError::ReservedEpsilonToken { token })
            );
        }
    }

    #[test]
    fn test_positions() {
        let rpn = to_rpn("a+b").unwrap();
        assert_eq!(
            rpn.iter().collect::<Vec<_>>(),
            vec![(Token::Symbol('a'), 0), (Token::Symbol('b'), 2), (Token::Union, 1)]
        );
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(
            to_rpn("a+b)").unwrap_err(),
            Error::MalformedExpression(ExpressionError::UnmatchedCloseParen { position: 3 })
        );
        assert_eq!(
            to_rpn("(a+(b)").unwrap_err(),
            Error::MalformedExpression(ExpressionError::UnclosedParen { position: 0 })
        );
    }

    #[test]
    fn test_empty_expression() {
        assert!(to_rpn("").unwrap().is_empty());
        assert!(to_rpn("()").unwrap().is_empty());
    }
}

//! Arithmetic evaluation for calculator annotations (`<<48/2=24>>`).
//!
//! Grammar:
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := '-' factor | '+' factor | '(' expr ')' | number
//! ```

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Deepest nesting of parentheses and unary signs accepted.
pub const MAX_DEPTH: usize = 256;

static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<<([^<>]*)>>").unwrap());

/// Expression evaluation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("Unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Expression nested deeper than {} levels", MAX_DEPTH)]
    TooDeep,
}

/// Left-hand side of every `<<lhs=rhs>>` annotation, in order of appearance.
pub fn annotations(text: &str) -> Vec<&str> {
    ANNOTATION_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().split('=').next().unwrap_or_default().trim())
        .collect()
}

/// Evaluate an arithmetic expression.
pub fn evaluate(input: &str) -> Result<f64, ExprError> {
    let mut parser = Parser {
        chars: input.char_indices().peekable(),
        depth: 0,
    };
    let value = parser.expr()?;
    parser.skip_whitespace();
    match parser.chars.next() {
        None => Ok(value),
        Some((offset, found)) => Err(ExprError::UnexpectedChar { found, offset }),
    }
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    depth: usize,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.peek().map(|(_, c)| *c)
    }

    fn expr(&mut self) -> Result<f64, ExprError> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.chars.next();
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.chars.next();
            let rhs = self.factor()?;
            value = if op == '*' {
                value * rhs
            } else if rhs == 0.0 {
                return Err(ExprError::DivisionByZero);
            } else {
                value / rhs
            };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        self.depth += 1;
        let value = self.nested_factor();
        self.depth -= 1;
        value
    }

    fn nested_factor(&mut self) -> Result<f64, ExprError> {
        match self.peek() {
            None => Err(ExprError::UnexpectedEnd),
            Some('-') => {
                self.chars.next();
                Ok(-self.factor()?)
            }
            Some('+') => {
                self.chars.next();
                self.factor()
            }
            Some('(') => {
                self.chars.next();
                let value = self.expr()?;
                match self.peek() {
                    Some(')') => {
                        self.chars.next();
                        Ok(value)
                    }
                    Some(found) => {
                        let offset = self.chars.peek().map(|(i, _)| *i).unwrap_or_default();
                        Err(ExprError::UnexpectedChar { found, offset })
                    }
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(found) => {
                let offset = self.chars.peek().map(|(i, _)| *i).unwrap_or_default();
                Err(ExprError::UnexpectedChar { found, offset })
            }
        }
    }

    fn number(&mut self) -> Result<f64, ExprError> {
        let mut literal = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|(_, c)| c.is_ascii_digit() || *c == '.' || *c == ',')
        {
            if c != ',' {
                literal.push(c);
            }
        }
        literal
            .parse()
            .map_err(|_| ExprError::InvalidNumber(literal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("10-4-3").unwrap(), 3.0);
        assert_eq!(evaluate("48/2/4").unwrap(), 6.0);
    }

    #[test]
    fn test_parentheses_and_unary() {
        assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
        assert_eq!(evaluate("-(1 + 2) * -2").unwrap(), 6.0);
        assert_eq!(evaluate(" 1,200 * 0.5 ").unwrap(), 600.0);
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate("1/0"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("2*"), Err(ExprError::UnexpectedEnd));
        assert!(matches!(
            evaluate("2 x 3"),
            Err(ExprError::UnexpectedChar { found: 'x', offset: 2 })
        ));
        assert!(matches!(evaluate("(1+2"), Err(ExprError::UnexpectedEnd)));
        assert!(matches!(evaluate("1.2.3"), Err(ExprError::InvalidNumber(_))));
    }

    #[test]
    fn test_nesting_limit() {
        let inside = format!("{}1{}", "(".repeat(MAX_DEPTH - 1), ")".repeat(MAX_DEPTH - 1));
        assert_eq!(evaluate(&inside).unwrap(), 1.0);

        let parens = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
        assert_eq!(evaluate(&parens), Err(ExprError::TooDeep));
        assert_eq!(evaluate(&"-".repeat(20_000)), Err(ExprError::TooDeep));
    }

    #[test]
    fn test_annotations_take_left_hand_side() {
        let text = "She has <<3*4=12>>12 apples and <<12 + 5>> more.";
        assert_eq!(annotations(text), vec!["3*4", "12 + 5"]);
        assert!(annotations("no calculator here").is_empty());
    }
}

//! Dice expression tokenizer
//!
//! Turns `"3d6 + 2(bonus) * 2"` into a flat stream:
//! `Operand("3d6") Op(Add) Operand("2(bonus)") Op(Mul) Operand("2")`.
//! Whitespace is dropped everywhere. Only `+` and `*` split operands;
//! anything else (a `-` sign included) stays in the operand text, as does
//! everything inside parentheses.

/// Arithmetic operator between two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Mul,
}

impl Operator {
    /// Map an operator character, if it is one
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '*' => Some(Operator::Mul),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Mul => '*',
        }
    }
}

/// A single token of a dice expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Run of non-operator text (dice term or operand, label included)
    Operand(String),
    Op(Operator),
}

/// Tokenize an expression
///
/// Never fails: consecutive operators yield an empty operand between them,
/// which the parser rejects.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in input.chars().filter(|c| !c.is_whitespace()) {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            _ => match Operator::from_char(c) {
                Some(op) if depth == 0 => {
                    tokens.push(Token::Operand(std::mem::take(&mut current)));
                    tokens.push(Token::Op(op));
                }
                _ => current.push(c),
            },
        }
    }

    tokens.push(Token::Operand(current));
    tokens
}

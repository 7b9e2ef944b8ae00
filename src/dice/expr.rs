//! Parsed dice expressions
//!
//! Grammar: a dice term `NdM` followed by zero or more `(operator, operand)`
//! pairs. Operands are an integer with an optional `(label)` suffix.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use super::token::{tokenize, Operator, Token};
use super::DiceError;

/// The `NdM` part of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedRoll {
    /// Number of dice to roll
    pub count: u32,
    /// Number of sides per die
    pub sides: u32,
}

impl fmt::Display for ParsedRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// An integer operand with an optional display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Additive term, e.g. `+2(bonus)`
pub type Modifier = Term;

/// Multiplicative term, e.g. `*2(crit)`
pub type Multiplier = Term;

impl Term {
    pub fn new(amount: i64) -> Self {
        Self { amount, label: None }
    }

    pub fn labeled(amount: i64, label: impl Into<String>) -> Self {
        Self {
            amount,
            label: Some(label.into()),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}({})", self.amount, label),
            None => write!(f, "{}", self.amount),
        }
    }
}

/// A fully parsed dice expression, ready to be rolled any number of times
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceExpression {
    /// The expression as the user typed it
    pub source: String,
    pub roll: ParsedRoll,
    /// Additive terms in encounter order
    pub modifiers: Vec<Modifier>,
    /// Multiplicative terms in encounter order
    pub multipliers: Vec<Multiplier>,
}

impl DiceExpression {
    /// Sum of all modifier amounts
    pub fn modifier_sum(&self) -> Result<i64, DiceError> {
        self.modifiers
            .iter()
            .try_fold(0i64, |acc, m| acc.checked_add(m.amount))
            .ok_or(DiceError::Overflow)
    }

    /// Product of all multiplier amounts (1 when there are none)
    pub fn multiplier_product(&self) -> Result<i64, DiceError> {
        self.multipliers
            .iter()
            .try_fold(1i64, |acc, m| acc.checked_mul(m.amount))
            .ok_or(DiceError::Overflow)
    }
}

impl FromStr for DiceExpression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expression(s)
    }
}

/// Reason given for an expression with nothing in it
pub const EMPTY_EXPRESSION: &str = "empty expression";

/// Parse a dice expression like `"3d6 + 2(bonus) * 2"`
pub fn parse_expression(input: &str) -> Result<DiceExpression, DiceError> {
    let malformed = |reason: String| DiceError::MalformedExpression {
        expression: input.to_string(),
        reason,
    };

    if input.chars().all(char::is_whitespace) {
        return Err(malformed(EMPTY_EXPRESSION.to_string()));
    }

    let mut tokens = tokenize(input).into_iter();

    let roll = match tokens.next() {
        Some(Token::Operand(term)) => parse_dice_term(&term).map_err(malformed)?,
        _ => return Err(malformed("missing dice term".to_string())),
    };

    let mut modifiers = Vec::new();
    let mut multipliers = Vec::new();

    loop {
        let (op, operand) = match (tokens.next(), tokens.next()) {
            (None, _) => break,
            (Some(Token::Op(op)), Some(Token::Operand(operand))) => (op, operand),
            _ => return Err(malformed("operator without operand".to_string())),
        };

        let term = parse_operand(op, &operand).map_err(malformed)?;
        match op {
            Operator::Add => modifiers.push(term),
            Operator::Mul => multipliers.push(term),
        }
    }

    Ok(DiceExpression {
        source: input.to_string(),
        roll,
        modifiers,
        multipliers,
    })
}

/// Split `text` before the first `-` or `/` that follows something, outside
/// parentheses. Those operators are not supported; the tail is dropped.
/// A leading `-` is a sign and stays.
fn drop_unsupported(text: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '-' | '/' if i > 0 && depth == 0 => {
                debug!(kept = %&text[..i], dropped = %&text[i..], "ignoring unsupported operator");
                return &text[..i];
            }
            _ => {}
        }
    }
    text
}

/// Parse `NdM`. A zero count is allowed and rolls nothing.
fn parse_dice_term(term: &str) -> Result<ParsedRoll, String> {
    let term = drop_unsupported(term);
    let (count_str, sides_str) = term
        .split_once('d')
        .ok_or_else(|| format!("missing 'd' in dice term: {}", term))?;

    if count_str.is_empty() {
        return Err("missing dice count".to_string());
    }

    let count: u32 = count_str
        .parse()
        .map_err(|_| format!("invalid dice count: {}", count_str))?;

    let sides: u32 = sides_str
        .parse()
        .map_err(|_| format!("invalid die sides: {}", sides_str))?;

    if sides == 0 {
        return Err("die sides must be at least 1".to_string());
    }

    Ok(ParsedRoll { count, sides })
}

/// Parse `5`, `-5` or `5(label)`
fn parse_operand(op: Operator, operand: &str) -> Result<Term, String> {
    if operand.is_empty() {
        return Err(format!("missing number after '{}'", op.as_char()));
    }

    let operand = drop_unsupported(operand);
    let (number, label) = match operand.split_once('(') {
        Some((number, rest)) => (number, Some(rest.strip_suffix(')').unwrap_or(rest))),
        None => (operand, None),
    };

    let amount: i64 = number
        .parse()
        .map_err(|_| format!("invalid number after '{}': {}", op.as_char(), operand))?;

    let label = label.filter(|l| !l.is_empty()).map(str::to_string);

    Ok(Term { amount, label })
}

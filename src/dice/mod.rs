//! Dice expression evaluator
//!
//! Parses, rolls and renders expressions like `"3d6 + 2(bonus) * 2"`:
//! - `NdM` dice term (N may be 0, M must be at least 1)
//! - `+ X(label)` additive modifiers
//! - `* X(label)` multipliers, applied after all modifiers
//!
//! A `-` or `/` clause after a term is accepted and ignored; a leading `-`
//! is a sign, so `+-2` is a negative modifier.

mod expr;
mod roll;
mod token;

pub use expr::{
    parse_expression, DiceExpression, Modifier, Multiplier, ParsedRoll, Term, EMPTY_EXPRESSION,
};
pub use roll::{roll_expression, DieRoller, RollOutcome, DIE_FACE};
pub use token::{tokenize, Operator, Token};

use thiserror::Error;

/// Default cap on dice rolled per expression
pub const DEFAULT_MAX_DICE: u32 = 100;

/// Dice evaluation errors
#[derive(Debug, Error)]
pub enum DiceError {
    #[error("malformed dice expression `{expression}`: {reason}")]
    MalformedExpression { expression: String, reason: String },

    #[error("too many dice: {requested} requested, limit is {limit}")]
    TooManyDice { requested: u32, limit: u32 },

    #[error("result out of range")]
    Overflow,
}

/// Parses and rolls expressions under a dice limit
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    max_dice: u32,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DICE)
    }
}

impl Evaluator {
    pub fn new(max_dice: u32) -> Self {
        Self { max_dice }
    }

    /// Evaluate with the thread-local RNG
    pub fn evaluate(&self, expression: &str) -> Result<RollOutcome, DiceError> {
        self.evaluate_with(expression, &mut rand::rng())
    }

    /// Evaluate with a caller-supplied random source
    pub fn evaluate_with<R: DieRoller + ?Sized>(
        &self,
        expression: &str,
        roller: &mut R,
    ) -> Result<RollOutcome, DiceError> {
        let parsed = parse_expression(expression)?;
        roll_expression(&parsed, roller, self.max_dice)
    }
}

/// Evaluate an expression with the default limit and the thread-local RNG
pub fn evaluate(expression: &str) -> Result<RollOutcome, DiceError> {
    Evaluator::default().evaluate(expression)
}

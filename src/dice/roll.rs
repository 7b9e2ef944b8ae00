//! Rolling and rendering
//!
//! Rolls a parsed expression against a random source and renders the
//! result line the bot replies with.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use super::expr::{DiceExpression, Modifier, Multiplier};
use super::DiceError;

/// Marker printed before each individual die
pub const DIE_FACE: &str = "\u{1F3B2}";

/// Source of die results
pub trait DieRoller {
    /// Roll one die, returning a value in `1..=sides`
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl<R: Rng> DieRoller for R {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides)
    }
}

/// The full result of rolling one expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollOutcome {
    /// The expression as the user typed it
    pub expression: String,
    /// Individual die results in roll order
    pub rolls: Vec<u32>,
    pub modifiers: Vec<Modifier>,
    pub multipliers: Vec<Multiplier>,
    pub total: i64,
}

impl RollOutcome {
    /// Render the reply message
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You rolled {} :", self.expression)?;

        if !self.rolls.is_empty() {
            let dice: Vec<String> = self.rolls.iter().map(|r| format!("{DIE_FACE}{r}")).collect();
            write!(f, " {}", dice.join(", "))?;
        }

        if !self.modifiers.is_empty() {
            let mods: Vec<String> = self.modifiers.iter().map(ToString::to_string).collect();
            write!(f, " + {}", mods.join(" + "))?;
        }

        if !self.multipliers.is_empty() {
            let mults: Vec<String> = self.multipliers.iter().map(ToString::to_string).collect();
            write!(f, " * {}", mults.join(" * "))?;
        }

        write!(f, " = {}.", self.total)
    }
}

/// Roll a parsed expression
///
/// Refuses to roll more than `max_dice` dice.
pub fn roll_expression<R: DieRoller + ?Sized>(
    expr: &DiceExpression,
    roller: &mut R,
    max_dice: u32,
) -> Result<RollOutcome, DiceError> {
    let count = expr.roll.count;
    if count > max_dice {
        return Err(DiceError::TooManyDice {
            requested: count,
            limit: max_dice,
        });
    }

    let mut rolls = Vec::with_capacity(count as usize);
    for _ in 0..count {
        rolls.push(roller.roll_die(expr.roll.sides));
    }

    let dice_sum: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
    let modifier_sum = expr.modifier_sum()?;
    let multiplier_product = expr.multiplier_product()?;
    let total = dice_sum
        .checked_add(modifier_sum)
        .and_then(|sum| sum.checked_mul(multiplier_product))
        .ok_or(DiceError::Overflow)?;

    Ok(RollOutcome {
        expression: expr.source.clone(),
        rolls,
        modifiers: expr.modifiers.clone(),
        multipliers: expr.multipliers.clone(),
        total,
    })
}

//! Slash commands
//!
//! Definitions uploaded at registration time and the handlers that answer
//! them at runtime.

use rand::seq::IndexedRandom;
use tracing::debug;

use crate::dice::{DiceError, DieRoller, Evaluator, EMPTY_EXPRESSION};
use crate::discord::{
    option_type, ApplicationCommand, CommandData, CommandOption, InteractionResponse, CHAT_INPUT,
};

pub const ROLL: &str = "roll";
pub const TEST: &str = "test";

/// Name of the `roll` command's only option
pub const ROLL_OPTION: &str = "expression";

const EMOJIS: &[&str] = &[
    "\u{1F62D}", "\u{1F604}", "\u{1F60C}", "\u{1F913}", "\u{1F60E}", "\u{1F624}", "\u{1F916}",
    "\u{1F636}\u{200D}\u{1F32B}\u{FE0F}", "\u{1F30F}", "\u{1F4F8}", "\u{1F4BF}", "\u{1F44B}",
    "\u{1F30A}", "\u{2728}",
];

/// All commands the bot registers
pub fn all_commands() -> Vec<ApplicationCommand> {
    vec![
        ApplicationCommand {
            name: TEST.to_string(),
            description: "Basic command".to_string(),
            kind: CHAT_INPUT,
            options: Vec::new(),
        },
        ApplicationCommand {
            name: ROLL.to_string(),
            description: "Rolls dice, e.g. 3d6 + 2(bonus) * 2".to_string(),
            kind: CHAT_INPUT,
            options: vec![CommandOption {
                kind: option_type::STRING,
                name: ROLL_OPTION.to_string(),
                description: "Dice expression such as 1d20+5(bonus)".to_string(),
                required: true,
            }],
        },
    ]
}

/// Outcome of dispatching a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Reply(InteractionResponse),
    UnknownCommand(String),
}

/// Route a command to its handler
pub fn dispatch<R: DieRoller + ?Sized>(
    data: &CommandData,
    evaluator: &Evaluator,
    roller: &mut R,
) -> Dispatch {
    debug!(command = %data.name, "dispatching command");

    match data.name.as_str() {
        ROLL => Dispatch::Reply(roll(data, evaluator, roller)),
        TEST => Dispatch::Reply(test()),
        other => Dispatch::UnknownCommand(other.to_string()),
    }
}

/// `/roll <expression>`
///
/// Evaluation errors become an ephemeral reply rather than a failed request.
pub fn roll<R: DieRoller + ?Sized>(
    data: &CommandData,
    evaluator: &Evaluator,
    roller: &mut R,
) -> InteractionResponse {
    let Some(expression) = data.first_string_option() else {
        return InteractionResponse::ephemeral("Usage: /roll <expression>, e.g. 2d6+3(bonus)*2");
    };

    match evaluator.evaluate_with(expression, roller) {
        Ok(outcome) => {
            debug!(expression, total = outcome.total, "rolled");
            InteractionResponse::message(outcome.render())
        }
        Err(e) => {
            debug!(expression, error = %e, "roll rejected");
            InteractionResponse::ephemeral(error_message(&e))
        }
    }
}

/// `/test`
pub fn test() -> InteractionResponse {
    let emoji = EMOJIS.choose(&mut rand::rng()).copied().unwrap_or_default();
    InteractionResponse::message(format!("hello world {}", emoji))
}

fn error_message(err: &DiceError) -> String {
    match err {
        DiceError::MalformedExpression { reason, .. } if reason == EMPTY_EXPRESSION => {
            "Nothing to roll. Try something like 2d6+3.".to_string()
        }
        DiceError::MalformedExpression { expression, reason } => {
            format!("Could not roll `{}`: {}", expression, reason)
        }
        other => format!("Could not roll: {}", other),
    }
}

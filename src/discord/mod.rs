//! Chat platform integration
//!
//! Interaction payloads, replies, command definitions and the REST client
//! used to register commands.

mod client;
mod types;

pub use client::{DiscordClient, DiscordError};
pub use types::{
    option_type, response_type, ApplicationCommand, CommandData, CommandOption,
    CommandOptionValue, Interaction, InteractionResponse, InteractionType, ResponseData,
    CHAT_INPUT, FLAG_EPHEMERAL,
};

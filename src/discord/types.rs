//! Interaction wire types
//!
//! Only the fields this bot reads or writes are modelled; everything else
//! in the platform payload is ignored on deserialize.

use serde::{Deserialize, Serialize};

/// Inbound interaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    Other(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => InteractionType::Ping,
            2 => InteractionType::ApplicationCommand,
            other => InteractionType::Other(other),
        }
    }
}

impl From<InteractionType> for u8 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::Other(other) => other,
        }
    }
}

/// An inbound interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub data: Option<CommandData>,
}

/// Invoked command name and options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOptionValue>,
}

impl CommandData {
    /// First option's value, if it is a string
    pub fn first_string_option(&self) -> Option<&str> {
        self.options.first()?.value.as_ref()?.as_str()
    }
}

/// A single option value supplied by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOptionValue {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Reply kinds
pub mod response_type {
    pub const PONG: u8 = 1;
    pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
}

/// Message flag: only the invoking user sees the reply
pub const FLAG_EPHEMERAL: u64 = 1 << 6;

/// Reply to an interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: response_type::PONG,
            data: None,
        }
    }

    /// Public message in the invoking channel
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: response_type::CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(ResponseData {
                content: content.into(),
                flags: None,
            }),
        }
    }

    /// Message only the invoking user can see
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: response_type::CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(ResponseData {
                content: content.into(),
                flags: Some(FLAG_EPHEMERAL),
            }),
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.content.as_str())
    }
}

/// Option kinds used in command definitions
pub mod option_type {
    pub const STRING: u8 = 3;
}

/// Command kind for slash commands
pub const CHAT_INPUT: u8 = 1;

/// A command definition uploaded at registration time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCommand {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

/// An option declared on a command definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    pub description: String,
    pub required: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_ping() {
        let interaction: Interaction = serde_json::from_value(json!({"type": 1, "id": "42"})).unwrap();
        assert_eq!(interaction.kind, InteractionType::Ping);
        assert!(interaction.data.is_none());
    }

    #[test]
    fn test_deserialize_command() {
        let interaction: Interaction = serde_json::from_value(json!({
            "type": 2,
            "id": "42",
            "application_id": "7",
            "data": {
                "id": "9",
                "name": "roll",
                "options": [{"name": "expression", "type": 3, "value": "2d6+1"}]
            }
        }))
        .unwrap();

        assert_eq!(interaction.kind, InteractionType::ApplicationCommand);
        let data = interaction.data.unwrap();
        assert_eq!(data.name, "roll");
        assert_eq!(data.first_string_option(), Some("2d6+1"));
    }

    #[test]
    fn test_unknown_interaction_type() {
        let interaction: Interaction = serde_json::from_value(json!({"type": 5})).unwrap();
        assert_eq!(interaction.kind, InteractionType::Other(5));
    }

    #[test]
    fn test_first_string_option_rejects_non_strings() {
        let data: CommandData = serde_json::from_value(json!({
            "name": "roll",
            "options": [{"name": "expression", "type": 4, "value": 12}]
        }))
        .unwrap();
        assert_eq!(data.first_string_option(), None);
    }

    #[test]
    fn test_serialize_responses() {
        assert_eq!(
            serde_json::to_value(InteractionResponse::pong()).unwrap(),
            json!({"type": 1})
        );
        assert_eq!(
            serde_json::to_value(InteractionResponse::message("hi")).unwrap(),
            json!({"type": 4, "data": {"content": "hi"}})
        );
        assert_eq!(
            serde_json::to_value(InteractionResponse::ephemeral("oops")).unwrap(),
            json!({"type": 4, "data": {"content": "oops", "flags": 64}})
        );
    }
}

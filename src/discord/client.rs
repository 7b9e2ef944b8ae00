//! Platform REST client
//!
//! Used once, out of band, to upload the bot's command definitions.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use super::types::ApplicationCommand;

/// REST API errors
#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Api { status: StatusCode, body: String },
}

/// Authenticated client for one application
#[derive(Debug, Clone)]
pub struct DiscordClient {
    client: Client,
    base_url: String,
    application_id: u64,
    bot_token: String,
}

impl DiscordClient {
    pub fn new(
        base_url: impl Into<String>,
        application_id: u64,
        bot_token: impl Into<String>,
    ) -> Result<Self, DiscordError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("rollbot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            application_id,
            bot_token: bot_token.into(),
        })
    }

    /// Endpoint for the application's global commands
    pub fn global_commands_url(&self) -> String {
        format!(
            "{}/applications/{}/commands",
            self.base_url, self.application_id
        )
    }

    /// Replace all global commands with `commands`
    ///
    /// Returns the definitions as stored by the platform.
    pub async fn install_global_commands(
        &self,
        commands: &[ApplicationCommand],
    ) -> Result<Vec<serde_json::Value>, DiscordError> {
        let url = self.global_commands_url();
        debug!("Installing {} commands at {}", commands.len(), url);

        let response = self
            .client
            .put(&url)
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(commands)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Command registration failed: {} - {}", status, body);
            return Err(DiscordError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_commands_url() {
        let client = DiscordClient::new("https://discord.com/api/v10/", 1234, "token").unwrap();
        assert_eq!(
            client.global_commands_url(),
            "https://discord.com/api/v10/applications/1234/commands"
        );
    }
}

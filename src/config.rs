//! Server configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file,
//! then `ROLLBOT_*` environment variables.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dice::DEFAULT_MAX_DICE;

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "rollbot.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ROLLBOT_";

/// Default platform REST API base
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Application public key (hex) used to verify interaction signatures
    pub public_key: Option<String>,
    pub application_id: Option<u64>,
    /// Bot token, only needed for command registration
    pub bot_token: Option<String>,
    pub api_base: String,
    /// Maximum dice rolled by a single expression
    pub max_dice: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            public_key: None,
            application_id: None,
            bot_token: None,
            api_base: DEFAULT_API_BASE.to_string(),
            max_dice: DEFAULT_MAX_DICE,
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit `path` must exist; otherwise `rollbot.toml` in the working
    /// directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) if !p.exists() => return Err(ConfigError::NotFound(p.to_path_buf())),
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Self::figment(&file).extract().map_err(ConfigError::from)
    }

    /// The provider stack, exposed so callers can merge extra layers
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn require_public_key(&self) -> Result<&str, ConfigError> {
        self.public_key.as_deref().ok_or(ConfigError::Missing("public_key"))
    }

    pub fn require_application_id(&self) -> Result<u64, ConfigError> {
        self.application_id.ok_or(ConfigError::Missing("application_id"))
    }

    pub fn require_bot_token(&self) -> Result<&str, ConfigError> {
        self.bot_token.as_deref().ok_or(ConfigError::Missing("bot_token"))
    }
}

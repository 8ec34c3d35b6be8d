//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Sample value shipped in `.env` templates; never a usable key.
pub const PLACEHOLDER_CREDENTIAL: &str = "your_google_ai_studio_api_key_here";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Model backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Environment variable holding the API credential
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the hosted generation API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whether the streaming agent capability is enabled
    #[serde(default = "default_true")]
    pub agent_enabled: bool,

    /// Whether the direct generation capability is enabled
    #[serde(default = "default_true")]
    pub direct_enabled: bool,

    #[serde(default = "default_agent_model")]
    pub agent_model: String,

    #[serde(default = "default_direct_model")]
    pub direct_model: String,

    /// Fixed name the agent client is constructed under
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Fixed system instruction sent with every agent request
    #[serde(default = "default_instruction")]
    pub instruction: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_true() -> bool {
    true
}

fn default_agent_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_direct_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_agent_name() -> String {
    "chat_assistant".to_string()
}

fn default_instruction() -> String {
    "You are a helpful AI assistant. You can answer questions, help with tasks, \
     and provide information on various topics. Be concise, helpful, and friendly \
     in your responses."
        .to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    1000
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load settings from the default configuration file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/relay.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(
                File::from(path.as_ref())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("CHAT_RELAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "server port cannot be 0".to_string(),
            )));
        }
        if self.backend.base_url.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "backend base_url cannot be empty".to_string(),
            )));
        }
        if self.backend.agent_model.is_empty() || self.backend.direct_model.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "backend model identifiers cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backend: BackendSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            agent_enabled: true,
            direct_enabled: true,
            agent_model: default_agent_model(),
            direct_model: default_direct_model(),
            agent_name: default_agent_name(),
            instruction: default_instruction(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Opaque API credential resolved from the process environment.
///
/// Invariant: present, non-empty, and not the shipped placeholder value.
/// Violations are fatal at session construction.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Validate a raw credential value
    pub fn resolve(raw: Option<String>) -> Result<Self> {
        match raw {
            None => Err(AppError::MissingCredential),
            Some(value) if value.trim().is_empty() => Err(AppError::MissingCredential),
            Some(value) if value == PLACEHOLDER_CREDENTIAL => {
                Err(AppError::PlaceholderCredential)
            }
            Some(value) => Ok(Self(value)),
        }
    }

    /// Read and validate the credential from an environment variable
    pub fn from_env(var: &str) -> Result<Self> {
        Self::resolve(std::env::var(var).ok())
    }

    /// The raw token, for request signing only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

//! Configuration module

pub mod settings;

pub use settings::{
    BackendSettings, Credential, LoggingConfig, ServerConfig, Settings, PLACEHOLDER_CREDENTIAL,
};

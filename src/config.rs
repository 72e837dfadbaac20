//! Configuration management for msgcast
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to layer defaults, a `msgcast.toml` file, environment variables
//! (prefix `MSGCAST_`), and command-line arguments.

use crate::cli::Cli;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// How the notification content is composed.
    pub compose: ComposeConfig,
    /// Where the notification is delivered.
    pub delivery: DeliveryConfig,
}

/// Composition settings: which decorations wrap the base message.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ComposeConfig {
    /// Prepend a timestamp block to the message.
    pub timestamp: bool,
    /// Append a `-- signature` trailer, if set.
    pub signature: Option<String>,
}

/// Delivery settings: one channel per listed destination.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DeliveryConfig {
    /// Email addresses to deliver to.
    pub emails: Vec<String>,
    /// Phone numbers to deliver to via SMS.
    pub sms: Vec<String>,
    /// Also pop the notification up in the local session.
    pub popup: bool,
}

impl Config {
    /// Loads the application configuration by layering sources:
    /// defaults, file, environment, and CLI arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = cli
            .config
            .clone()
            .unwrap_or_else(|| "msgcast.toml".into());
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            // Allow overriding with environment variables, e.g.
            // MSGCAST_LOG_LEVEL=debug
            .merge(Env::prefixed("MSGCAST_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            compose: ComposeConfig {
                timestamp: true,
                signature: None,
            },
            delivery: DeliveryConfig {
                emails: vec![],
                sms: vec![],
                popup: true,
            },
        }
    }
}

//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using
//! the `clap` crate. These arguments are parsed at startup and then merged
//! with the configuration from the `msgcast.toml` file and environment
//! variables; the CLI layer wins.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Composes a notification and fans it out to the configured channels.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The base message text to publish.
    #[arg(short, long, value_name = "TEXT")]
    pub message: String,

    /// Signature appended to the message.
    #[arg(long, value_name = "NAME")]
    pub signature: Option<String>,

    /// Skip the timestamp decoration.
    #[arg(long)]
    pub no_timestamp: bool,

    /// Additional email destination (repeatable).
    #[arg(long = "email", value_name = "ADDRESS")]
    pub emails: Vec<String>,

    /// Additional SMS destination (repeatable).
    #[arg(long = "sms", value_name = "NUMBER")]
    pub sms: Vec<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        let mut compose = Dict::new();
        let mut delivery = Dict::new();

        if let Some(signature) = &self.signature {
            compose.insert("signature".into(), Value::from(signature.clone()));
        }

        if self.no_timestamp {
            compose.insert("timestamp".into(), Value::from(false));
        }

        if !self.emails.is_empty() {
            delivery.insert("emails".into(), Value::serialize(&self.emails)?);
        }

        if !self.sms.is_empty() {
            delivery.insert("sms".into(), Value::serialize(&self.sms)?);
        }

        if !compose.is_empty() {
            dict.insert("compose".into(), Value::from(compose));
        }

        if !delivery.is_empty() {
            dict.insert("delivery".into(), Value::from(delivery));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}

//! Core traits and shared types for msgcast
//!
//! This module defines the trait contracts that govern component
//! interactions: what a notification is, what it means to observe a
//! publish, and what it means to deliver content somewhere.

use crate::dispatch::Dispatcher;
use async_trait::async_trait;
use thiserror::Error;

/// A content-bearing value produced by composing a base message with zero
/// or more decorations.
///
/// `content` must be pure: calling it repeatedly on an unmutated chain
/// returns identical strings.
pub trait Notification: Send + Sync {
    fn content(&self) -> String;
}

/// An entity invoked on every publish to react to the current notification.
///
/// Subscribers pull the content from the dispatcher they are handed rather
/// than receiving it as a payload, so a subscriber always observes the
/// state the dispatcher holds at invocation time.
#[async_trait]
pub trait Subscriber: Send + Sync {
    /// A unique, descriptive name for the subscriber (e.g., "log-sink").
    /// Used for logging and fan-out reporting.
    fn name(&self) -> &str;

    /// Reacts to a newly published notification.
    ///
    /// An `Err` here is captured in the publish report; it never aborts
    /// fan-out to the remaining subscribers.
    async fn on_notify(&self, dispatcher: &Dispatcher) -> anyhow::Result<()>;
}

/// A polymorphic sending mechanism bound to one destination.
///
/// The destination identifier (phone number, address) is immutable
/// configuration, validated when the channel is constructed.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// The medium name (e.g., "sms", "email", "popup").
    fn name(&self) -> &str;

    /// The destination identifier this channel is bound to.
    fn destination(&self) -> &str;

    /// Formats and delivers the content to this channel's destination.
    async fn send(&self, content: &str) -> Result<(), DeliveryError>;
}

/// The external delivery collaborator.
///
/// Real transports (an SMTP client, an SMS gateway, the OS notification
/// API) plug in behind this seam; the in-repo [`ConsoleSink`] writes to
/// stdout, and tests substitute recording fakes.
///
/// [`ConsoleSink`]: crate::channels::ConsoleSink
#[async_trait]
pub trait DeliverySink: Send + Sync {
    async fn deliver(&self, destination: &str, payload: &str) -> Result<(), DeliveryError>;
}

/// A channel's send failed at dispatch time.
///
/// Always isolated per-channel: the failure is logged and aggregated, and
/// never prevents the remaining channels from being attempted.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("delivery to {destination} failed: {reason}")]
    Failed { destination: String, reason: String },

    #[error("delivery sink unavailable: {0}")]
    SinkUnavailable(String),
}

/// A channel destination failed validation at construction time.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChannelConfigError {
    #[error("invalid email address {0:?}")]
    InvalidEmailAddress(String),

    #[error("invalid phone number {0:?}")]
    InvalidPhoneNumber(String),
}

//! Concrete delivery channels and the default delivery sink.
//!
//! Each channel binds one medium to one destination and frames the
//! notification content with both before handing it to a
//! [`DeliverySink`]. Destinations are validated when the channel is
//! built; a malformed one is a configuration error and fails fast.

use crate::core::{ChannelConfigError, DeliveryChannel, DeliveryError, DeliverySink};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Writes each delivery to stdout. The stand-in for real transports.
pub struct ConsoleSink;

#[async_trait]
impl DeliverySink for ConsoleSink {
    async fn deliver(&self, destination: &str, payload: &str) -> Result<(), DeliveryError> {
        debug!(destination, "Delivering via console sink");
        println!("{payload}");
        Ok(())
    }
}

/// Delivers to a phone number over the SMS medium.
pub struct SmsChannel {
    number: String,
    sink: Arc<dyn DeliverySink>,
}

impl SmsChannel {
    /// Builds the channel, validating the number: an optional leading `+`
    /// followed by at least three digits, nothing else.
    pub fn new(
        number: impl Into<String>,
        sink: Arc<dyn DeliverySink>,
    ) -> Result<Self, ChannelConfigError> {
        let number = number.into();
        let digits = number.strip_prefix('+').unwrap_or(&number);
        if digits.len() < 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ChannelConfigError::InvalidPhoneNumber(number));
        }
        Ok(Self { number, sink })
    }
}

#[async_trait]
impl DeliveryChannel for SmsChannel {
    fn name(&self) -> &str {
        "sms"
    }

    fn destination(&self) -> &str {
        &self.number
    }

    async fn send(&self, content: &str) -> Result<(), DeliveryError> {
        let payload = format!("Sending notification through SMS: {}\n{content}", self.number);
        self.sink.deliver(&self.number, &payload).await
    }
}

/// Delivers to an email address.
pub struct EmailChannel {
    address: String,
    sink: Arc<dyn DeliverySink>,
}

impl EmailChannel {
    /// Builds the channel, validating the address: exactly one `@` with a
    /// non-empty local part and domain.
    pub fn new(
        address: impl Into<String>,
        sink: Arc<dyn DeliverySink>,
    ) -> Result<Self, ChannelConfigError> {
        let address = address.into();
        match address.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self { address, sink })
            }
            _ => Err(ChannelConfigError::InvalidEmailAddress(address)),
        }
    }
}

#[async_trait]
impl DeliveryChannel for EmailChannel {
    fn name(&self) -> &str {
        "email"
    }

    fn destination(&self) -> &str {
        &self.address
    }

    async fn send(&self, content: &str) -> Result<(), DeliveryError> {
        let payload = format!(
            "Sending notification through Email: {}\n{content}",
            self.address
        );
        self.sink.deliver(&self.address, &payload).await
    }
}

/// Pops the notification up in the local session. No destination to
/// configure, so construction cannot fail.
pub struct PopUpChannel {
    sink: Arc<dyn DeliverySink>,
}

impl PopUpChannel {
    pub fn new(sink: Arc<dyn DeliverySink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl DeliveryChannel for PopUpChannel {
    fn name(&self) -> &str {
        "popup"
    }

    fn destination(&self) -> &str {
        "session"
    }

    async fn send(&self, content: &str) -> Result<(), DeliveryError> {
        let payload = format!("Sending notification through Pop Up:\n{content}");
        self.sink.deliver(self.destination(), &payload).await
    }
}

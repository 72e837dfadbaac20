//! Notification composition via stackable decorations.
//!
//! A notification starts as a plain text layer and gains formatting by
//! wrapping: each decoration owns its inner notification and produces new
//! content from the inner content. The chain is singly linked and acyclic;
//! materialization happens lazily when `content()` is called, walking
//! inward first and applying each layer's transform on the way back out.
//! New decoration kinds are new [`Notification`] impls, nothing existing
//! needs to change.

use crate::core::Notification;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Timestamp block layout: leading newline, `Mon 01 Jan 2024`, newline,
/// space-padded `10:00:00`, trailing newline.
const TIMESTAMP_FORMAT: &str = "\n%a %d %b %Y\n %H:%M:%S \n";

/// A source of the current time.
///
/// The timestamp decoration consumes this instead of calling the system
/// clock directly so tests can pin the time and assert exact output.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant, for deterministic tests.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The base layer: returns the literal message text it was built with.
pub struct TextNotification {
    text: String,
}

impl TextNotification {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Notification for TextNotification {
    fn content(&self) -> String {
        self.text.clone()
    }
}

/// Prepends a formatted timestamp block to the inner content.
pub struct TimestampDecorator {
    inner: Box<dyn Notification>,
    clock: Arc<dyn Clock>,
}

impl TimestampDecorator {
    pub fn new(inner: Box<dyn Notification>, clock: Arc<dyn Clock>) -> Self {
        Self { inner, clock }
    }
}

impl Notification for TimestampDecorator {
    fn content(&self) -> String {
        format!(
            "{}{}",
            self.clock.now().format(TIMESTAMP_FORMAT),
            self.inner.content()
        )
    }
}

/// Appends a `-- signature` trailer to the inner content.
pub struct SignatureDecorator {
    inner: Box<dyn Notification>,
    signature: String,
}

impl SignatureDecorator {
    pub fn new(inner: Box<dyn Notification>, signature: impl Into<String>) -> Self {
        Self {
            inner,
            signature: signature.into(),
        }
    }
}

impl Notification for SignatureDecorator {
    fn content(&self) -> String {
        format!("{}\n-- {}\n\n", self.inner.content(), self.signature)
    }
}

/// Fluent builder over the decorator chain.
///
/// Layers apply in call order, each wrapping everything built so far:
/// `Compose::text("X").timestamp(clock).signature("CC")` yields
/// timestamp-block + "X" + signature-trailer.
pub struct Compose {
    chain: Box<dyn Notification>,
}

impl Compose {
    /// Starts a chain from a base text layer.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            chain: Box::new(TextNotification::new(text)),
        }
    }

    /// Wraps the chain in a timestamp layer driven by `clock`.
    pub fn timestamp(self, clock: Arc<dyn Clock>) -> Self {
        Self {
            chain: Box::new(TimestampDecorator::new(self.chain, clock)),
        }
    }

    /// Wraps the chain in a signature layer.
    pub fn signature(self, signature: impl Into<String>) -> Self {
        Self {
            chain: Box::new(SignatureDecorator::new(self.chain, signature)),
        }
    }

    /// Finishes the chain, yielding a shareable notification.
    pub fn build(self) -> Arc<dyn Notification> {
        Arc::from(self.chain)
    }
}

//! The subscriber that fans a notification out to delivery channels.
//!
//! The engine holds an ordered list of channels; list order is delivery
//! order. Every channel is attempted on every notify. A failing channel
//! is logged and noted, and the rest still run; if any failed, the engine
//! reports one aggregate error upward so the publish report reflects it.

use crate::core::{DeliveryChannel, Subscriber};
use crate::dispatch::Dispatcher;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

pub struct DeliveryEngine {
    channels: RwLock<Vec<Arc<dyn DeliveryChannel>>>,
}

impl Default for DeliveryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryEngine {
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(Vec::new()),
        }
    }

    /// Appends a channel; channels deliver in the order they were added.
    pub fn add_channel(&self, channel: Arc<dyn DeliveryChannel>) {
        debug!(
            channel = channel.name(),
            destination = channel.destination(),
            "Channel added to delivery engine"
        );
        self.channels.write().unwrap().push(channel);
    }

    pub fn channel_count(&self) -> usize {
        self.channels.read().unwrap().len()
    }
}

#[async_trait]
impl Subscriber for DeliveryEngine {
    fn name(&self) -> &str {
        "delivery-engine"
    }

    async fn on_notify(&self, dispatcher: &Dispatcher) -> anyhow::Result<()> {
        let content = dispatcher.current_content()?;
        let snapshot: Vec<Arc<dyn DeliveryChannel>> =
            self.channels.read().unwrap().iter().cloned().collect();

        let mut failed: Vec<String> = Vec::new();
        for channel in snapshot {
            if let Err(e) = channel.send(&content).await {
                warn!(
                    channel = channel.name(),
                    destination = channel.destination(),
                    error = %e,
                    "Channel delivery failed"
                );
                failed.push(format!("{} ({})", channel.name(), channel.destination()));
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("delivery failed on {}", failed.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Compose;
    use crate::core::DeliveryError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts sends; fails every one when `fail` is set.
    struct CountingChannel {
        label: String,
        fail: bool,
        sends: AtomicUsize,
    }

    impl CountingChannel {
        fn new(label: &str, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                label: label.to_string(),
                fail,
                sends: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl DeliveryChannel for CountingChannel {
        fn name(&self) -> &str {
            &self.label
        }

        fn destination(&self) -> &str {
            "test"
        }

        async fn send(&self, _content: &str) -> Result<(), DeliveryError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(DeliveryError::Failed {
                    destination: "test".to_string(),
                    reason: "simulated".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn failing_channel_does_not_block_the_rest() {
        let first = CountingChannel::new("first", false);
        let middle = CountingChannel::new("middle", true);
        let last = CountingChannel::new("last", false);

        let engine = Arc::new(DeliveryEngine::new());
        engine.add_channel(first.clone());
        engine.add_channel(middle.clone());
        engine.add_channel(last.clone());

        let dispatcher = Dispatcher::new();
        dispatcher.subscribe(engine);
        let report = dispatcher.publish(Compose::text("hi").build()).await;

        assert_eq!(first.sends.load(Ordering::SeqCst), 1);
        assert_eq!(middle.sends.load(Ordering::SeqCst), 1);
        assert_eq!(last.sends.load(Ordering::SeqCst), 1);
        // The failure surfaces in the publish report instead of vanishing.
        assert_eq!(report.failed_subscribers(), vec!["delivery-engine"]);
    }

    #[tokio::test]
    async fn engine_with_no_channels_is_fine() {
        let engine = Arc::new(DeliveryEngine::new());
        let dispatcher = Dispatcher::new();
        dispatcher.subscribe(engine);
        let report = dispatcher.publish(Compose::text("hi").build()).await;
        assert!(report.all_ok());
    }

    #[tokio::test]
    async fn every_channel_receives_every_publish() {
        let a = CountingChannel::new("a", false);
        let b = CountingChannel::new("b", false);
        let engine = Arc::new(DeliveryEngine::new());
        engine.add_channel(a.clone());
        engine.add_channel(b.clone());

        let dispatcher = Dispatcher::new();
        dispatcher.subscribe(engine);
        dispatcher.publish(Compose::text("one").build()).await;
        dispatcher.publish(Compose::text("two").build()).await;

        assert_eq!(a.sends.load(Ordering::SeqCst), 2);
        assert_eq!(b.sends.load(Ordering::SeqCst), 2);
    }
}

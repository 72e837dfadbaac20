//! The publish/subscribe subject at the center of the pipeline.
//!
//! The [`Dispatcher`] holds the current notification and an ordered
//! registry of subscribers. A publish sets the current notification and
//! then fans out to every registered subscriber, in registration order,
//! awaiting each before moving on. Fan-out iterates a snapshot of the
//! registry taken at publish start, so a subscriber that subscribes or
//! unsubscribes others from inside `on_notify` never affects the round
//! in flight and never deadlocks against the registry lock.

use crate::core::{Notification, Subscriber};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, error, info};

/// Dispatcher state was queried before it existed.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("no notification has been published yet")]
    NoNotification,
}

/// The outcome of one subscriber invocation within a publish round.
pub struct SubscriberOutcome {
    /// The subscriber's `name()`.
    pub subscriber: String,
    /// `Err` carries the subscriber's failure; fan-out continued regardless.
    pub result: anyhow::Result<()>,
}

/// The aggregate result of one publish round.
///
/// `publish` never fails because a subscriber failed; callers that care
/// inspect the per-subscriber outcomes here.
#[derive(Default)]
pub struct PublishReport {
    pub outcomes: Vec<SubscriberOutcome>,
}

impl PublishReport {
    /// Names of the subscribers whose `on_notify` returned an error.
    pub fn failed_subscribers(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.subscriber.as_str())
            .collect()
    }

    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// The subject holding current notification state and the subscriber
/// registry.
pub struct Dispatcher {
    current: RwLock<Option<Arc<dyn Notification>>>,
    subscribers: RwLock<Vec<Arc<dyn Subscriber>>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Registers a subscriber at the end of the invocation order.
    ///
    /// Registering the same subscriber (same allocation) twice is a no-op:
    /// a subscriber appears at most once in the registry.
    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) {
        let mut subscribers = self.subscribers.write().unwrap();
        if subscribers.iter().any(|s| Arc::ptr_eq(s, &subscriber)) {
            debug!(
                subscriber = subscriber.name(),
                "Ignoring duplicate subscription"
            );
            return;
        }
        info!(subscriber = subscriber.name(), "Subscriber registered");
        subscribers.push(subscriber);
    }

    /// Removes a subscriber if present; no-op otherwise. Effective for the
    /// next publish round.
    pub fn unsubscribe(&self, subscriber: &Arc<dyn Subscriber>) {
        let mut subscribers = self.subscribers.write().unwrap();
        let before = subscribers.len();
        subscribers.retain(|s| !Arc::ptr_eq(s, subscriber));
        if subscribers.len() < before {
            info!(subscriber = subscriber.name(), "Subscriber removed");
        }
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().unwrap().len()
    }

    /// Content of the current notification.
    ///
    /// Fails with [`DispatchError::NoNotification`] before the first
    /// publish rather than returning an empty string.
    pub fn current_content(&self) -> Result<String, DispatchError> {
        self.current
            .read()
            .unwrap()
            .as_ref()
            .map(|n| n.content())
            .ok_or(DispatchError::NoNotification)
    }

    /// Sets the current notification and fans out to every registered
    /// subscriber, in registration order, awaiting each in turn.
    ///
    /// Subscribers registered during this call are invoked starting with
    /// the next publish. A failing subscriber is reported and logged; the
    /// remaining subscribers still run.
    pub async fn publish(&self, notification: Arc<dyn Notification>) -> PublishReport {
        *self.current.write().unwrap() = Some(notification);

        // Snapshot before fan-out; the registry lock is not held across
        // any subscriber await point.
        let snapshot: Vec<Arc<dyn Subscriber>> =
            self.subscribers.read().unwrap().iter().cloned().collect();

        debug!(subscribers = snapshot.len(), "Fanning out notification");

        let mut report = PublishReport::default();
        for subscriber in snapshot {
            let result = subscriber.on_notify(self).await;
            if let Err(e) = &result {
                error!(
                    subscriber = subscriber.name(),
                    error = %e,
                    "Subscriber failed to handle notification"
                );
            }
            report.outcomes.push(SubscriberOutcome {
                subscriber: subscriber.name().to_string(),
                result,
            });
        }
        report
    }
}

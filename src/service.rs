//! The façade client code talks to.
//!
//! A [`NotificationService`] owns one dispatcher and an append-only
//! history of everything published through it. Embedders normally create
//! one with [`NotificationService::new`] at startup and thread it through
//! their wiring; [`NotificationService::global`] exists for code that
//! needs a process-wide instance, with first access creating it exactly
//! once even under concurrent callers.

use crate::core::Notification;
use crate::dispatch::{Dispatcher, PublishReport};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::info;

static GLOBAL: OnceLock<Arc<NotificationService>> = OnceLock::new();

pub struct NotificationService {
    dispatcher: Arc<Dispatcher>,
    history: Mutex<Vec<Arc<dyn Notification>>>,
}

impl NotificationService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            dispatcher: Arc::new(Dispatcher::new()),
            history: Mutex::new(Vec::new()),
        })
    }

    /// The process-wide instance, created on first access.
    pub fn global() -> Arc<Self> {
        GLOBAL.get_or_init(Self::new).clone()
    }

    /// The dispatcher, for subscriber registration by wiring code.
    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        self.dispatcher.clone()
    }

    /// Records the notification in history, then publishes it.
    ///
    /// Never errors because of a subscriber or channel failure; the
    /// returned report carries per-subscriber outcomes.
    pub async fn send(&self, notification: Arc<dyn Notification>) -> PublishReport {
        self.history.lock().unwrap().push(notification.clone());
        info!("Publishing notification");
        self.dispatcher.publish(notification).await
    }

    /// Number of notifications published through this service.
    pub fn history_len(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    /// Content of every published notification, oldest first.
    pub fn history_contents(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.content())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Compose;
    use crate::log_sink::LogSink;
    use serial_test::serial;

    #[tokio::test]
    async fn send_appends_to_history_then_publishes() {
        let service = NotificationService::new();
        let sink = Arc::new(LogSink::new());
        service.dispatcher().subscribe(sink.clone());

        service.send(Compose::text("first").build()).await;
        service.send(Compose::text("second").build()).await;

        assert_eq!(service.history_contents(), vec!["first", "second"]);
        assert_eq!(sink.entries().len(), 2);
    }

    #[tokio::test]
    async fn history_survives_even_without_subscribers() {
        let service = NotificationService::new();
        let report = service.send(Compose::text("nobody listening").build()).await;
        assert!(report.all_ok());
        assert_eq!(service.history_len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn global_returns_the_same_instance_every_time() {
        let a = NotificationService::global();
        let b = NotificationService::global();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    #[serial]
    async fn global_is_created_exactly_once_under_concurrent_first_access() {
        let handles: Vec<_> = (0..16)
            .map(|_| tokio::spawn(async { NotificationService::global() }))
            .collect();
        let mut instances = Vec::new();
        for handle in handles {
            instances.push(handle.await.unwrap());
        }
        let first = &instances[0];
        assert!(instances.iter().all(|i| Arc::ptr_eq(i, first)));
    }
}

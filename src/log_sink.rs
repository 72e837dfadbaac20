//! A subscriber that records every published notification.
//!
//! This is the simplest possible subscriber and doubles as a way to
//! validate the pipeline: it pulls the current content from the
//! dispatcher and appends it to an in-memory record, prefixed the same
//! way on every entry. Write problems stay inside the sink; they are
//! logged and never reach the dispatcher.

use crate::core::Subscriber;
use crate::dispatch::Dispatcher;
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

const LOG_PREFIX: &str = "Logging New Notification:";

pub struct LogSink {
    entries: Mutex<Vec<String>>,
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Everything logged so far, oldest first, each entry carrying the
    /// fixed prefix.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Subscriber for LogSink {
    fn name(&self) -> &str {
        "log-sink"
    }

    async fn on_notify(&self, dispatcher: &Dispatcher) -> anyhow::Result<()> {
        let content = dispatcher.current_content()?;
        let entry = format!("{LOG_PREFIX}\n{content}");
        info!("{entry}");
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

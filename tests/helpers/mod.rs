#![allow(dead_code)]
use async_trait::async_trait;
use msgcast::core::{DeliveryError, DeliverySink};
use std::sync::{Arc, Mutex};

/// A delivery sink that records every delivery instead of performing one.
#[derive(Clone)]
pub struct RecordingSink {
    deliveries: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            deliveries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// `(destination, payload)` pairs in delivery order.
    pub fn deliveries(&self) -> Vec<(String, String)> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliverySink for RecordingSink {
    async fn deliver(&self, destination: &str, payload: &str) -> Result<(), DeliveryError> {
        self.deliveries
            .lock()
            .unwrap()
            .push((destination.to_string(), payload.to_string()));
        Ok(())
    }
}

/// A delivery sink that fails every delivery.
pub struct FailingSink;

#[async_trait]
impl DeliverySink for FailingSink {
    async fn deliver(&self, destination: &str, _payload: &str) -> Result<(), DeliveryError> {
        Err(DeliveryError::SinkUnavailable(destination.to_string()))
    }
}

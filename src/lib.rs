//! msgcast - notification composition and fan-out delivery
//!
//! This library builds notifications by stacking decorations over a base
//! message and broadcasts each published notification to every registered
//! subscriber, which render it through independent delivery channels or a
//! log sink.

pub mod channels;
pub mod cli;
pub mod compose;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod engine;
pub mod log_sink;
pub mod service;

// Re-export core types for convenience
pub use crate::core::*;
pub use crate::dispatch::{DispatchError, Dispatcher, PublishReport};
pub use crate::service::NotificationService;

//! msgcast - notification composition and fan-out delivery
//!
//! Wires the pipeline together: loads configuration, builds the delivery
//! channels, registers the log sink and the delivery engine as
//! subscribers, composes the decorated notification, and publishes it.

use anyhow::Result;
use clap::Parser;
use msgcast::{
    channels::{ConsoleSink, EmailChannel, PopUpChannel, SmsChannel},
    cli::Cli,
    compose::{Compose, SystemClock},
    config::Config,
    core::DeliverySink,
    engine::DeliveryEngine,
    log_sink::LogSink,
    service::NotificationService,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment,
    // and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        // Exit if configuration fails, as it's a critical step.
        std::process::exit(1);
    });

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    info!("msgcast starting up...");
    info!("Log Level: {}", config.log_level);
    info!("Timestamp Decoration: {}", config.compose.timestamp);
    info!(
        "Signature: {}",
        config.compose.signature.as_deref().unwrap_or("Disabled")
    );
    info!("Email Destinations: {}", config.delivery.emails.len());
    info!("SMS Destinations: {}", config.delivery.sms.len());
    info!(
        "Pop-Up: {}",
        if config.delivery.popup {
            "Enabled"
        } else {
            "Disabled"
        }
    );

    let service = NotificationService::global();
    let dispatcher = service.dispatcher();

    // Channel construction fails fast on a malformed destination.
    let sink: Arc<dyn DeliverySink> = Arc::new(ConsoleSink);
    let engine = Arc::new(DeliveryEngine::new());
    for address in &config.delivery.emails {
        engine.add_channel(Arc::new(EmailChannel::new(address.as_str(), sink.clone())?));
    }
    for number in &config.delivery.sms {
        engine.add_channel(Arc::new(SmsChannel::new(number.as_str(), sink.clone())?));
    }
    if config.delivery.popup {
        engine.add_channel(Arc::new(PopUpChannel::new(sink.clone())));
    }
    info!("Delivery engine ready with {} channels", engine.channel_count());

    dispatcher.subscribe(Arc::new(LogSink::new()));
    dispatcher.subscribe(engine);

    // Compose the notification: base text, then the configured layers.
    let mut compose = Compose::text(&cli.message);
    if config.compose.timestamp {
        compose = compose.timestamp(Arc::new(SystemClock));
    }
    if let Some(signature) = &config.compose.signature {
        compose = compose.signature(signature);
    }

    let report = service.send(compose.build()).await;

    let failed = report.failed_subscribers();
    if failed.is_empty() {
        info!("Notification fanned out to {} subscribers", report.outcomes.len());
        Ok(())
    } else {
        error!("Fan-out completed with failures: {}", failed.join(", "));
        std::process::exit(1);
    }
}

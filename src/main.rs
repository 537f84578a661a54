//! Infobot - Telegram bot for weather and car questions
//!
//! Each chat moves through a small mode machine: pick a topic from the
//! keyboard, then send a city or a car question and get one answer back.

mod config;
mod dispatcher;
mod llm;
mod message;
mod router;
mod session;
mod state_machine;
mod telegram;
mod weather;

use config::Config;
use dispatcher::Dispatcher;
use llm::{CarInfo, CarInfoSettings, LoggingService, OpenAIService};
use router::ConversationRouter;
use session::SessionStore;
use std::sync::Arc;
use telegram::{Poller, TelegramClient};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather::{LoggingWeatherService, OpenWeatherService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "infobot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(config = ?config, "Configuration loaded");

    // Providers
    let weather = OpenWeatherService::new(
        config.weather.api_key.clone(),
        &config.weather.api_base,
        config.weather.timeout,
    )?;
    let weather = Arc::new(LoggingWeatherService::new(Arc::new(weather)));

    let llm = OpenAIService::new(
        config.ask.api_key.clone(),
        config.ask.model.clone(),
        &config.ask.api_base,
        config.ask.timeout,
    )?;
    let llm = Arc::new(LoggingService::new(Arc::new(llm)));
    let car_info = CarInfo::new(llm, CarInfoSettings::default());

    let sessions = Arc::new(SessionStore::new());
    let dispatcher = Arc::new(Dispatcher::new(sessions.clone(), weather, car_info));

    // Telegram transport doubles as update source and reply sink
    let telegram = Arc::new(TelegramClient::new(
        &config.telegram.token,
        &config.telegram.api_base,
        config.telegram.poll_timeout,
    )?);
    let router = Arc::new(ConversationRouter::new(dispatcher, telegram.clone()));
    let poller = Poller::new(telegram, router.clone(), config.telegram.poll_timeout);

    let cancel = CancellationToken::new();
    let polling = tokio::spawn(poller.run(cancel.clone()));
    tracing::info!("Infobot started");

    tokio::signal::ctrl_c().await?;
    tracing::info!(workers = router.worker_count().await, "Shutdown requested");
    cancel.cancel();

    if let Err(e) = polling.await {
        tracing::error!(error = %e, "Polling task panicked");
    }
    router.shutdown().await;
    tracing::info!(conversations = sessions.len().await, "Infobot stopped");

    Ok(())
}

mod config;
mod error;
mod homework;
mod logger;
mod models;
mod poller;
mod practicum;
mod telegram;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::Credentials;
use crate::poller::Poller;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init_logging()?;

    let credentials = Credentials::from_env()?;

    let client = PracticumClient::new(&credentials.practicum_token)
        .context("Failed to build Practicum HTTP client")?;
    let notifier = TelegramNotifier::new(&credentials.telegram_token, &credentials.telegram_chat_id);

    let timestamp = Utc::now().timestamp();
    tracing::info!(from_date = timestamp, "Bot started");

    Poller::new(client, notifier, timestamp).run().await;

    Ok(())
}

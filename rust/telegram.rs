use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;

/// Outbound text channel to the fixed chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<()>;
}

pub struct TelegramNotifier {
    bot: Bot,
    chat: Recipient,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: &str) -> Self {
        Self {
            bot: Bot::new(token),
            chat: parse_recipient(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        self.bot
            .send_message(self.chat.clone(), text)
            .await
            .context("Telegram sendMessage failed")?;
        Ok(())
    }
}

/// Numeric ids address a chat directly; anything else is treated as a
/// public channel username such as `@my_channel`.
fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

/// Delivers `message`, logging the outcome. Never fails.
pub async fn send_message(notifier: &dyn Notifier, message: &str) {
    match notifier.notify(message).await {
        Ok(()) => tracing::debug!(text = message, "Message sent to chat"),
        Err(err) => tracing::error!(text = message, error = %err, "Failed to send message"),
    }
}

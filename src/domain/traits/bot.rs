use async_trait::async_trait;
use crate::domain::entities::Message;
use crate::application::errors::BotError;

/// Bot trait - abstraction for chat platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Join configured channels and begin listening for messages
    async fn start(&mut self) -> Result<(), BotError>;

    /// Wait for the next inbound chat message.
    ///
    /// Returns `Ok(None)` once the connection is closed.
    async fn next_message(&mut self) -> Result<Option<Message>, BotError>;

    /// Send a message to a channel
    async fn send_message(&self, channel: &str, text: &str) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}

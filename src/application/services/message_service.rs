use std::sync::Arc;
use crate::domain::entities::Message;
use crate::application::errors::BotError;
use crate::application::messaging::CommandDispatcher;
use crate::domain::traits::Bot;

/// Service for processing messages
pub struct MessageService<B: Bot> {
    bot: B,
    dispatcher: Arc<CommandDispatcher>,
}

impl<B: Bot> MessageService<B> {
    pub fn new(bot: B, dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { bot, dispatcher }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// Process an incoming message and send the reply, if any.
    ///
    /// Returns the reply that was attempted. Send failures are logged and
    /// dropped; the connection layer owns delivery.
    pub async fn process(&self, message: &Message) -> Option<String> {
        tracing::debug!("[{}] <{}> {}", message.channel, message.sender_name(), message.text);

        let reply = self.dispatcher.dispatch(message).await?;

        if let Err(e) = self.respond(&message.channel, &reply).await {
            tracing::error!("Failed to send message to {}: {}", message.channel, e);
        }
        Some(reply)
    }

    /// Send a response message
    pub async fn respond(&self, channel: &str, text: &str) -> Result<(), BotError> {
        self.bot.send_message(channel, text).await
    }

    /// Start the bot and handle messages in arrival order until the
    /// connection closes.
    pub async fn run(&mut self) -> Result<(), BotError> {
        self.bot.start().await?;

        let info = self.bot.bot_info();
        tracing::info!("Listening as {} with {} commands", info.username, self.dispatcher.registry().len());

        while let Some(message) = self.bot.next_message().await? {
            self.process(&message).await;
        }

        tracing::info!("Connection closed");
        Ok(())
    }
}

//! Command dispatcher - Routes chat messages to cooldown-gated replies

use std::io::ErrorKind;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use crate::domain::entities::{Command, CommandRegistry, CooldownState, CooldownTracker, Message, Reply};
use crate::domain::traits::{Clock, SystemClock};
use super::parser::MessageParser;

/// Resolves commands and enforces a per-command cooldown
pub struct CommandDispatcher {
    parser: MessageParser,
    registry: CommandRegistry,
    cooldowns: CooldownTracker,
    clock: Arc<dyn Clock>,
}

impl CommandDispatcher {
    pub fn new(prefix: impl Into<String>, registry: CommandRegistry) -> Self {
        Self {
            parser: MessageParser::new(prefix),
            registry,
            cooldowns: CooldownTracker::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn prefix(&self) -> &str {
        self.parser.prefix()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Find the command a chat message refers to. No side effects.
    pub fn resolve(&self, text: &str) -> Option<&Command> {
        let token = self.parser.command_token(text)?;
        self.registry.find(token)
    }

    /// Attempt to fire `name` at `now`; see [`CooldownTracker::try_fire`].
    pub fn try_fire(&self, name: &str, now: DateTime<Utc>) -> bool {
        self.cooldowns.try_fire(name, now)
    }

    pub fn cooldown_state(&self, name: &str, now: DateTime<Utc>) -> CooldownState {
        self.cooldowns.state(name, now)
    }

    /// Run a message through resolution and the cooldown gate.
    ///
    /// Returns the reply to send, or `None` when nothing should be said:
    /// no command, command on cooldown, or its reply file unavailable.
    pub async fn dispatch(&self, message: &Message) -> Option<String> {
        let command = self.resolve(&message.text)?;

        // Unavailable reply files must not start a cooldown.
        let reply = self.render(command).await?;

        if !self.try_fire(&command.name, self.clock.now()) {
            tracing::debug!(
                "[{}] {}{} suppressed by cooldown",
                message.channel,
                self.prefix(),
                command.name
            );
            return None;
        }

        tracing::info!(
            "[{}] {} triggered {}{}",
            message.channel,
            message.sender_name(),
            self.prefix(),
            command.name
        );
        Some(reply)
    }

    /// Reply text for `command`; a missing, unreadable or blank file gives `None`
    async fn render(&self, command: &Command) -> Option<String> {
        match &command.reply {
            Reply::Text(text) => Some(text.clone()),
            Reply::File(path) => match tokio::fs::read_to_string(path).await {
                Ok(content) if content.trim().is_empty() => {
                    tracing::debug!("{} reply file {} is empty", command.name, path.display());
                    None
                }
                Ok(content) => Some(content),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!("{} has no reply file at {}", command.name, path.display());
                    None
                }
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", path.display(), e);
                    None
                }
            },
        }
    }
}

//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::{mpsc, Mutex};
use crate::domain::entities::{Message, User};
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Channel name given to console messages
pub const CONSOLE_CHANNEL: &str = "console";

type LineSource = Lines<Box<dyn AsyncBufRead + Unpin + Send>>;

/// Console bot adapter for local development.
///
/// Every input line is a chat message; replies go to stdout, or to the
/// sender set with [`ConsoleAdapter::with_sender`].
pub struct ConsoleAdapter {
    info: BotInfo,
    lines: Mutex<LineSource>,
    sender: Option<mpsc::Sender<String>>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let reader: Box<dyn AsyncBufRead + Unpin + Send> = Box::new(reader);
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "curi-bot".to_string(),
                username: "console".to_string(),
            },
            lines: Mutex::new(reader.lines()),
            sender: None,
        }
    }

    pub fn with_sender(mut self, sender: mpsc::Sender<String>) -> Self {
        self.sender = Some(sender);
        self
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&mut self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn next_message(&mut self) -> Result<Option<Message>, BotError> {
        let lines = self.lines.get_mut();
        loop {
            let line = lines
                .next_line()
                .await
                .map_err(|e| BotError::Network(format!("stdin: {}", e)))?;

            match line {
                Some(text) if text.trim().is_empty() => continue,
                Some(text) => {
                    let message = Message::new(CONSOLE_CHANNEL, text.trim())
                        .with_sender(User::new("console").with_login("console"))
                        .with_platform("console");
                    return Ok(Some(message));
                }
                None => return Ok(None),
            }
        }
    }

    async fn send_message(&self, _channel: &str, text: &str) -> Result<(), BotError> {
        match &self.sender {
            Some(sender) => sender
                .send(text.to_string())
                .await
                .map_err(|_| BotError::Internal("console output closed".to_string())),
            None => {
                println!("[BOT] {}", text);
                Ok(())
            }
        }
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

//! End-to-end tests for startup and the message loop
//! Run with: cargo test --test bot_test

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tokio::io::BufReader;
use tokio::sync::mpsc;

use curi_bot::application::bootstrap;
use curi_bot::application::catalog;
use curi_bot::application::errors::{BotError, ConfigError};
use curi_bot::application::services::MessageService;
use curi_bot::domain::entities::Message;
use curi_bot::domain::traits::{Bot, BotInfo, ManualClock};
use curi_bot::infrastructure::adapters::ConsoleAdapter;

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Fresh directory under the system temp dir
fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("curi-bot-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Path of a reply file that does not exist
fn missing_today() -> PathBuf {
    std::env::temp_dir().join(format!("{}-today.txt", uuid::Uuid::new_v4()))
}

fn write_config(dir: &PathBuf) -> PathBuf {
    let path = dir.join("config.yml");
    std::fs::write(
        &path,
        "irc-token: abc123\nnick: curi_bot\ninitial-channels: [curi]\nprefix: \"!\"\n",
    )
    .unwrap();
    path
}

/// Scripted bot recording what it sends
struct ScriptedBot {
    inbox: VecDeque<Message>,
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail_sends: bool,
}

impl ScriptedBot {
    fn new(texts: &[&str]) -> Self {
        Self {
            inbox: texts.iter().map(|t| Message::new("#curi", *t)).collect(),
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_sends: false,
        }
    }
}

#[async_trait]
impl Bot for ScriptedBot {
    async fn start(&mut self) -> Result<(), BotError> {
        Ok(())
    }

    async fn next_message(&mut self) -> Result<Option<Message>, BotError> {
        Ok(self.inbox.pop_front())
    }

    async fn send_message(&self, channel: &str, text: &str) -> Result<(), BotError> {
        self.sent.lock().unwrap().push((channel.to_string(), text.to_string()));
        if self.fail_sends {
            return Err(BotError::Network("send failed".to_string()));
        }
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "scripted".to_string(),
            name: "scripted".to_string(),
            username: "scripted".to_string(),
        }
    }
}

#[tokio::test]
async fn test_missing_config_never_connects() {
    ensure_init();

    let path = std::env::temp_dir().join(format!("{}-config.yml", uuid::Uuid::new_v4()));
    let connected = Arc::new(AtomicBool::new(false));
    let flag = connected.clone();

    let result = bootstrap::run(&path, None, |_config| async move {
        flag.store(true, Ordering::SeqCst);
        Ok::<_, BotError>(ScriptedBot::new(&[]))
    })
    .await;

    assert!(matches!(result, Err(BotError::Config(ConfigError::NotFound(_)))));
    assert!(!connected.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_invalid_config_never_connects() {
    ensure_init();

    let dir = temp_dir();
    let path = dir.join("config.yml");
    std::fs::write(&path, "irc-token: ''\nnick: curi_bot\ninitial-channels: [curi]\n").unwrap();
    let connected = Arc::new(AtomicBool::new(false));
    let flag = connected.clone();

    let result = bootstrap::run(&path, None, |_config| async move {
        flag.store(true, Ordering::SeqCst);
        Ok::<_, BotError>(ScriptedBot::new(&[]))
    })
    .await;

    assert!(matches!(result, Err(BotError::Config(ConfigError::MissingField(_)))));
    assert!(!connected.load(Ordering::SeqCst));

    // A command-line token makes the same file usable
    let config = bootstrap::load_config(&path, Some("abc".to_string())).unwrap();
    assert_eq!(config.oauth_token(), "oauth:abc");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_console_session_end_to_end() {
    ensure_init();

    let dir = temp_dir();
    let path = write_config(&dir);

    let input: &'static [u8] = b"hallo\n!vscode\n!editor\n!today\n!font bitte\n!unknown\n";
    let (tx, mut rx) = mpsc::channel(16);

    bootstrap::run(&path, None, move |config| async move {
        assert_eq!(config.channels(), vec!["curi"]);
        Ok::<_, BotError>(ConsoleAdapter::from_reader(BufReader::new(input)).with_sender(tx))
    })
    .await
    .unwrap();

    let mut replies = Vec::new();
    while let Some(reply) = rx.recv().await {
        replies.push(reply);
    }
    assert_eq!(replies, vec![catalog::VSCODE.to_string(), catalog::FONT.to_string()]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_today_reads_file_next_to_config() {
    ensure_init();

    let dir = temp_dir();
    let path = write_config(&dir);
    std::fs::write(dir.join("today.txt"), "Heute: Rust lernen\n").unwrap();

    let input: &'static [u8] = b"!heute\n!today\n";
    let (tx, mut rx) = mpsc::channel(16);

    bootstrap::run(&path, None, move |_config| async move {
        Ok::<_, BotError>(ConsoleAdapter::from_reader(BufReader::new(input)).with_sender(tx))
    })
    .await
    .unwrap();

    assert_eq!(rx.recv().await.as_deref(), Some("Heute: Rust lernen\n"));
    assert_eq!(rx.recv().await, None);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_cooldown_over_message_loop() {
    ensure_init();

    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap()));
    let dispatcher = curi_bot::application::messaging::CommandDispatcher::new(
        "!",
        catalog::default_registry("!", missing_today()),
    )
    .with_clock(clock.clone());
    let service = MessageService::new(ScriptedBot::new(&[]), Arc::new(dispatcher));

    let msg = Message::new("#curi", "!repo");
    assert_eq!(service.process(&msg).await.as_deref(), Some(catalog::REPOSITORY));

    clock.advance(Duration::seconds(29));
    assert_eq!(service.process(&Message::new("#curi", "!repos")).await, None);
    assert_eq!(service.process(&Message::new("#curi", "!git")).await.as_deref(), Some(catalog::SOCIAL));

    clock.advance(Duration::seconds(2));
    assert_eq!(service.process(&msg).await.as_deref(), Some(catalog::REPOSITORY));

    let sent = service.bot().sent.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![
            ("#curi".to_string(), catalog::REPOSITORY.to_string()),
            ("#curi".to_string(), catalog::SOCIAL.to_string()),
            ("#curi".to_string(), catalog::REPOSITORY.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_failed_send_is_not_retried() {
    ensure_init();

    let mut bot = ScriptedBot::new(&["!theme", "!theme", "!job"]);
    bot.fail_sends = true;
    let sent = bot.sent.clone();

    let dispatcher = curi_bot::application::messaging::CommandDispatcher::new(
        "!",
        catalog::default_registry("!", missing_today()),
    );
    let mut service = MessageService::new(bot, Arc::new(dispatcher));
    service.run().await.unwrap();

    let sent = sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].1, catalog::THEME);
    assert_eq!(sent[1].1, catalog::JOB);
}

//! Twitch chat adapter over the IRC gateway

mod irc;

pub use irc::IrcLine;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_native_tls::TlsConnector;

use crate::application::errors::BotError;
use crate::domain::entities::{Message, User};
use crate::domain::traits::{Bot, BotInfo};
use crate::infrastructure::config::Config;

/// NOTICE texts Twitch sends right before closing a failed login
const AUTH_FAILURES: &[&str] = &["Login authentication failed", "Improperly formatted auth"];

/// Events forwarded from the read loop
#[derive(Debug)]
enum IrcEvent {
    Message(Message),
    AuthFailed(String),
    ReadFailed(String),
}

/// Twitch bot adapter
pub struct TwitchAdapter {
    info: BotInfo,
    channels: Vec<String>,
    outgoing: mpsc::UnboundedSender<String>,
    incoming: mpsc::UnboundedReceiver<IrcEvent>,
    read_task: JoinHandle<()>,
    write_task: JoinHandle<()>,
}

impl TwitchAdapter {
    /// Connect to the configured gateway, over TLS unless disabled, and log in
    pub async fn connect(config: &Config) -> Result<Self, BotError> {
        let host = config.server.host.as_str();
        let port = config.server.port;

        tracing::info!("Connecting to {}:{} as {}", host, port, config.nick);
        let tcp = TcpStream::connect((host, port))
            .await
            .map_err(|e| BotError::Network(format!("TCP connect to {}:{} failed: {}", host, port, e)))?;

        let nick = config.nick.as_str();
        let token = config.oauth_token();
        if !config.server.tls {
            tracing::warn!("TLS is disabled, the token is sent in plain text");
            return Ok(Self::from_stream(tcp, nick, &token, config.channels()));
        }

        let connector = native_tls::TlsConnector::new()
            .map_err(|e| BotError::Network(format!("TLS setup failed: {}", e)))?;
        let stream = TlsConnector::from(connector)
            .connect(host, tcp)
            .await
            .map_err(|e| BotError::Network(format!("TLS handshake with {} failed: {}", host, e)))?;

        Ok(Self::from_stream(stream, nick, &token, config.channels()))
    }

    /// Log in over an already-open stream and spawn the read/write tasks.
    ///
    /// `channels` are joined by [`Bot::start`].
    pub fn from_stream<S>(stream: S, nick: &str, oauth_token: &str, channels: Vec<String>) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let nick = nick.to_lowercase();
        let (read_half, write_half) = tokio::io::split(stream);

        let (tx_outgoing, rx_outgoing) = mpsc::unbounded_channel::<String>();
        let (tx_incoming, rx_incoming) = mpsc::unbounded_channel::<IrcEvent>();

        let write_task = tokio::spawn(writer_loop(write_half, rx_outgoing));

        tx_outgoing.send(format!("PASS {}", oauth_token)).ok();
        tx_outgoing.send(format!("NICK {}", nick)).ok();
        tx_outgoing.send("CAP REQ :twitch.tv/tags twitch.tv/commands".to_string()).ok();

        let read_task = tokio::spawn(reader_loop(read_half, tx_incoming, tx_outgoing.clone()));

        Self {
            info: BotInfo {
                id: "twitch".to_string(),
                name: "curi-bot".to_string(),
                username: nick,
            },
            channels,
            outgoing: tx_outgoing,
            incoming: rx_incoming,
            read_task,
            write_task,
        }
    }

    fn send_raw_line(&self, line: String) -> Result<(), BotError> {
        self.outgoing
            .send(line)
            .map_err(|_| BotError::Network("connection closed".to_string()))
    }
}

impl Drop for TwitchAdapter {
    fn drop(&mut self) {
        self.read_task.abort();
        self.write_task.abort();
    }
}

#[async_trait]
impl Bot for TwitchAdapter {
    async fn start(&mut self) -> Result<(), BotError> {
        for channel in &self.channels {
            tracing::info!("Joining #{}", channel);
            self.send_raw_line(format!("JOIN #{}", channel))?;
        }
        Ok(())
    }

    async fn next_message(&mut self) -> Result<Option<Message>, BotError> {
        match self.incoming.recv().await {
            Some(IrcEvent::Message(message)) => Ok(Some(message)),
            Some(IrcEvent::AuthFailed(notice)) => Err(BotError::Auth(notice)),
            Some(IrcEvent::ReadFailed(reason)) => Err(BotError::Network(reason)),
            None => Ok(None),
        }
    }

    async fn send_message(&self, channel: &str, text: &str) -> Result<(), BotError> {
        let text = single_line(text);
        if text.is_empty() {
            return Ok(());
        }
        let channel = channel.trim_start_matches('#').to_lowercase();
        self.send_raw_line(format!("PRIVMSG #{} :{}", channel, text))
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// IRC messages end at the first line break
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn a PRIVMSG into a chat message
fn to_message(line: &IrcLine) -> Option<Message> {
    let channel = line.params.first()?;
    let text = line.trailing.clone()?;
    let login = line.nick()?;

    let mut sender = User::new(line.tag("user-id").unwrap_or(login)).with_login(login);
    if let Some(display_name) = line.tag("display-name") {
        sender = sender.with_display_name(display_name);
    }

    let mut message = Message::new(channel.clone(), text)
        .with_sender(sender)
        .with_platform("twitch");
    if let Some(id) = line.tag("id") {
        message = message.with_id(id);
    }
    Some(message)
}

async fn reader_loop<R>(
    read_half: R,
    tx_incoming: mpsc::UnboundedSender<IrcEvent>,
    tx_outgoing: mpsc::UnboundedSender<String>,
)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(read_half);
    let mut buffer = String::new();

    loop {
        buffer.clear();
        match reader.read_line(&mut buffer).await {
            Ok(0) => {
                tracing::info!("Twitch closed the connection");
                break;
            }
            Ok(_) => {
                let raw = buffer.trim_end();
                if raw.is_empty() {
                    continue;
                }
                tracing::debug!("<< {}", raw);

                let Some(line) = IrcLine::parse(raw) else {
                    tracing::warn!("Unparseable line: {}", raw);
                    continue;
                };

                match line.command.as_str() {
                    "PING" => {
                        let token = line.trailing.as_deref().unwrap_or("tmi.twitch.tv");
                        tx_outgoing.send(format!("PONG :{}", token)).ok();
                    }
                    "001" => {
                        let nick = line.params.first().map(String::as_str).unwrap_or("?");
                        tracing::info!("Connected to Twitch chat - {}", nick);
                    }
                    "NOTICE" => {
                        let notice = line.trailing.clone().unwrap_or_default();
                        if AUTH_FAILURES.iter().any(|f| notice.contains(f)) {
                            tx_incoming.send(IrcEvent::AuthFailed(notice)).ok();
                        } else {
                            tracing::info!("NOTICE: {}", notice);
                        }
                    }
                    "RECONNECT" => {
                        tracing::warn!("Twitch requested a reconnect");
                    }
                    "PRIVMSG" => {
                        if let Some(message) = to_message(&line) {
                            if tx_incoming.send(IrcEvent::Message(message)).is_err() {
                                break;
                            }
                        }
                    }
                    _ => {}
                }
            }
            Err(e) => {
                tracing::error!("Read error: {}", e);
                tx_incoming.send(IrcEvent::ReadFailed(format!("read from Twitch failed: {}", e))).ok();
                break;
            }
        }
    }
}

async fn writer_loop<W>(write_half: W, mut rx_outgoing: mpsc::UnboundedReceiver<String>)
where
    W: AsyncWrite + Unpin,
{
    let mut writer = BufWriter::new(write_half);

    while let Some(line) = rx_outgoing.recv().await {
        if line.starts_with("PASS ") {
            tracing::debug!(">> PASS ***");
        } else {
            tracing::debug!(">> {}", line);
        }

        if let Err(e) = write_line(&mut writer, &line).await {
            tracing::error!("Write error: {}", e);
            break;
        }
    }
}

async fn write_line<W>(writer: &mut BufWriter<W>, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\r\n").await?;
    writer.flush().await
}

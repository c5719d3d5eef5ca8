use super::User;

/// An inbound chat message
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    /// Reply destination
    pub channel: String,
    pub sender: Option<User>,
    pub text: String,
    pub platform: String,
}

impl Message {
    pub fn new(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel: channel.into(),
            sender: None,
            text: text.into(),
            platform: "unknown".to_string(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_sender(mut self, user: User) -> Self {
        self.sender = Some(user);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Sender name for logs
    pub fn sender_name(&self) -> String {
        self.sender
            .as_ref()
            .map(User::display_name)
            .unwrap_or_else(|| "unknown".to_string())
    }
}

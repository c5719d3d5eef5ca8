/// A chat participant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    /// Platform user id, or the login when the platform gives none
    pub id: String,
    pub login: Option<String>,
    pub display_name: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            login: None,
            display_name: None,
        }
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.login.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

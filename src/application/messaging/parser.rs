//! Message parser - Extracts the command token from raw chat text

/// Splits prefixed chat text into a command token
#[derive(Debug, Clone)]
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Return the command token of `text`, if it is a command at all.
    ///
    /// The token must follow the prefix directly and ends at the first
    /// whitespace. `"!vscode please"` yields `vscode`; `"! vscode"` and
    /// `"hello"` yield nothing.
    pub fn command_token<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.command_prefix.is_empty() {
            return None;
        }

        let rest = text.strip_prefix(self.command_prefix.as_str())?;
        if rest.starts_with(char::is_whitespace) {
            return None;
        }

        rest.split_whitespace().next()
    }
}

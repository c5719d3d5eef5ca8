use std::collections::HashMap;
use std::path::PathBuf;

/// Where a command's reply text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Fixed text sent as-is
    Text(String),
    /// Whole contents of a text file, read at trigger time.
    /// A missing file means the command stays silent.
    File(PathBuf),
}

/// Represents a bot command
#[derive(Debug, Clone)]
pub struct Command {
    pub name: String,
    pub aliases: Vec<String>,
    pub reply: Reply,
}

impl Command {
    pub fn new(name: impl Into<String>, reply: Reply) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            reply,
        }
    }

    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, Reply::Text(text.into()))
    }

    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(name, Reply::File(path.into()))
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// All tokens that trigger this command, canonical name first
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn matches(&self, input: &str, case_insensitive: bool) -> bool {
        if case_insensitive {
            self.tokens().any(|t| t.eq_ignore_ascii_case(input))
        } else {
            self.tokens().any(|t| t == input)
        }
    }
}

/// Command registry for managing available commands
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
    case_insensitive: bool,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name.clone(), command);
    }

    /// Look up by canonical name only
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Look up by canonical name or alias
    pub fn find(&self, input: &str) -> Option<&Command> {
        if let Some(cmd) = self.commands.get(input) {
            return Some(cmd);
        }
        self.commands.values().find(|c| c.matches(input, self.case_insensitive))
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Canonical names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

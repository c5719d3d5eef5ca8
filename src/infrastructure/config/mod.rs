//! Configuration management

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// OAuth token, with or without the `oauth:` prefix
    #[serde(default)]
    pub irc_token: String,
    pub nick: String,
    pub initial_channels: Vec<String>,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub case_insensitive: bool,
    /// Reply file for the `today` command, relative to the config file
    #[serde(default = "default_today_file")]
    pub today_file: PathBuf,
    #[serde(default)]
    pub server: ServerConfig,

    /// Directory of the file this config was loaded from
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Wrap the connection in TLS; only turn off for a local test server
    #[serde(default = "default_tls")]
    pub tls: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "irc.chat.twitch.tv".to_string(),
            port: 6697,
            tls: default_tls(),
        }
    }
}

fn default_tls() -> bool {
    true
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_today_file() -> PathBuf {
    PathBuf::from("today.txt")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            irc_token: "oauth:your-token-here".to_string(),
            nick: "curi_bot".to_string(),
            initial_channels: vec!["curi".to_string()],
            prefix: default_prefix(),
            case_insensitive: false,
            today_file: default_today_file(),
            server: ServerConfig::default(),
            base_dir: PathBuf::new(),
        }
    }
}

impl Config {
    /// Read and parse a YAML config file.
    ///
    /// Fails if the file does not exist, cannot be read, or is not valid
    /// YAML for this schema. Field values are checked by [`Config::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io { path: path.to_path_buf(), source: e },
        })?;

        let mut config = Self::from_yaml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Write a template config, refusing to replace an existing file
    pub fn write_template(path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        let yaml = Config::default().to_yaml().map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        std::fs::write(path, yaml).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Replace the token, e.g. from the command line
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token {
            self.irc_token = token;
        }
        self
    }

    /// Reject configs the bot cannot connect with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.irc_token.trim().is_empty() {
            return Err(ConfigError::MissingField("irc-token".to_string()));
        }
        if self.nick.trim().is_empty() {
            return Err(ConfigError::MissingField("nick".to_string()));
        }
        if self.prefix.is_empty() {
            return Err(ConfigError::MissingField("prefix".to_string()));
        }
        if self.channels().is_empty() {
            return Err(ConfigError::MissingField("initial-channels".to_string()));
        }
        Ok(())
    }

    /// Channel names lowercased, without `#`, blanks dropped
    pub fn channels(&self) -> Vec<String> {
        self.initial_channels
            .iter()
            .map(|c| c.trim().trim_start_matches('#').to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Token in the `oauth:` form the IRC gateway expects
    pub fn oauth_token(&self) -> String {
        let token = self.irc_token.trim();
        if token.starts_with("oauth:") {
            token.to_string()
        } else {
            format!("oauth:{}", token)
        }
    }

    /// Resolved location of the `today` reply file
    pub fn today_path(&self) -> PathBuf {
        self.base_dir.join(&self.today_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}", uuid::Uuid::new_v4(), name))
    }

    const SAMPLE: &str = r##"
irc-token: abc123
nick: curi_bot
initial-channels: ["#Curi", "other"]
prefix: "!"
"##;

    #[test]
    fn test_load_missing_file() {
        let path = temp_path("config.yml");
        match Config::load(&path) {
            Err(ConfigError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_file() {
        let path = temp_path("config.yml");
        std::fs::write(&path, "nick: [unterminated").unwrap();
        let result = Config::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_required_key() {
        let path = temp_path("config.yml");
        std::fs::write(&path, "irc-token: abc\n").unwrap();
        let result = Config::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_resolves_today_relative_to_config() {
        let path = temp_path("config.yml");
        std::fs::write(&path, SAMPLE).unwrap();
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.today_path(), std::env::temp_dir().join("today.txt"));
        assert_eq!(config.server.host, "irc.chat.twitch.tv");
        assert_eq!(config.server.port, 6697);
        assert!(config.server.tls);
        assert!(!config.case_insensitive);
    }

    #[test]
    fn test_server_without_tls_key_keeps_tls() {
        let config = Config::from_yaml(
            "irc-token: abc\nnick: n\ninitial-channels: [c]\nserver: { host: irc.example.org, port: 6697 }\n",
        )
        .unwrap();
        assert_eq!(config.server.host, "irc.example.org");
        assert!(config.server.tls);

        let plain = Config::from_yaml(
            "irc-token: abc\nnick: n\ninitial-channels: [c]\nserver: { host: localhost, port: 6667, tls: false }\n",
        )
        .unwrap();
        assert!(!plain.server.tls);
    }

    #[test]
    fn test_channels_and_token_normalized() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.channels(), vec!["curi", "other"]);
        assert_eq!(config.oauth_token(), "oauth:abc123");

        let config = config.with_token(Some("oauth:xyz".to_string()));
        assert_eq!(config.oauth_token(), "oauth:xyz");
    }

    #[test]
    fn test_validate() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        assert!(config.validate().is_ok());

        let mut no_token = config.clone();
        no_token.irc_token = "  ".to_string();
        assert!(matches!(no_token.validate(), Err(ConfigError::MissingField(f)) if f == "irc-token"));

        let mut no_channels = config.clone();
        no_channels.initial_channels = vec!["#".to_string()];
        assert!(matches!(no_channels.validate(), Err(ConfigError::MissingField(f)) if f == "initial-channels"));

        let mut no_prefix = config;
        no_prefix.prefix = String::new();
        assert!(no_prefix.validate().is_err());
    }

    #[test]
    fn test_write_template_roundtrip_and_no_overwrite() {
        let path = temp_path("config.yml");
        Config::write_template(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.nick, "curi_bot");
        assert!(loaded.validate().is_ok());

        let again = Config::write_template(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(again, Err(ConfigError::AlreadyExists(_))));
    }
}

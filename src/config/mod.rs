//! Configuration for a feedmail run.
//!
//! Read from `./configuration.toml`. Unlike most settings files a missing
//! configuration is an error: without it there is nobody to mail and nothing
//! to fetch.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::domain::FeedSource;

pub const DEFAULT_CONFIG_PATH: &str = "./configuration.toml";
pub const DEFAULT_STORE_PATH: &str = "./seen.db";

pub const DEFAULT_MAIL_HOST: &str = "localhost";
pub const DEFAULT_MAIL_PORT: u16 = 25;
pub const DEFAULT_MAIL_RECIPIENT: &str = "root@localhost";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mail: MailConfig,
    pub rss: RssConfig,
    pub store: StoreConfig,
}

/// SMTP connection and addressing.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub recipient: String,
    pub tls: TlsMode,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MAIL_HOST.to_string(),
            port: DEFAULT_MAIL_PORT,
            user: String::new(),
            password: String::new(),
            recipient: DEFAULT_MAIL_RECIPIENT.to_string(),
            tls: TlsMode::default(),
        }
    }
}

impl MailConfig {
    pub fn has_credentials(&self) -> bool {
        !self.user.is_empty()
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &password)
            .field("recipient", &self.recipient)
            .field("tls", &self.tls)
            .finish()
    }
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plaintext only.
    None,
    /// STARTTLS when the server offers it.
    #[default]
    Opportunistic,
    /// STARTTLS, refusing servers that do not offer it.
    Required,
    /// TLS from the first byte (SMTPS).
    Wrapper,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RssConfig {
    /// `[url, tag]` pairs, processed in this order.
    pub feeds: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl Config {
    /// Load configuration from `./configuration.toml`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load and validate configuration from `path`.
    ///
    /// Missing fields use their defaults; a missing file does not.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for pair in &self.rss.feeds {
            let [url, tag] = pair.as_slice() else {
                return Err(ConfigError::Invalid(format!(
                    "feed entry {:?} must be [url, tag]",
                    pair
                )));
            };
            Url::parse(url)
                .map_err(|e| ConfigError::Invalid(format!("feed url {:?}: {}", url, e)))?;
            if tag.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("feed {:?} has an empty tag", url)));
            }
        }

        if self.mail.host.trim().is_empty() {
            return Err(ConfigError::Invalid("mail host is empty".into()));
        }

        Ok(())
    }

    /// The configured feeds, in file order.
    pub fn feed_sources(&self) -> Vec<FeedSource> {
        self.rss
            .feeds
            .iter()
            .filter_map(|pair| match pair.as_slice() {
                [url, tag] => Some(FeedSource::new(url, tag)),
                _ => None,
            })
            .collect()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

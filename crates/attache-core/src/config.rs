use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AttacheError;

/// Default configuration written by `attache init`.
pub const DEFAULT_CONFIG: &str = r#"# attache configuration

[assistant]
# Path to a TOML corpus file. Omit to use the built-in corpus.
# corpus_path = "corpus.toml"
# Simulated reply delay for the chat REPL, in milliseconds.
reply_delay_ms = 600

[storage]
# Base URL of the remote document store. Omit to run local-only.
# remote_url = "https://docs.example.com/v1"
# api_key = "..."
local_path = ".attache/records.db"

[session]
session_path = ".attache/session.json"
admin_user = "admin"
# SHA-256 hex digest of the admin password.
# admin_password_sha256 = "..."
"#;

/// Top-level configuration loaded from `attache.toml`.
///
/// Every section is optional; omitted fields fall back to defaults.
///
/// # Examples
///
/// ```
/// use attache_core::AttacheConfig;
///
/// let config = AttacheConfig::default();
/// assert_eq!(config.assistant.reply_delay_ms, 600);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttacheConfig {
    /// Assistant / intent-matcher settings.
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Record storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Session and admin settings.
    #[serde(default)]
    pub session: SessionConfig,
}

impl AttacheConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Io`] if the file cannot be read, or
    /// [`AttacheError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use attache_core::AttacheConfig;
    /// use std::path::Path;
    ///
    /// let config = AttacheConfig::from_file(Path::new("attache.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, AttacheError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use attache_core::AttacheConfig;
    ///
    /// let toml = r#"
    /// [assistant]
    /// reply_delay_ms = 0
    /// "#;
    /// let config = AttacheConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.assistant.reply_delay_ms, 0);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, AttacheError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load `attache.toml` from the current directory if it exists,
    /// otherwise return defaults. Subcommands other than `init` use this so
    /// the tool works out of the box.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Toml`] if an existing file fails to parse.
    pub fn load_or_default(path: &Path) -> Result<Self, AttacheError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// `[assistant]` section of `attache.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Path to a TOML corpus file. `None` uses the built-in corpus.
    pub corpus_path: Option<PathBuf>,
    /// Simulated reply delay for the chat REPL, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

fn default_reply_delay_ms() -> u64 {
    600
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            corpus_path: None,
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

/// `[storage]` section of `attache.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base URL of the remote document store. `None` runs local-only.
    pub remote_url: Option<String>,
    /// API key sent as a bearer token to the remote store.
    pub api_key: Option<String>,
    /// Path of the local SQLite fallback database.
    #[serde(default = "default_local_path")]
    pub local_path: PathBuf,
}

fn default_local_path() -> PathBuf {
    PathBuf::from(".attache/records.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            api_key: None,
            local_path: default_local_path(),
        }
    }
}

/// `[session]` section of `attache.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the persisted session file.
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
    /// Admin username.
    #[serde(default = "default_admin_user")]
    pub admin_user: String,
    /// SHA-256 hex digest of the admin password. `None` disables admin login.
    pub admin_password_sha256: Option<String>,
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".attache/session.json")
}

fn default_admin_user() -> String {
    "admin".into()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_path: default_session_path(),
            admin_user: default_admin_user(),
            admin_password_sha256: None,
        }
    }
}

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use attache_core::AttacheError;

use crate::identity::{Identity, SessionSource};

/// An explicit session-state value: one identity, its source, and whether
/// admin rights were granted.
///
/// # Examples
///
/// ```
/// use attache_session::{Identity, Session, SessionSource};
///
/// let session = Session::bootstrap(Some(Identity::demo()), None).unwrap();
/// assert_eq!(session.source, SessionSource::Demo);
/// assert!(!session.admin);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The active identity.
    pub identity: Identity,
    /// Where the identity came from.
    pub source: SessionSource,
    /// Whether this session passed the admin credential check.
    #[serde(default)]
    pub admin: bool,
    /// When the session was established (UTC).
    pub issued_at: DateTime<Utc>,
}

impl Session {
    /// Reconcile the two candidate identities into at most one session.
    ///
    /// Precedence: a demo identity overrides a provider identity when both
    /// are present; otherwise the provider identity is authoritative;
    /// neither yields no session.
    ///
    /// # Examples
    ///
    /// ```
    /// use attache_session::{Identity, Session, SessionSource};
    ///
    /// let provider = Identity::provider("u1", "Ada", "ada@example.com");
    ///
    /// let s = Session::bootstrap(Some(Identity::demo()), Some(provider.clone())).unwrap();
    /// assert_eq!(s.source, SessionSource::Demo);
    ///
    /// let s = Session::bootstrap(None, Some(provider)).unwrap();
    /// assert_eq!(s.source, SessionSource::Provider);
    ///
    /// assert!(Session::bootstrap(None, None).is_none());
    /// ```
    pub fn bootstrap(demo: Option<Identity>, provider: Option<Identity>) -> Option<Self> {
        let (identity, source) = match (demo, provider) {
            (Some(demo), _) => (demo, SessionSource::Demo),
            (None, Some(provider)) => (provider, SessionSource::Provider),
            (None, None) => return None,
        };
        Some(Self {
            identity,
            source,
            admin: false,
            issued_at: Utc::now(),
        })
    }

    /// The same session with admin rights granted.
    pub fn with_admin(mut self) -> Self {
        self.admin = true;
        self
    }
}

/// JSON persistence for the current session, one explicit file on disk.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use attache_session::SessionFile;
///
/// let file = SessionFile::new(Path::new(".attache/session.json"));
/// let current = file.load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// A session file at `path`. Nothing is read or created yet.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Load the persisted session, or `None` when no file exists.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Io`] on read failure or
    /// [`AttacheError::Serialization`] when the file holds invalid JSON.
    pub fn load(&self) -> Result<Option<Session>, AttacheError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Persist `session`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Io`] on write failure.
    pub fn save(&self, session: &Session) -> Result<(), AttacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Remove the persisted session. Missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Io`] on removal failure.
    pub fn clear(&self) -> Result<(), AttacheError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

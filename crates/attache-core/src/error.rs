use std::path::PathBuf;

/// Errors that can occur across the attache toolkit.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette` diagnostics at the
/// boundary. Storage failures have their own taxonomy in `attache-store`.
///
/// # Examples
///
/// ```
/// use attache_core::AttacheError;
///
/// let err = AttacheError::Config("missing corpus path".into());
/// assert!(err.to_string().contains("missing corpus path"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AttacheError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A record failed boundary validation.
    #[error("invalid record: {0}")]
    Validation(String),

    /// Authentication or session failure.
    #[error("auth error: {0}")]
    Auth(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AttacheError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn validation_error_displays_message() {
        let err = AttacheError::Validation("age out of range".into());
        assert_eq!(err.to_string(), "invalid record: age out of range");
    }

    #[test]
    fn file_not_found_shows_path() {
        let err = AttacheError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert!(err.to_string().contains("/tmp/missing.toml"));
    }
}

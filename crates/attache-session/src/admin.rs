//! Admin credential verification against the configured digest.
//!
//! The password never lives in configuration as plaintext; only its SHA-256
//! hex digest is stored and the comparison happens on digests.

use sha2::{Digest, Sha256};

use attache_core::{AttacheError, SessionConfig};

/// Lowercase hex SHA-256 digest of `input`.
///
/// # Examples
///
/// ```
/// use attache_session::sha256_hex;
///
/// assert_eq!(
///     sha256_hex("1234"),
///     "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
/// );
/// ```
pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Check admin credentials against the `[session]` config section.
///
/// # Errors
///
/// Returns [`AttacheError::Auth`] when no admin digest is configured, the
/// username does not match, or the password digest does not match. `Ok(())`
/// means the caller may mark the session admin.
///
/// # Examples
///
/// ```
/// use attache_core::SessionConfig;
/// use attache_session::{sha256_hex, verify_admin};
///
/// let config = SessionConfig {
///     admin_password_sha256: Some(sha256_hex("hunter2")),
///     ..SessionConfig::default()
/// };
/// assert!(verify_admin(&config, "admin", "hunter2").is_ok());
/// assert!(verify_admin(&config, "admin", "wrong").is_err());
/// ```
pub fn verify_admin(config: &SessionConfig, user: &str, password: &str) -> Result<(), AttacheError> {
    let Some(expected) = &config.admin_password_sha256 else {
        return Err(AttacheError::Auth(
            "admin login disabled: no admin_password_sha256 configured".into(),
        ));
    };
    if user != config.admin_user {
        return Err(AttacheError::Auth("invalid credentials".into()));
    }
    if sha256_hex(password) != expected.to_lowercase() {
        return Err(AttacheError::Auth("invalid credentials".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(password: &str) -> SessionConfig {
        SessionConfig {
            admin_password_sha256: Some(sha256_hex(password)),
            ..SessionConfig::default()
        }
    }

    #[test]
    fn correct_credentials_pass() {
        let config = config_with("hunter2");
        assert!(verify_admin(&config, "admin", "hunter2").is_ok());
    }

    #[test]
    fn wrong_password_fails() {
        let config = config_with("hunter2");
        assert!(verify_admin(&config, "admin", "hunter3").is_err());
    }

    #[test]
    fn wrong_user_fails() {
        let config = config_with("hunter2");
        assert!(verify_admin(&config, "root", "hunter2").is_err());
    }

    #[test]
    fn missing_digest_disables_admin() {
        let config = SessionConfig::default();
        let err = verify_admin(&config, "admin", "anything").unwrap_err();
        assert!(err.to_string().contains("disabled"));
    }

    #[test]
    fn digest_comparison_is_case_insensitive_on_config_side() {
        let mut config = config_with("hunter2");
        config.admin_password_sha256 = config.admin_password_sha256.map(|d| d.to_uppercase());
        assert!(verify_admin(&config, "admin", "hunter2").is_ok());
    }
}

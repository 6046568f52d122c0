use serde::{Deserialize, Serialize};

/// An authenticated (or mock) user identity.
///
/// # Examples
///
/// ```
/// use attache_session::Identity;
///
/// let demo = Identity::demo();
/// assert_eq!(demo.uid, "demo-user-123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable user id from the provider, or the fixed demo id.
    pub uid: String,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL, when the provider supplies one.
    pub avatar_url: Option<String>,
}

impl Identity {
    /// The canned demo identity used when exploring without a provider
    /// account.
    pub fn demo() -> Self {
        Self {
            uid: "demo-user-123".into(),
            display_name: "Demo User".into(),
            email: "demo@attache.local".into(),
            avatar_url: None,
        }
    }

    /// An identity as delivered by the identity provider.
    pub fn provider(uid: &str, display_name: &str, email: &str) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
            email: email.into(),
            avatar_url: None,
        }
    }
}

/// Where a session's identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionSource {
    /// The mock demo identity.
    Demo,
    /// A real identity-provider login.
    Provider,
}

impl std::fmt::Display for SessionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionSource::Demo => write!(f, "demo"),
            SessionSource::Provider => write!(f, "provider"),
        }
    }
}

//! Session state for the portal: identities, bootstrap precedence, admin
//! verification, and session-file persistence.
//!
//! Session state is one explicit value rather than ambient storage:
//! [`Session::bootstrap`] takes both candidate identities and applies one
//! precedence rule, demo overrides provider when present, provider is
//! authoritative otherwise.

mod admin;
mod identity;
mod session;

pub use admin::{sha256_hex, verify_admin};
pub use identity::{Identity, SessionSource};
pub use session::{Session, SessionFile};

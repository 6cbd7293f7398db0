//! Identity-provider abstraction.
//!
//! ARCHITECTURE
//! ============
//! The session manager talks to the backend exclusively through
//! [`IdentityProvider`]. Implementations own credential storage and session
//! issuance; the one hard requirement is the event contract on
//! [`observe_session`](IdentityProvider::observe_session), which is what
//! lets the manager's stream stay provider-confirmed.

pub mod memory;

use tokio::sync::mpsc;

use crate::session::UserProfile;

pub use memory::MemoryProvider;

/// A provider-side identity together with its current profile attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider-assigned identifier, opaque to consumers.
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email_verified: bool,
}

impl From<Identity> for UserProfile {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.uid,
            email: identity.email,
            display_name: identity.display_name,
            photo_url: identity.photo_url,
            email_verified: identity.email_verified,
        }
    }
}

/// Profile attributes rewritable on an existing identity. Attributes are
/// overwritten as given; `None` clears the attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileAttributes {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Error returned by a provider call. `code` lives in the provider's own
/// error namespace (e.g. `auth/invalid-credential`); `message` is
/// human-readable and passed through to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ProviderError {
    pub code: String,
    pub message: String,
}

impl ProviderError {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }
}

/// External identity backend consumed by the session manager.
///
/// Event contract: every mutation that changes the signed-in session
/// (account creation, sign-in, sign-out, profile write on the signed-in
/// identity) must push the resulting `Option<Identity>` to all live
/// [`observe_session`](IdentityProvider::observe_session) channels before
/// the call returns success. Failed calls must not emit.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new account and sign it in.
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, ProviderError>;

    /// Set the display name on an existing identity.
    async fn set_display_name(&self, uid: &str, name: &str) -> Result<(), ProviderError>;

    /// Exchange credentials for a signed-in session.
    async fn authenticate(&self, email: &str, password: &str) -> Result<(), ProviderError>;

    /// End the current session, if any.
    async fn end_session(&self) -> Result<(), ProviderError>;

    /// Ask the provider to deliver a password-reset credential. Success
    /// means the provider accepted the request, not that anything was
    /// delivered.
    async fn request_password_reset(&self, email: &str) -> Result<(), ProviderError>;

    /// Rewrite profile attributes on an existing identity.
    async fn set_profile_attributes(&self, uid: &str, attrs: ProfileAttributes) -> Result<(), ProviderError>;

    /// Subscribe to session changes: `Some` while an identity is signed in,
    /// `None` while signed out. The current state is delivered first.
    fn observe_session(&self) -> mpsc::UnboundedReceiver<Option<Identity>>;
}

//! Session manager — the single source of truth for "who is logged in".
//!
//! DESIGN
//! ======
//! The manager owns a `watch` channel of `Option<Session>`; `None` means the
//! provider has not reported since startup. A forwarder task is the only
//! writer: it maps provider session events into the channel, so the stream
//! only ever carries provider-confirmed state. Each credential operation
//! calls the provider and reports a single aggregate result; none of them
//! writes the stream and none retries. Two in-flight operations may race at
//! the provider; the last confirmed event forwarded wins.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::AuthError;
use crate::provider::{IdentityProvider, ProfileAttributes};
use crate::session::Session;

/// Reactive wrapper around an [`IdentityProvider`].
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    sessions: watch::Sender<Option<Session>>,
}

impl SessionManager {
    /// Wrap a provider and start forwarding its session events.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (sessions, _) = watch::channel(None);
        let mut events = provider.observe_session();
        let writer = sessions.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let session = match event {
                    Some(identity) => Session::Authenticated(identity.into()),
                    None => Session::Anonymous,
                };
                tracing::debug!(authenticated = session.is_authenticated(), "session event");
                writer.send_replace(Some(session));
            }
        });
        Self { provider, sessions }
    }

    /// Subscribe to the session stream. The receiver immediately holds the
    /// latest known value (`None` until the provider first reports).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }

    /// Snapshot of the latest known session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.sessions.borrow().clone()
    }

    /// Create an account and set its display name as one logical operation.
    ///
    /// The two provider calls are sequenced. If the display-name write
    /// fails, the account already exists at the provider but the aggregate
    /// result is still a failure; nothing is rolled back or retried.
    pub async fn register(&self, email: &str, display_name: &str, password: &str) -> Result<(), AuthError> {
        let identity = self.provider.create_account(email, password).await?;
        self.provider.set_display_name(&identity.uid, display_name).await?;
        tracing::info!(email, "account registered");
        Ok(())
    }

    /// Exchange credentials for a session. Success guarantees an
    /// authenticated emission has been enqueued on the stream; failure
    /// leaves the stream's value untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.provider.authenticate(email, password).await?;
        tracing::info!(email, "signed in");
        Ok(())
    }

    /// End the current session. On success the stream emits anonymous.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.provider.end_session().await?;
        tracing::info!("signed out");
        Ok(())
    }

    /// Ask the provider to deliver a password-reset credential. Success
    /// means the request was accepted, not that anything was delivered. The
    /// current session is untouched.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.provider.request_password_reset(email).await?;
        tracing::info!(email, "password reset requested");
        Ok(())
    }

    /// Rewrite the signed-in user's profile attributes.
    ///
    /// The identity is taken from the manager's own latest session, not
    /// from caller-held state; with no authenticated session this fails
    /// immediately with [`AuthError::NoActiveSession`].
    pub async fn update_profile(&self, display_name: &str, photo_url: Option<&str>) -> Result<(), AuthError> {
        let uid = match self.sessions.borrow().as_ref() {
            Some(Session::Authenticated(user)) => user.user_id.clone(),
            _ => return Err(AuthError::NoActiveSession),
        };
        let attrs = ProfileAttributes {
            display_name: Some(display_name.to_owned()),
            photo_url: photo_url.map(str::to_owned),
        };
        self.provider.set_profile_attributes(&uid, attrs).await?;
        tracing::info!(%uid, "profile updated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;

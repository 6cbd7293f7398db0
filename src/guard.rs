//! Navigation guard — per-attempt access control from the current session.
//!
//! DESIGN
//! ======
//! Each check is a one-shot read: the guard clones a fresh receiver and
//! waits for the first known session value instead of snapshotting, so a
//! navigation issued during the provider's startup session restore is held
//! until the restore lands rather than bounced to sign-in.

use tokio::sync::watch;

use crate::session::Session;

/// Router hook invoked when a navigation is denied.
pub trait Navigator: Send + Sync {
    /// Redirect the user to `route`.
    fn redirect(&self, route: &str);
}

/// Outcome of a single navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session was authenticated; navigation proceeds.
    Allowed,
    /// The session was anonymous; the navigator was sent to sign-in.
    Denied,
}

/// Access-control check run before a route transition.
pub struct AuthGuard {
    sessions: watch::Receiver<Option<Session>>,
    sign_in_route: String,
}

impl AuthGuard {
    #[must_use]
    pub fn new(sessions: watch::Receiver<Option<Session>>, sign_in_route: impl Into<String>) -> Self {
        Self { sessions, sign_in_route: sign_in_route.into() }
    }

    /// Decide one navigation attempt.
    ///
    /// Waits for the first known session value, then allows iff it is
    /// authenticated; on deny, redirects to the sign-in route exactly once.
    /// Never mutates session state.
    pub async fn check(&self, navigator: &dyn Navigator) -> GuardDecision {
        let mut sessions = self.sessions.clone();
        let allowed = match sessions.wait_for(|session| session.is_some()).await {
            Ok(session) => session.as_ref().is_some_and(Session::is_authenticated),
            Err(_) => {
                // Stream closed before a first value: no session source left.
                tracing::warn!("session stream closed before first value; denying navigation");
                false
            }
        };

        if allowed {
            GuardDecision::Allowed
        } else {
            navigator.redirect(&self.sign_in_route);
            GuardDecision::Denied
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

//! Session model — the authentication state of the app at a point in time.
//!
//! A session is a value, replaced wholesale on every provider-confirmed
//! change. The enum shape makes partial states unrepresentable: either an
//! identity and its profile are present, or nothing is.

use serde::{Deserialize, Serialize};

/// Profile of the authenticated user, as last confirmed by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque provider-assigned identifier.
    pub user_id: String,
    /// Email the account was created with.
    pub email: String,
    /// Display name, if one has been set.
    pub display_name: Option<String>,
    /// Avatar reference, if one has been set.
    pub photo_url: Option<String>,
    /// Whether the provider has verified the email address.
    pub email_verified: bool,
}

/// Authentication state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    /// No authenticated identity.
    Anonymous,
    /// An identity is signed in, with its latest profile attributes.
    Authenticated(UserProfile),
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// The authenticated profile, if any.
    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

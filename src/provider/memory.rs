//! In-memory identity provider.
//!
//! Backs tests and the demo binary. Behaves like a small real backend:
//! hashed credentials, duplicate-account detection, a minimum password
//! length, reset tokens, and session-event fanout to observers.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::Rng;
use sha2::{Digest, Sha256};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::{Identity, IdentityProvider, ProfileAttributes, ProviderError};

/// Provider password policy.
const MIN_PASSWORD_LEN: usize = 6;

#[must_use]
fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

#[must_use]
fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex_string(&hasher.finalize())
}

/// Mint a random 16-byte hex reset token.
#[must_use]
fn generate_reset_token() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex_string(&bytes)
}

fn hex_string(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

fn invalid_email() -> ProviderError {
    ProviderError::new("auth/invalid-email", "email address is badly formatted")
}

fn user_not_found() -> ProviderError {
    ProviderError::new("auth/user-not-found", "no account matches the given identifier")
}

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    email: String,
    password_hash: String,
    display_name: Option<String>,
    photo_url: Option<String>,
    email_verified: bool,
}

impl Account {
    fn identity(&self) -> Identity {
        Identity {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            photo_url: self.photo_url.clone(),
            email_verified: self.email_verified,
        }
    }
}

#[derive(Default)]
struct State {
    /// Accounts keyed by normalized email.
    accounts: HashMap<String, Account>,
    /// Uid of the signed-in account, if any.
    signed_in: Option<String>,
    /// Live observer channels; closed ones are pruned on send.
    observers: Vec<mpsc::UnboundedSender<Option<Identity>>>,
    /// Outstanding reset tokens keyed by normalized email.
    reset_tokens: HashMap<String, String>,
}

impl State {
    fn broadcast(&mut self, event: Option<Identity>) {
        self.observers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn signed_in_identity(&self) -> Option<Identity> {
        let uid = self.signed_in.as_deref()?;
        self.accounts
            .values()
            .find(|account| account.uid == uid)
            .map(Account::identity)
    }
}

/// In-memory [`IdentityProvider`].
#[derive(Default)]
pub struct MemoryProvider {
    state: Mutex<State>,
}

impl MemoryProvider {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The outstanding reset token for `email`, if one has been minted.
    #[must_use]
    pub fn reset_token(&self, email: &str) -> Option<String> {
        let normalized = normalize_email(email)?;
        self.lock().reset_tokens.get(&normalized).cloned()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MemoryProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        let normalized = normalize_email(email).ok_or_else(invalid_email)?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ProviderError::new(
                "auth/weak-password",
                format!("password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }

        let mut state = self.lock();
        if state.accounts.contains_key(&normalized) {
            return Err(ProviderError::new(
                "auth/email-already-in-use",
                "an account already exists for this email",
            ));
        }

        let account = Account {
            uid: Uuid::new_v4().to_string(),
            email: normalized.clone(),
            password_hash: hash_password(password),
            display_name: None,
            photo_url: None,
            email_verified: false,
        };
        let identity = account.identity();

        // A freshly created account is signed in, like the real backend.
        state.signed_in = Some(account.uid.clone());
        state.accounts.insert(normalized, account);
        state.broadcast(Some(identity.clone()));
        Ok(identity)
    }

    async fn set_display_name(&self, uid: &str, name: &str) -> Result<(), ProviderError> {
        let mut state = self.lock();
        let Some(account) = state.accounts.values_mut().find(|a| a.uid == uid) else {
            return Err(user_not_found());
        };
        account.display_name = Some(name.to_owned());
        let identity = account.identity();

        if state.signed_in.as_deref() == Some(uid) {
            state.broadcast(Some(identity));
        }
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<(), ProviderError> {
        let normalized = normalize_email(email).ok_or_else(invalid_email)?;
        let mut state = self.lock();
        let Some(account) = state.accounts.get(&normalized) else {
            return Err(user_not_found());
        };
        if account.password_hash != hash_password(password) {
            return Err(ProviderError::new("auth/invalid-credential", "wrong email or password"));
        }

        let identity = account.identity();
        state.signed_in = Some(identity.uid.clone());
        state.broadcast(Some(identity));
        Ok(())
    }

    async fn end_session(&self) -> Result<(), ProviderError> {
        let mut state = self.lock();
        state.signed_in = None;
        state.broadcast(None);
        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        let normalized = normalize_email(email).ok_or_else(invalid_email)?;
        let mut state = self.lock();
        if !state.accounts.contains_key(&normalized) {
            return Err(user_not_found());
        }

        let token = generate_reset_token();
        tracing::info!(email = %normalized, "password reset token minted");
        state.reset_tokens.insert(normalized, token);
        Ok(())
    }

    async fn set_profile_attributes(&self, uid: &str, attrs: ProfileAttributes) -> Result<(), ProviderError> {
        let mut state = self.lock();
        let Some(account) = state.accounts.values_mut().find(|a| a.uid == uid) else {
            return Err(user_not_found());
        };
        account.display_name = attrs.display_name;
        account.photo_url = attrs.photo_url;
        let identity = account.identity();

        if state.signed_in.as_deref() == Some(uid) {
            state.broadcast(Some(identity));
        }
        Ok(())
    }

    fn observe_session(&self) -> mpsc::UnboundedReceiver<Option<Identity>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.lock();
        // New observers get the current state first, modeling the backend's
        // session restore completing shortly after subscription.
        let _ = tx.send(state.signed_in_identity());
        state.observers.push(tx);
        rx
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

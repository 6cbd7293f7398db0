//! Reactive session management and navigation guarding for client apps.
//!
//! ARCHITECTURE
//! ============
//! [`SessionManager`] wraps an external identity backend behind the
//! [`IdentityProvider`] trait and republishes every provider-confirmed
//! session change on a replay-latest stream. [`AuthGuard`] consumes that
//! stream to allow or deny individual navigation attempts. Forms, routing
//! tables, and the backend itself live outside this crate; consumers get
//! the stream and the five credential operations, nothing provider-specific.

pub mod error;
pub mod guard;
pub mod manager;
pub mod provider;
pub mod session;

pub use error::AuthError;
pub use guard::{AuthGuard, GuardDecision, Navigator};
pub use manager::SessionManager;
pub use provider::{Identity, IdentityProvider, MemoryProvider, ProfileAttributes, ProviderError};
pub use session::{Session, UserProfile};

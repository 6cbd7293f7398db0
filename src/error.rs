//! Error taxonomy for session-mutating operations.

use crate::provider::ProviderError;

/// Failure of a session-mutating operation.
///
/// Exactly one `AuthError` is produced per failed operation; nothing retries
/// and the session stream never carries errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// A constraint was violated before any provider call was made. The
    /// manager does not raise this itself today; input validation runs
    /// upstream in the forms layer.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The provider rejected the operation. Code and message pass through
    /// verbatim.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Profile update attempted with no authenticated identity.
    #[error("no active session")]
    NoActiveSession,
}

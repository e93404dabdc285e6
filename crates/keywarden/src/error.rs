//! Error types for the Keywarden custody system.

use thiserror::Error;

use keywarden_core::AccountAddress;

use crate::account::KeyStoreError;

/// Errors that can occur during custody operations.
///
/// Every variant is a precondition-style abort: the attempted transition is
/// rejected as a whole and no local mutation survives.
#[derive(Debug, Error)]
pub enum WardenError {
    /// Invalid input supplied at construction.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A capability reference failed its validity check at call time.
    #[error("access denied: {0}")]
    Access(String),

    /// The same authorizer recorded an authorization twice.
    #[error("authorizer {0} has already recorded an authorization")]
    DuplicateAuthorization(AccountAddress),

    /// The operation is not legal in the grantor's current state.
    #[error("{operation} is not allowed while the grantor is {state}")]
    StateConflict {
        /// The rejected operation.
        operation: &'static str,
        /// The state the grantor was in.
        state: &'static str,
    },

    /// Execution was attempted before the veto window elapsed.
    #[error("revocation delay has not elapsed: eligible at {eligible_at}, now {now}")]
    PrematureExecution {
        /// First timestamp (Unix ms) at which execution becomes legal.
        eligible_at: i64,
        /// The timestamp the caller supplied.
        now: i64,
    },

    /// An account key store primitive failed.
    #[error("key store error: {0}")]
    KeyStore(#[from] KeyStoreError),
}

/// Result type for custody operations.
pub type Result<T> = std::result::Result<T, WardenError>;

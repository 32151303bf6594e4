//! Error types for the gate and its collaborators.
//!
//! ERROR HANDLING
//! ==============
//! None of these errors are fatal to rendering. Identity errors degrade to a
//! signed-out session, profile errors degrade to the `customer` role, and
//! sign-out errors leave the client session in place until the next reload.
//! All of them flow to an `ErrorReporter` rather than the end user.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
    #[error("sign-out rejected: {0}")]
    SignOutRejected(String),
}

/// Failure reported by the document store for a single record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,
    #[error("permission denied reading {collection}/{id}")]
    PermissionDenied { collection: String, id: String },
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed document: {0}")]
    Decode(String),
}

impl StoreError {
    /// The well-known "record absent" outcome, which is not an error for profiles.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Errors surfaced to the out-of-band reporter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("identity load failed: {0}")]
    Identity(#[source] AuthError),
    #[error("profile load failed for {identity_id}: {source}")]
    Profile {
        identity_id: String,
        #[source]
        source: StoreError,
    },
    #[error("idle sign-out failed: {0}")]
    SignOut(#[source] AuthError),
}

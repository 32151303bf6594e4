//! Collaborator interfaces consumed by the gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! Identity and profile changes arrive as pushes from external services.
//! Each subscription hands back a [`Subscription`] whose release is the only
//! way to stop delivery, so listener lifetimes are explicit and a gate that
//! switches identities can prove the old listener is gone.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use async_trait::async_trait;

use crate::error::{AuthError, GateError, StoreError};
use crate::session::Session;

/// Push callback registered with a provider.
pub type Listener<T> = Box<dyn Fn(T) + Send + Sync + 'static>;

/// Result delivered for one document read: `Ok(None)` means not found.
pub type DocumentResult = Result<Option<serde_json::Value>, StoreError>;

/// Unsubscribe handle. Releasing it (explicitly or on drop) runs the
/// provider's cancel hook exactly once.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A handle with nothing to release.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Sign-in state source.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register for session changes (sign-in, sign-out, token refresh).
    /// Providers deliver the current state once settled.
    fn subscribe(&self, listener: Listener<Result<Session, AuthError>>) -> Subscription;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Realtime single-record reads.
pub trait DocumentStore {
    fn subscribe(&self, collection: &str, id: &str, listener: Listener<DocumentResult>) -> Subscription;
}

/// Client-side navigation.
pub trait Router {
    /// Navigate without adding a history entry.
    fn replace(&self, path: &str);
}

/// Out-of-band error sink; never shown to the end user.
pub trait ErrorReporter {
    fn report(&self, error: &GateError);
}

/// Reports through `tracing` at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &GateError) {
        tracing::error!(error = %error, "session gate error");
    }
}

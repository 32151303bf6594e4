//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written only by the `AuthGate` event loop; read by pages and the idle
//! sign-out component. Provided as `RwSignal<AuthState>` context.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use funb_gate::{GateStatus, Identity, Session};

/// Session plus the gate's current render decision.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: Session,
    pub status: GateStatus,
}

impl AuthState {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity.as_ref()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session.identity.is_some()
    }

    /// Whether routed content may render.
    #[must_use]
    pub fn show_content(&self) -> bool {
        self.status.is_authorized()
    }

    /// Name for the account header, falling back to email then id.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        self.identity().map(|identity| {
            identity
                .display_name
                .clone()
                .or_else(|| identity.email.clone())
                .unwrap_or_else(|| identity.id.clone())
        })
    }
}

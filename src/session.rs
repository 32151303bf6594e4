//! Session, identity, and role-profile models.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Session` is what the identity provider pushes; `UserProfile` is the
//! decoded profile document owned by the document store. The gate reads both
//! and never writes either.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

/// An authenticated principal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), display_name: None, email: None }
    }
}

/// Client-held sign-in state.
///
/// `identity` is `None` while signed out. `loading` is true from mount
/// until the identity provider reports its first settled state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

impl Session {
    #[must_use]
    pub fn loading() -> Self {
        Self { identity: None, loading: true }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { identity: None, loading: false }
    }

    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self { identity: Some(identity), loading: false }
    }

    #[must_use]
    pub fn identity_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.id.as_str())
    }
}

/// Authorization tier stored on the profile document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Customer,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }
}

/// Per-identity profile record. Extra document fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub role: Option<Role>,
}

impl UserProfile {
    /// Role with the `customer` fallback applied.
    #[must_use]
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or_default()
    }
}

/// Where the gate stands on the current identity's profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProfileState {
    /// No identity, so no profile is tracked.
    #[default]
    Idle,
    Loading,
    Loaded(Role),
    /// Read failed; resolved as `customer`.
    Failed,
}

impl ProfileState {
    #[must_use]
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn role(self) -> Role {
        match self {
            Self::Loaded(role) => role,
            Self::Idle | Self::Loading | Self::Failed => Role::Customer,
        }
    }
}

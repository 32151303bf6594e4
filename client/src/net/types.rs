//! Response DTOs for the identity service.
//!
//! DESIGN
//! ======
//! Kept separate from `funb_gate::Identity` so the wire shape can drift
//! (field renames, extra fields) without touching the gate.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use funb_gate::Identity;

/// Authenticated user as returned by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self { id: user.id, display_name: user.name, email: user.email }
    }
}

/// Credentials body for password sign-in and sign-up.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

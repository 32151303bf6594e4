//! Gate configuration.
//!
//! DESIGN
//! ======
//! Path areas and home routes are plain data so deployments can move the
//! admin or account sections without touching the decision table. Only the
//! idle timeout is environment-tunable; everything else is fixed by the
//! route layout of the client.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_IDLE_TIMEOUT_MS: u64 = 900_000;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Inactivity window before the session is signed out, in milliseconds.
    pub idle_timeout_ms: u64,
    pub login_path: String,
    pub admin_home: String,
    pub account_home: String,
    pub admin_prefixes: Vec<String>,
    pub account_prefixes: Vec<String>,
    /// Pages a signed-in user is bounced away from (exact match).
    pub auth_pages: Vec<String>,
    /// Document collection holding one profile record per identity.
    pub profile_collection: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            login_path: "/login".to_owned(),
            admin_home: "/admin/dashboard".to_owned(),
            account_home: "/account".to_owned(),
            admin_prefixes: vec!["/admin".to_owned()],
            account_prefixes: vec!["/account".to_owned()],
            auth_pages: vec!["/login".to_owned(), "/signup".to_owned()],
            profile_collection: "users".to_owned(),
        }
    }
}

impl GateConfig {
    /// Defaults with `FUNB_IDLE_TIMEOUT_MS` applied when it parses.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            idle_timeout_ms: env_parse("FUNB_IDLE_TIMEOUT_MS", DEFAULT_IDLE_TIMEOUT_MS),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

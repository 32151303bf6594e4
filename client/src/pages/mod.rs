//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages never check auth themselves; `AuthGate` has already decided they
//! may render. Each page owns only its own form state.

pub mod account;
pub mod admin_dashboard;
pub mod home;
pub mod login;
pub mod signup;

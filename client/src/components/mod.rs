//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth_gate` wraps every routed page; `idle_sign_out` runs once per app
//! and renders nothing.

pub mod auth_gate;
pub mod idle_sign_out;

//! # funb-gate
//!
//! Session and route authorization gate for the FunB course platform.
//!
//! Every page of the web client passes through [`gate::Gate`] before its
//! content renders. The gate composes three push-based inputs (identity,
//! the identity's role profile, and the current route) into one decision:
//! render, or replace-navigate elsewhere. A companion [`idle::IdleTimer`]
//! signs the session out after a period without user activity.
//!
//! This crate is framework-free so the decision logic can be exercised
//! without a renderer; the `client` crate binds it to Leptos signals.

pub mod config;
pub mod decision;
pub mod error;
pub mod gate;
pub mod idle;
pub mod memory;
pub mod provider;
pub mod route;
pub mod session;

pub use config::GateConfig;
pub use decision::{Decision, RuleSet};
pub use error::{AuthError, GateError, StoreError};
pub use gate::{Gate, GateEvent, GateStatus};
pub use route::Location;
pub use session::{Identity, Role, Session, UserProfile};

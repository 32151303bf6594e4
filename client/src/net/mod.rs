//! Networking modules for the identity and profile endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and `types` defines the response shapes the
//! browser adapters convert into `funb-gate` values.

pub mod api;
pub mod types;

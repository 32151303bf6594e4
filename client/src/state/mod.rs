//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Only session state is global; pages keep their own form state locally.

pub mod auth;

//! # client
//!
//! Leptos + WASM front end for the FunB course platform.
//!
//! Every route renders inside `AuthGate`, which binds the `funb-gate`
//! controller to reactive state. Browser adapters for the identity
//! provider, profile documents, and router live in `util::auth`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}

//! Route gate that holds page content until the session gate authorizes it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once inside the `Router`. In the browser it owns a
//! `funb_gate::Gate` running on a local task; route changes, hydration, and
//! cleanup are forwarded to it as events, and its status/session changes
//! are written into the shared `RwSignal<AuthState>`.
//!
//! DESIGN
//! ======
//! Until the status is `Authorized` a neutral placeholder renders instead
//! of the children. The server always renders the placeholder, which keeps
//! SSR output identical to the first hydrated frame and means protected
//! content is never painted before the redirect decision.

#[cfg(test)]
#[path = "auth_gate_test.rs"]
mod auth_gate_test;

use leptos::prelude::*;

#[cfg(any(test, feature = "hydrate"))]
use funb_gate::Location;

use crate::state::auth::AuthState;

/// Build a gate `Location` from router pathname and search strings.
#[cfg(any(test, feature = "hydrate"))]
fn current_location(pathname: &str, search: &str) -> Location {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        Location::parse(pathname)
    } else {
        Location::parse(&format!("{pathname}?{search}"))
    }
}

#[component]
pub fn AuthGate(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    #[cfg(feature = "hydrate")]
    install_gate(auth);

    view! {
        <Show
            when=move || auth.with(AuthState::show_content)
            fallback=|| view! { <div class="auth-gate auth-gate--pending" aria-busy="true"></div> }
        >
            {children()}
        </Show>
    }
}

#[cfg(feature = "hydrate")]
fn install_gate(auth: RwSignal<AuthState>) {
    use funb_gate::{Gate, GateConfig, GateEvent};
    use leptos_router::hooks::{use_location, use_navigate};

    use crate::util::auth::{BrowserIdentity, BrowserProfileStore, LeptosRouter};

    let config = expect_context::<GateConfig>();
    let identity = expect_context::<BrowserIdentity>();
    let location = use_location();
    let router = LeptosRouter::new(use_navigate());

    let initial = current_location(&location.pathname.get_untracked(), &location.search.get_untracked());
    let (gate, rx) = Gate::mount(config, &identity, BrowserProfileStore, router, initial);
    let events = gate.events();

    leptos::task::spawn_local(gate.run(rx, move |status, session| {
        let _ = auth.try_set(AuthState { session: session.clone(), status: status.clone() });
    }));

    let route_events = events.clone();
    Effect::new(move || {
        let current = current_location(&location.pathname.get(), &location.search.get());
        let _ = route_events.send(GateEvent::Route(current));
    });

    // Effects only run in the browser, after hydration.
    let hydrated_events = events.clone();
    Effect::new(move || {
        let _ = hydrated_events.send(GateEvent::Hydrated);
    });

    on_cleanup(move || {
        let _ = events.send(GateEvent::Unmount);
    });
}

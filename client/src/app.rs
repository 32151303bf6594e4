//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use funb_gate::GateConfig;

use crate::components::{auth_gate::AuthGate, idle_sign_out::IdleSignOut};
use crate::pages::{
    account::AccountPage, admin_dashboard::AdminDashboardPage, home::HomePage, login::LoginPage, signup::SignupPage,
};
use crate::state::auth::AuthState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides auth state, gate configuration, and (in the browser) the
/// identity provider, then routes every page through `AuthGate`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(RwSignal::new(AuthState::default()));
    provide_context(GateConfig::default());
    #[cfg(feature = "hydrate")]
    provide_context(crate::util::auth::BrowserIdentity::new());

    view! {
        <Stylesheet id="leptos" href="/pkg/funb.css"/>
        <Title text="FunB"/>

        <Router>
            <IdleSignOut/>
            <AuthGate>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route path=StaticSegment("account") view=AccountPage/>
                    <Route path=(StaticSegment("admin"), StaticSegment("dashboard")) view=AdminDashboardPage/>
                </Routes>
            </AuthGate>
        </Router>
    }
}

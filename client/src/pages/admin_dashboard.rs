//! Admin landing page. Only reachable once the gate has seen an admin role.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let name = move || auth.with(AuthState::display_name).unwrap_or_default();

    view! {
        <div class="admin-page">
            <h1>"Admin dashboard"</h1>
            <p>"Signed in as " {name}</p>
            <nav class="admin-page__nav">
                <a href="/">"Site home"</a>
            </nav>
        </div>
    }
}

//! Public landing page.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let signed_in = move || auth.with(AuthState::is_signed_in);

    view! {
        <div class="home-page">
            <h1>"FunB"</h1>
            <p>"Courses, lessons, and progress in one place."</p>
            <Show
                when=signed_in
                fallback=|| view! {
                    <a class="home-link" href="/login">"Sign in"</a>
                    <a class="home-link" href="/signup">"Create an account"</a>
                }
            >
                <a class="home-link" href="/account">"Go to your account"</a>
            </Show>
        </div>
    }
}

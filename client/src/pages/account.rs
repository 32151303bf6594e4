//! Signed-in account page with a sign-out control.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn AccountPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    #[cfg(feature = "hydrate")]
    let identity = expect_context::<crate::util::auth::BrowserIdentity>();

    let on_sign_out = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use funb_gate::provider::IdentityProvider;

            let identity = identity.clone();
            leptos::task::spawn_local(async move {
                // On success the gate redirects away from this page.
                if let Err(e) = identity.sign_out().await {
                    info.set(format!("Sign out failed: {e}"));
                }
                busy.set(false);
            });
        }
    };

    let name = move || auth.with(AuthState::display_name).unwrap_or_default();
    let email = move || auth.with(|state| state.identity().and_then(|identity| identity.email.clone()));

    view! {
        <div class="account-page">
            <h1>"Your account"</h1>
            <p class="account-page__name">{name}</p>
            {move || email().map(|email| view! { <p class="account-page__email">{email}</p> })}
            <button class="account-page__sign-out" on:click=on_sign_out disabled=move || busy.get()>
                "Sign out"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="account-page__message">{move || info.get()}</p>
            </Show>
        </div>
    }
}

//! Browser adapters that connect `funb-gate` to the running app.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gate only sees its collaborator traits. In the browser those are:
//!
//! - `BrowserIdentity`: session from `/api/auth/me`, sign-out via
//!   `/api/auth/logout`, re-fetched on demand after login.
//! - `BrowserProfileStore`: profile documents polled from the API, with
//!   listeners told only when the result changes.
//! - `LeptosRouter`: `leptos_router` navigation with history replacement.
//!
//! TRADE-OFFS
//! ==========
//! The profile API has no push channel, so "realtime" is a poll. A role
//! change reaches the gate within one poll interval.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::time::Duration;

use leptos_router::NavigateOptions;

#[cfg(any(test, feature = "hydrate"))]
use funb_gate::provider::DocumentResult;
use funb_gate::provider::Router;

/// How often an open profile subscription re-reads its document.
pub const PROFILE_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Whether a freshly read document result should reach the listener.
#[cfg(any(test, feature = "hydrate"))]
fn should_deliver(last: Option<&DocumentResult>, next: &DocumentResult) -> bool {
    last != Some(next)
}

/// `Router` over a `leptos_router` navigate function.
#[derive(Clone)]
pub struct LeptosRouter<F> {
    navigate: F,
}

impl<F> LeptosRouter<F>
where
    F: Fn(&str, NavigateOptions),
{
    pub fn new(navigate: F) -> Self {
        Self { navigate }
    }
}

impl<F> Router for LeptosRouter<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn replace(&self, path: &str) {
        (self.navigate)(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{BrowserIdentity, BrowserProfileStore};

#[cfg(feature = "hydrate")]
mod browser {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    use async_trait::async_trait;
    use leptos::task::spawn_local;

    use funb_gate::provider::{DocumentResult, DocumentStore, IdentityProvider, Listener, Subscription};
    use funb_gate::{AuthError, Identity, Session};

    use super::{PROFILE_POLL_INTERVAL, should_deliver};
    use crate::net::api;

    type SessionListener = Arc<Listener<Result<Session, AuthError>>>;

    #[derive(Default)]
    struct Listeners {
        next_id: AtomicU64,
        entries: Mutex<HashMap<u64, SessionListener>>,
    }

    impl Listeners {
        fn insert(&self, listener: SessionListener) -> u64 {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            self.entries.lock().unwrap_or_else(PoisonError::into_inner).insert(id, listener);
            id
        }

        fn remove(&self, id: u64) {
            self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(&id);
        }

        fn get(&self, id: u64) -> Option<SessionListener> {
            self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(&id).cloned()
        }

        fn notify(&self, result: &Result<Session, AuthError>) {
            let listeners: Vec<SessionListener> =
                self.entries.lock().unwrap_or_else(PoisonError::into_inner).values().cloned().collect();
            for listener in listeners {
                listener(result.clone());
            }
        }
    }

    async fn current_session() -> Result<Session, AuthError> {
        let user = api::fetch_current_user().await?;
        Ok(user.map_or_else(Session::signed_out, |user| Session::signed_in(Identity::from(user))))
    }

    /// Identity provider backed by the session cookie and `/api/auth/*`.
    #[derive(Clone, Default)]
    pub struct BrowserIdentity {
        listeners: Arc<Listeners>,
    }

    impl BrowserIdentity {
        pub fn new() -> Self {
            Self::default()
        }

        /// Re-read the session and push it to every listener. Called after
        /// a login or sign-up form succeeds.
        pub fn refresh(&self) {
            let listeners = self.listeners.clone();
            spawn_local(async move {
                let result = current_session().await;
                listeners.notify(&result);
            });
        }
    }

    #[async_trait]
    impl IdentityProvider for BrowserIdentity {
        fn subscribe(&self, listener: Listener<Result<Session, AuthError>>) -> Subscription {
            let id = self.listeners.insert(Arc::new(listener));

            let listeners = self.listeners.clone();
            spawn_local(async move {
                let result = current_session().await;
                if let Some(listener) = listeners.get(id) {
                    listener(result);
                }
            });

            let listeners = self.listeners.clone();
            Subscription::new(move || listeners.remove(id))
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            // gloo-net futures are !Send; run the request locally and await
            // its outcome over a oneshot.
            let (tx, rx) = futures::channel::oneshot::channel();
            spawn_local(async move {
                let _ = tx.send(api::logout().await);
            });
            rx.await.map_err(|_| AuthError::SignOutRejected("logout request dropped".to_owned()))??;

            log::info!("signed out");
            self.listeners.notify(&Ok(Session::signed_out()));
            Ok(())
        }
    }

    /// Document store that polls the profile API.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserProfileStore;

    impl DocumentStore for BrowserProfileStore {
        fn subscribe(&self, collection: &str, id: &str, listener: Listener<DocumentResult>) -> Subscription {
            let alive = Arc::new(AtomicBool::new(true));
            let alive_task = alive.clone();
            let collection = collection.to_owned();
            let id = id.to_owned();

            spawn_local(async move {
                let mut last: Option<DocumentResult> = None;
                loop {
                    let result = api::fetch_document(&collection, &id).await;
                    if !alive_task.load(Ordering::Relaxed) {
                        break;
                    }
                    if should_deliver(last.as_ref(), &result) {
                        listener(result.clone());
                        last = Some(result);
                    }
                    gloo_timers::future::sleep(PROFILE_POLL_INTERVAL).await;
                    if !alive_task.load(Ordering::Relaxed) {
                        break;
                    }
                }
            });

            Subscription::new(move || alive.store(false, Ordering::Relaxed))
        }
    }
}

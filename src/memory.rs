//! In-process collaborators.
//!
//! DESIGN
//! ======
//! Each type is a cheap `Clone` handle over shared state so a caller can
//! hand one copy to the gate and keep another to drive changes and inspect
//! counters. Listeners are invoked after the lock is released; a listener
//! that calls back into the same handle cannot deadlock.
//!
//! Used by native embeddings (SSR previews, the integration suite) where no
//! hosted identity provider or document store is reachable.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{AuthError, GateError, StoreError};
use crate::provider::{DocumentResult, DocumentStore, ErrorReporter, IdentityProvider, Listener, Router, Subscription};
use crate::session::Session;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// IDENTITY PROVIDER
// =============================================================================

type SessionListener = Arc<Listener<Result<Session, AuthError>>>;

#[derive(Clone, Default)]
pub struct MemoryIdentityProvider {
    inner: Arc<Mutex<IdentityInner>>,
}

#[derive(Default)]
struct IdentityInner {
    session: Session,
    listeners: HashMap<u64, SessionListener>,
    next_listener: u64,
    sign_out_calls: usize,
    sign_out_error: Option<AuthError>,
}

impl MemoryIdentityProvider {
    /// Starts in the loading state; nothing is delivered until a session is set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session and notify every listener.
    pub fn set_session(&self, session: Session) {
        let listeners = {
            let mut inner = lock(&self.inner);
            inner.session = session.clone();
            inner.listeners.values().cloned().collect::<Vec<_>>()
        };
        for listener in listeners {
            listener(Ok(session.clone()));
        }
    }

    /// Push a load failure to every listener.
    pub fn fail(&self, error: AuthError) {
        let listeners: Vec<_> = lock(&self.inner).listeners.values().cloned().collect();
        for listener in listeners {
            listener(Err(error.clone()));
        }
    }

    /// Make subsequent `sign_out` calls fail with `error`.
    pub fn reject_sign_out(&self, error: AuthError) {
        lock(&self.inner).sign_out_error = Some(error);
    }

    #[must_use]
    pub fn session(&self) -> Session {
        lock(&self.inner).session.clone()
    }

    #[must_use]
    pub fn sign_out_calls(&self) -> usize {
        lock(&self.inner).sign_out_calls
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    fn subscribe(&self, listener: Listener<Result<Session, AuthError>>) -> Subscription {
        let listener: SessionListener = Arc::new(listener);
        let (id, current) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_listener;
            inner.next_listener += 1;
            inner.listeners.insert(id, Arc::clone(&listener));
            (id, inner.session.clone())
        };
        if !current.loading {
            listener(Ok(current));
        }

        let inner = Arc::clone(&self.inner);
        Subscription::new(move || {
            lock(&inner).listeners.remove(&id);
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        {
            let mut inner = lock(&self.inner);
            inner.sign_out_calls += 1;
            if let Some(error) = inner.sign_out_error.clone() {
                return Err(error);
            }
        }
        self.set_session(Session::signed_out());
        Ok(())
    }
}

// =============================================================================
// DOCUMENT STORE
// =============================================================================

type Key = (String, String);
type DocumentListener = Arc<Listener<DocumentResult>>;

#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    documents: HashMap<Key, serde_json::Value>,
    errors: HashMap<Key, StoreError>,
    /// Keys whose initial snapshot is held back until `release`.
    deferred: HashSet<Key>,
    listeners: HashMap<u64, (Key, DocumentListener)>,
    next_listener: u64,
    subscribed: HashMap<Key, usize>,
    unsubscribed: HashMap<Key, usize>,
}

impl StoreInner {
    fn current(&self, key: &Key) -> DocumentResult {
        if let Some(error) = self.errors.get(key) {
            return Err(error.clone());
        }
        Ok(self.documents.get(key).cloned())
    }

    fn listeners_for(&self, key: &Key) -> Vec<DocumentListener> {
        self.listeners
            .values()
            .filter(|(k, _)| k == key)
            .map(|(_, l)| Arc::clone(l))
            .collect()
    }
}

fn key(collection: &str, id: &str) -> Key {
    (collection.to_owned(), id.to_owned())
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a record and push it to its listeners.
    pub fn set_document(&self, collection: &str, id: &str, document: serde_json::Value) {
        let k = key(collection, id);
        let (listeners, current) = {
            let mut inner = lock(&self.inner);
            inner.errors.remove(&k);
            inner.documents.insert(k.clone(), document);
            (inner.listeners_for(&k), inner.current(&k))
        };
        notify(&listeners, &current);
    }

    /// Delete a record; listeners see "not found".
    pub fn remove_document(&self, collection: &str, id: &str) {
        let k = key(collection, id);
        let listeners = {
            let mut inner = lock(&self.inner);
            inner.errors.remove(&k);
            inner.documents.remove(&k);
            inner.listeners_for(&k)
        };
        notify(&listeners, &Ok(None));
    }

    /// Make reads of a record fail and push the error to its listeners.
    pub fn fail(&self, collection: &str, id: &str, error: StoreError) {
        let k = key(collection, id);
        let listeners = {
            let mut inner = lock(&self.inner);
            inner.errors.insert(k.clone(), error.clone());
            inner.listeners_for(&k)
        };
        notify(&listeners, &Err(error));
    }

    /// Hold back the initial snapshot for new subscriptions to a record.
    pub fn defer(&self, collection: &str, id: &str) {
        lock(&self.inner).deferred.insert(key(collection, id));
    }

    /// Deliver the current value of a deferred record to its listeners.
    pub fn release(&self, collection: &str, id: &str) {
        let k = key(collection, id);
        let (listeners, current) = {
            let mut inner = lock(&self.inner);
            inner.deferred.remove(&k);
            (inner.listeners_for(&k), inner.current(&k))
        };
        notify(&listeners, &current);
    }

    #[must_use]
    pub fn active_listeners(&self, collection: &str, id: &str) -> usize {
        let k = key(collection, id);
        lock(&self.inner).listeners_for(&k).len()
    }

    #[must_use]
    pub fn subscribe_count(&self, collection: &str, id: &str) -> usize {
        let k = key(collection, id);
        lock(&self.inner).subscribed.get(&k).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn unsubscribe_count(&self, collection: &str, id: &str) -> usize {
        let k = key(collection, id);
        lock(&self.inner).unsubscribed.get(&k).copied().unwrap_or(0)
    }
}

fn notify(listeners: &[DocumentListener], result: &DocumentResult) {
    for listener in listeners {
        listener(result.clone());
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn subscribe(&self, collection: &str, id: &str, listener: Listener<DocumentResult>) -> Subscription {
        let k = key(collection, id);
        let listener: DocumentListener = Arc::new(listener);
        let (listener_id, initial) = {
            let mut inner = lock(&self.inner);
            let listener_id = inner.next_listener;
            inner.next_listener += 1;
            inner.listeners.insert(listener_id, (k.clone(), Arc::clone(&listener)));
            *inner.subscribed.entry(k.clone()).or_default() += 1;
            let initial = (!inner.deferred.contains(&k)).then(|| inner.current(&k));
            (listener_id, initial)
        };
        if let Some(initial) = initial {
            listener(initial);
        }

        let inner = Arc::clone(&self.inner);
        Subscription::new(move || {
            let mut inner = lock(&inner);
            if let Some((k, _)) = inner.listeners.remove(&listener_id) {
                *inner.unsubscribed.entry(k).or_default() += 1;
            }
        })
    }
}

// =============================================================================
// ROUTER / REPORTER
// =============================================================================

/// Records every replace-navigation.
#[derive(Clone, Default)]
pub struct MemoryRouter {
    history: Arc<Mutex<Vec<String>>>,
}

impl MemoryRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn replaced(&self) -> Vec<String> {
        lock(&self.history).clone()
    }
}

impl Router for MemoryRouter {
    fn replace(&self, path: &str) {
        lock(&self.history).push(path.to_owned());
    }
}

/// Collects reported errors.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    errors: Arc<Mutex<Vec<GateError>>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<GateError> {
        lock(&self.errors).clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &GateError) {
        tracing::warn!(error = %error, "recorded gate error");
        lock(&self.errors).push(error.clone());
    }
}

//! Idle session expiry.
//!
//! DESIGN
//! ======
//! `IdleTimer` is a pure deadline tracker with time injected as "elapsed
//! since mount", so the browser (wall clock from `js_sys`) and native
//! (tokio `Instant`) drivers share the same rules:
//!
//! - every qualifying activity re-arms the deadline,
//! - the deadline fires at most once,
//! - after firing, only the next activity arms it again,
//! - drivers arm it only while a user is signed in.
//!
//! `IdleWatcher` is the native driver: one spawned task subscribed to the
//! identity provider, one pending sleep per idle period, torn down when the
//! watcher is dropped.

#[cfg(test)]
#[path = "idle_test.rs"]
mod idle_test;

use std::time::Duration;

/// User activity signals that count as "not idle".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    PointerMove,
    PointerDown,
    KeyDown,
    TouchStart,
    Scroll,
}

impl ActivityKind {
    pub const ALL: [Self; 5] = [Self::PointerMove, Self::PointerDown, Self::KeyDown, Self::TouchStart, Self::Scroll];

    /// DOM event name to listen for.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::PointerMove => "pointermove",
            Self::PointerDown => "pointerdown",
            Self::KeyDown => "keydown",
            Self::TouchStart => "touchstart",
            Self::Scroll => "scroll",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdleTimer {
    timeout: Duration,
    deadline: Option<Duration>,
}

impl IdleTimer {
    /// A disarmed timer.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout, deadline: None }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Start a fresh idle period at `now`.
    pub fn arm_at(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.timeout));
    }

    /// Activity observed at `now`; same as re-arming.
    pub fn record_activity_at(&mut self, now: Duration) {
        self.arm_at(now);
    }

    /// Returns `true` exactly once when the deadline has passed, then disarms.
    pub fn poll_at(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left before expiry, if armed.
    #[must_use]
    pub fn remaining_at(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_sub(now))
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }
}

#[cfg(feature = "runtime")]
pub use watcher::IdleWatcher;

#[cfg(feature = "runtime")]
mod watcher {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;
    use tokio::time::Instant;

    use super::{ActivityKind, IdleTimer};
    use crate::error::{AuthError, GateError};
    use crate::provider::{IdentityProvider, Listener};
    use crate::session::Session;

    /// Tokio driver that signs the session out after `timeout` without activity.
    ///
    /// Follows the provider's session: the timer is armed when a user signs
    /// in and disarmed on sign-out, so a signed-out provider is never asked
    /// to sign out.
    pub struct IdleWatcher {
        activity: mpsc::UnboundedSender<ActivityKind>,
        task: JoinHandle<()>,
    }

    impl IdleWatcher {
        /// Start watching. Must be called inside a runtime.
        pub fn spawn<P>(timeout: Duration, provider: Arc<P>) -> Self
        where
            P: IdentityProvider + ?Sized + 'static,
        {
            let (activity, rx) = mpsc::unbounded_channel();
            let task = tokio::spawn(watch(timeout, provider, rx));
            Self { activity, task }
        }

        /// Report user activity; re-arms the idle period while signed in.
        pub fn record(&self, kind: ActivityKind) {
            let _ = self.activity.send(kind);
        }
    }

    impl Drop for IdleWatcher {
        fn drop(&mut self) {
            self.task.abort();
        }
    }

    async fn watch<P>(timeout: Duration, provider: Arc<P>, mut activity: mpsc::UnboundedReceiver<ActivityKind>)
    where
        P: IdentityProvider + ?Sized,
    {
        let mounted = Instant::now();
        let mut timer = IdleTimer::new(timeout);
        let mut signed_in = false;

        // Identity errors count as signed out, as they do for the gate.
        let (session_tx, mut sessions) = mpsc::unbounded_channel();
        let listener: Listener<Result<Session, AuthError>> = Box::new(move |result| {
            let _ = session_tx.send(result.is_ok_and(|session| session.identity.is_some()));
        });
        let _subscription = provider.subscribe(listener);

        loop {
            let deadline = timer.deadline();
            tokio::select! {
                update = sessions.recv() => match update {
                    Some(now_signed_in) => {
                        if now_signed_in && !signed_in {
                            timer.arm_at(mounted.elapsed());
                        } else if !now_signed_in {
                            timer.disarm();
                        }
                        signed_in = now_signed_in;
                    }
                    None => return,
                },
                received = activity.recv() => match received {
                    Some(kind) if signed_in => {
                        tracing::trace!(?kind, "activity re-armed idle timer");
                        timer.record_activity_at(mounted.elapsed());
                    }
                    Some(_) => {}
                    None => return,
                },
                () = tokio::time::sleep_until(mounted + deadline.unwrap_or_default()), if deadline.is_some() => {
                    if timer.poll_at(mounted.elapsed()) {
                        tracing::info!(idle_secs = timeout.as_secs(), "idle timeout reached, signing out");
                        if let Err(e) = provider.sign_out().await {
                            tracing::warn!(error = %GateError::SignOut(e), "idle sign-out failed");
                        }
                    }
                }
            }
        }
    }
}

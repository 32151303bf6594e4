//! Session/route authorization gate.
//!
//! ARCHITECTURE
//! ============
//! The gate is a single-owner controller. Collaborator callbacks never touch
//! it directly; they enqueue [`GateEvent`]s on an unbounded channel and the
//! owner feeds them back through [`Gate::handle`], which applies the event
//! and re-evaluates synchronously. This keeps one logical writer and makes
//! every transition replayable in tests without a renderer.
//!
//! ```text
//!   identity provider ──┐
//!   document store ─────┼──> mpsc<GateEvent> ──> Gate::handle ──> GateStatus
//!   router / renderer ──┘                              │
//!                                                      └──> Router::replace
//! ```
//!
//! INVARIANTS
//! ==========
//! - `Authorized` is only produced once hydration has happened, the session
//!   has settled, and a signed-in identity's profile has settled.
//! - Switching identities releases the old profile subscription before the
//!   new one is opened. Profile events carry the generation they were
//!   subscribed under and stale generations are dropped.
//! - A redirect computed again from unchanged inputs does not navigate twice.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::GateConfig;
use crate::decision::{Decision, DecisionInput, RuleSet};
use crate::error::{AuthError, GateError, StoreError};
use crate::provider::{DocumentResult, DocumentStore, ErrorReporter, IdentityProvider, Listener, Router, Subscription, TracingReporter};
use crate::route::Location;
use crate::session::{ProfileState, Role, Session, UserProfile};

/// Input change delivered to the gate.
#[derive(Debug)]
pub enum GateEvent {
    Session(Result<Session, AuthError>),
    Profile { generation: u64, result: DocumentResult },
    Route(Location),
    /// The client has finished its first paint.
    Hydrated,
    Unmount,
}

/// What the renderer should show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GateStatus {
    /// Inputs still settling; show the neutral placeholder.
    #[default]
    Loading,
    /// A replace-navigation was issued; keep the placeholder until the
    /// route update arrives.
    Redirecting { target: String },
    Authorized,
}

impl GateStatus {
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

pub struct Gate<S, R> {
    config: GateConfig,
    rules: RuleSet,
    store: S,
    router: R,
    reporter: Box<dyn ErrorReporter>,
    events: UnboundedSender<GateEvent>,
    identity_sub: Option<Subscription>,
    profile_sub: Option<Subscription>,
    generation: u64,
    session: Session,
    profile: ProfileState,
    location: Location,
    hydrated: bool,
    last_redirect: Option<(Location, String)>,
    status: GateStatus,
    mounted: bool,
}

impl<S, R> Gate<S, R>
where
    S: DocumentStore,
    R: Router,
{
    /// Subscribe to the identity provider and return the gate with the
    /// receiving end of its event channel.
    pub fn mount<I>(
        config: GateConfig,
        identity: &I,
        store: S,
        router: R,
        location: Location,
    ) -> (Self, UnboundedReceiver<GateEvent>)
    where
        I: IdentityProvider + ?Sized,
    {
        let (events, rx) = mpsc::unbounded_channel();

        let session_events = events.clone();
        let listener: Listener<Result<Session, AuthError>> = Box::new(move |result| {
            let _ = session_events.send(GateEvent::Session(result));
        });
        let identity_sub = identity.subscribe(listener);

        let gate = Self {
            config,
            rules: RuleSet::default(),
            store,
            router,
            reporter: Box::new(TracingReporter),
            events,
            identity_sub: Some(identity_sub),
            profile_sub: None,
            generation: 0,
            session: Session::loading(),
            profile: ProfileState::Idle,
            location,
            hydrated: false,
            last_redirect: None,
            status: GateStatus::Loading,
            mounted: true,
        };
        (gate, rx)
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Sender for renderer-side events (route changes, hydration, unmount).
    #[must_use]
    pub fn events(&self) -> UnboundedSender<GateEvent> {
        self.events.clone()
    }

    #[must_use]
    pub fn status(&self) -> &GateStatus {
        &self.status
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn profile(&self) -> ProfileState {
        self.profile
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Current profile subscription generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one event and re-evaluate.
    pub fn handle(&mut self, event: GateEvent) -> &GateStatus {
        if !self.mounted {
            return &self.status;
        }

        match event {
            GateEvent::Session(result) => self.apply_session(result),
            GateEvent::Profile { generation, result } => {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "dropping stale profile event");
                    return &self.status;
                }
                self.apply_profile(result);
            }
            GateEvent::Route(location) => self.location = location,
            GateEvent::Hydrated => self.hydrated = true,
            GateEvent::Unmount => {
                self.unmount();
                return &self.status;
            }
        }

        self.evaluate();
        &self.status
    }

    /// Drain events until unmount, calling `on_change` whenever the status
    /// or session changes.
    pub async fn run<F>(mut self, mut events: UnboundedReceiver<GateEvent>, mut on_change: F)
    where
        F: FnMut(&GateStatus, &Session),
    {
        while let Some(event) = events.recv().await {
            let unmount = matches!(event, GateEvent::Unmount);
            let status_before = self.status.clone();
            let session_before = self.session.clone();

            self.handle(event);
            if self.status != status_before || self.session != session_before {
                on_change(&self.status, &self.session);
            }
            if unmount {
                break;
            }
        }
    }

    /// Release both subscriptions. Further events are ignored.
    pub fn unmount(&mut self) {
        if let Some(sub) = self.profile_sub.take() {
            sub.unsubscribe();
        }
        if let Some(sub) = self.identity_sub.take() {
            sub.unsubscribe();
        }
        self.mounted = false;
        self.status = GateStatus::Loading;
        tracing::debug!("session gate unmounted");
    }

    fn apply_session(&mut self, result: Result<Session, AuthError>) {
        let session = match result {
            Ok(session) => session,
            Err(e) => {
                self.reporter.report(&GateError::Identity(e));
                Session::signed_out()
            }
        };

        let identity_changed = self.session.identity_id() != session.identity_id();
        self.session = session;
        if identity_changed {
            self.repoint_profile();
        }
    }

    /// Cancel the previous identity's profile listener, then follow the
    /// current identity's record.
    fn repoint_profile(&mut self) {
        if let Some(sub) = self.profile_sub.take() {
            sub.unsubscribe();
        }
        self.generation += 1;

        let Some(identity_id) = self.session.identity_id() else {
            self.profile = ProfileState::Idle;
            return;
        };

        self.profile = ProfileState::Loading;
        let events = self.events.clone();
        let generation = self.generation;
        let listener: Listener<DocumentResult> = Box::new(move |result| {
            let _ = events.send(GateEvent::Profile { generation, result });
        });
        tracing::debug!(identity_id, generation, "subscribing to profile");
        self.profile_sub = Some(
            self.store
                .subscribe(&self.config.profile_collection, identity_id, listener),
        );
    }

    fn apply_profile(&mut self, result: DocumentResult) {
        let identity_id = self.session.identity_id().unwrap_or_default().to_owned();
        self.profile = match result {
            Ok(Some(document)) => match serde_json::from_value::<UserProfile>(document) {
                Ok(profile) => ProfileState::Loaded(profile.effective_role()),
                Err(e) => {
                    let source = StoreError::Decode(e.to_string());
                    self.reporter.report(&GateError::Profile { identity_id, source });
                    ProfileState::Failed
                }
            },
            Ok(None) | Err(StoreError::NotFound) => ProfileState::Loaded(Role::Customer),
            Err(source) => {
                self.reporter.report(&GateError::Profile { identity_id, source });
                ProfileState::Failed
            }
        };
    }

    fn inputs_settled(&self) -> bool {
        if !self.hydrated || self.session.loading {
            return false;
        }
        self.session.identity.is_none() || self.profile.is_settled()
    }

    fn evaluate(&mut self) {
        if !self.inputs_settled() {
            self.status = GateStatus::Loading;
            return;
        }

        let input = DecisionInput {
            signed_in: self.session.identity.is_some(),
            role: self.profile.role(),
            location: &self.location,
        };
        match self.rules.evaluate(&input, &self.config) {
            Decision::Authorized => {
                self.last_redirect = None;
                self.status = GateStatus::Authorized;
            }
            Decision::Redirect(target) => {
                let repeated = self
                    .last_redirect
                    .as_ref()
                    .is_some_and(|(from, to)| *from == self.location && *to == target);
                if repeated {
                    tracing::debug!(%target, "redirect already issued");
                } else {
                    tracing::info!(from = %self.location.path, %target, "gate redirect");
                    self.router.replace(&target);
                    self.last_redirect = Some((self.location.clone(), target.clone()));
                }
                self.status = GateStatus::Redirecting { target };
            }
        }
    }
}

//! Signs the session out after a period without user activity.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once at the app root. Window listeners for every
//! `ActivityKind` feed a `funb_gate::idle::IdleTimer`; a single pending
//! `gloo_timers` sleep checks the deadline. The timer is armed only while
//! a user is signed in, and sign-out goes through the same
//! `BrowserIdentity` the gate listens to, so the gate sees the signed-out
//! session and applies its own redirect rules.
//!
//! ARCHITECTURE
//! ============
//! Each scheduled sleep carries an epoch. Re-scheduling or cancelling bumps
//! the epoch, so a stale sleep that wakes up does nothing.

#[cfg(test)]
#[path = "idle_sign_out_test.rs"]
mod idle_sign_out_test;

#[cfg(any(test, feature = "hydrate"))]
use std::time::Duration;

use leptos::prelude::*;

/// Time since `mount_ms`, clamped at zero for clock skew.
#[cfg(any(test, feature = "hydrate"))]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn elapsed_since(mount_ms: f64, now_ms: f64) -> Duration {
    Duration::from_millis((now_ms - mount_ms).max(0.0) as u64)
}

/// Millisecond delay for a sleep, saturating at `u32::MAX`.
#[cfg(any(test, feature = "hydrate"))]
fn delay_ms(remaining: Duration) -> u32 {
    u32::try_from(remaining.as_millis()).unwrap_or(u32::MAX)
}

#[component]
pub fn IdleSignOut() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    browser::install();
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::time::Duration;

    use leptos::prelude::*;

    use funb_gate::GateConfig;
    use funb_gate::idle::{ActivityKind, IdleTimer};
    use funb_gate::provider::IdentityProvider;

    use super::{delay_ms, elapsed_since};
    use crate::state::auth::AuthState;
    use crate::util::auth::BrowserIdentity;

    #[derive(Clone)]
    struct Idle {
        timer: StoredValue<IdleTimer>,
        epoch: StoredValue<u64>,
        identity: BrowserIdentity,
        mount_ms: f64,
    }

    impl Idle {
        fn now(&self) -> Duration {
            elapsed_since(self.mount_ms, js_sys::Date::now())
        }

        fn cancel(&self) -> u64 {
            self.epoch.update_value(|epoch| *epoch += 1);
            self.epoch.get_value()
        }

        fn schedule(&self, after: Duration) {
            let epoch = self.cancel();
            let this = self.clone();
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(Duration::from_millis(u64::from(delay_ms(after)))).await;
                if this.epoch.try_get_value() == Some(epoch) {
                    this.check();
                }
            });
        }

        fn arm(&self) {
            let now = self.now();
            self.timer.update_value(|timer| timer.arm_at(now));
            self.schedule(self.timer.with_value(IdleTimer::timeout));
        }

        fn disarm(&self) {
            self.timer.update_value(IdleTimer::disarm);
            self.cancel();
        }

        fn record_activity(&self) {
            let now = self.now();
            let was_armed = self.timer.with_value(IdleTimer::is_armed);
            self.timer.update_value(|timer| timer.record_activity_at(now));
            // An armed timer already has a pending check; it re-reads the
            // deadline when it wakes.
            if !was_armed {
                self.schedule(self.timer.with_value(IdleTimer::timeout));
            }
        }

        fn check(&self) {
            let now = self.now();
            let fired = self.timer.try_update_value(|timer| timer.poll_at(now)).unwrap_or(false);
            if fired {
                log::info!("idle timeout reached; signing out");
                let identity = self.identity.clone();
                leptos::task::spawn_local(async move {
                    if let Err(e) = identity.sign_out().await {
                        log::warn!("idle sign-out failed: {e}");
                    }
                });
                return;
            }
            if let Some(remaining) = self.timer.with_value(|timer| timer.remaining_at(now)) {
                self.schedule(remaining);
            }
        }
    }

    pub(super) fn install() {
        let auth = expect_context::<RwSignal<AuthState>>();
        let config = expect_context::<GateConfig>();
        let idle = Idle {
            timer: StoredValue::new(IdleTimer::new(config.idle_timeout())),
            epoch: StoredValue::new(0),
            identity: expect_context::<BrowserIdentity>(),
            mount_ms: js_sys::Date::now(),
        };

        let idle_auth = idle.clone();
        Effect::new(move |was_signed_in: Option<bool>| {
            let signed_in = auth.with(AuthState::is_signed_in);
            if was_signed_in != Some(signed_in) {
                if signed_in {
                    idle_auth.arm();
                } else {
                    idle_auth.disarm();
                }
            }
            signed_in
        });

        let handles: Vec<_> = ActivityKind::ALL
            .into_iter()
            .map(|kind| {
                let idle = idle.clone();
                window_event_listener_untyped(kind.event_name(), move |_| {
                    if auth.with_untracked(AuthState::is_signed_in) {
                        idle.record_activity();
                    }
                })
            })
            .collect();

        let epoch = idle.epoch;
        on_cleanup(move || {
            for handle in handles {
                handle.remove();
            }
            epoch.try_update_value(|epoch| *epoch += 1);
        });
    }
}

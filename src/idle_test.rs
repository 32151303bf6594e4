use super::*;

const TIMEOUT: Duration = Duration::from_millis(900_000);

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

// =============================================================
// ActivityKind
// =============================================================

#[test]
fn activity_event_names_are_dom_names() {
    let names: Vec<_> = ActivityKind::ALL.iter().map(|k| k.event_name()).collect();
    assert_eq!(names, ["pointermove", "pointerdown", "keydown", "touchstart", "scroll"]);
}

// =============================================================
// IdleTimer
// =============================================================

#[test]
fn new_timer_is_disarmed() {
    let mut timer = IdleTimer::new(TIMEOUT);
    assert!(!timer.is_armed());
    assert!(!timer.poll_at(ms(10_000_000)));
}

#[test]
fn armed_timer_fires_at_deadline() {
    let mut timer = IdleTimer::new(TIMEOUT);
    timer.arm_at(Duration::ZERO);
    assert!(!timer.poll_at(ms(899_999)));
    assert!(timer.poll_at(ms(900_000)));
}

#[test]
fn timer_fires_only_once_per_period() {
    let mut timer = IdleTimer::new(TIMEOUT);
    timer.arm_at(Duration::ZERO);
    assert!(timer.poll_at(ms(900_001)));
    assert!(!timer.poll_at(ms(1_800_000)));
    assert!(!timer.is_armed());
}

#[test]
fn activity_pushes_deadline_out() {
    let mut timer = IdleTimer::new(TIMEOUT);
    timer.arm_at(Duration::ZERO);
    timer.record_activity_at(ms(899_000));
    assert!(!timer.poll_at(ms(900_000)));
    assert_eq!(timer.deadline(), Some(ms(1_799_000)));
    assert!(timer.poll_at(ms(1_799_000)));
}

#[test]
fn activity_after_firing_rearms() {
    let mut timer = IdleTimer::new(TIMEOUT);
    timer.arm_at(Duration::ZERO);
    assert!(timer.poll_at(ms(900_000)));
    timer.record_activity_at(ms(1_000_000));
    assert_eq!(timer.remaining_at(ms(1_000_000)), Some(TIMEOUT));
    assert!(timer.poll_at(ms(1_900_000)));
}

#[test]
fn disarm_cancels_pending_deadline() {
    let mut timer = IdleTimer::new(TIMEOUT);
    timer.arm_at(Duration::ZERO);
    timer.disarm();
    assert!(!timer.poll_at(ms(2_000_000)));
    assert_eq!(timer.remaining_at(Duration::ZERO), None);
}

// =============================================================
// IdleWatcher
// =============================================================

#[cfg(feature = "runtime")]
mod watcher_tests {
    use std::sync::Arc;

    use tokio::time::sleep;

    use super::*;
    use crate::error::AuthError;
    use crate::memory::MemoryIdentityProvider;
    use crate::session::{Identity, Session};

    fn signed_in_provider() -> Arc<MemoryIdentityProvider> {
        let provider = Arc::new(MemoryIdentityProvider::new());
        provider.set_session(Session::signed_in(Identity::new("u1")));
        provider
    }

    #[tokio::test(start_paused = true)]
    async fn idle_period_signs_out_exactly_once() {
        let provider = signed_in_provider();
        let _watcher = IdleWatcher::spawn(TIMEOUT, Arc::clone(&provider));

        sleep(ms(899_999)).await;
        assert_eq!(provider.sign_out_calls(), 0);

        sleep(ms(2)).await;
        assert_eq!(provider.sign_out_calls(), 1);
        assert_eq!(provider.session(), Session::signed_out());

        sleep(ms(5_000_000)).await;
        assert_eq!(provider.sign_out_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn activity_restarts_the_period() {
        let provider = signed_in_provider();
        let watcher = IdleWatcher::spawn(TIMEOUT, Arc::clone(&provider));

        sleep(ms(899_000)).await;
        watcher.record(ActivityKind::PointerMove);

        sleep(ms(1_001)).await;
        assert_eq!(provider.sign_out_calls(), 0, "must not fire at the original deadline");

        sleep(ms(897_998)).await;
        assert_eq!(provider.sign_out_calls(), 0);

        sleep(ms(2)).await;
        assert_eq!(provider.sign_out_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn activity_after_expiry_is_ignored_once_signed_out() {
        let provider = signed_in_provider();
        let watcher = IdleWatcher::spawn(TIMEOUT, Arc::clone(&provider));

        sleep(ms(900_001)).await;
        assert_eq!(provider.sign_out_calls(), 1);

        watcher.record(ActivityKind::KeyDown);
        sleep(ms(5_000_000)).await;
        assert_eq!(provider.sign_out_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn signed_out_provider_is_never_signed_out() {
        let provider = Arc::new(MemoryIdentityProvider::new());
        provider.set_session(Session::signed_out());
        let watcher = IdleWatcher::spawn(TIMEOUT, Arc::clone(&provider));

        watcher.record(ActivityKind::PointerDown);
        sleep(ms(5_000_000)).await;
        assert_eq!(provider.sign_out_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn sign_in_arms_a_fresh_period() {
        let provider = Arc::new(MemoryIdentityProvider::new());
        provider.set_session(Session::signed_out());
        let _watcher = IdleWatcher::spawn(TIMEOUT, Arc::clone(&provider));

        sleep(ms(1_000_000)).await;
        provider.set_session(Session::signed_in(Identity::new("u2")));

        sleep(ms(899_000)).await;
        assert_eq!(provider.sign_out_calls(), 0);

        sleep(ms(2_000)).await;
        assert_eq!(provider.sign_out_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sign_out_elsewhere_disarms_pending_period() {
        let provider = signed_in_provider();
        let _watcher = IdleWatcher::spawn(TIMEOUT, Arc::clone(&provider));

        sleep(ms(1_000)).await;
        provider.set_session(Session::signed_out());

        sleep(ms(2_000_000)).await;
        assert_eq!(provider.sign_out_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_watcher_cancels_pending_sign_out() {
        let provider = signed_in_provider();
        let watcher = IdleWatcher::spawn(TIMEOUT, Arc::clone(&provider));

        sleep(ms(1_000)).await;
        drop(watcher);

        sleep(ms(2_000_000)).await;
        assert_eq!(provider.sign_out_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_sign_out_is_not_fatal() {
        let provider = signed_in_provider();
        provider.reject_sign_out(AuthError::SignOutRejected("offline".into()));
        let watcher = IdleWatcher::spawn(TIMEOUT, Arc::clone(&provider));

        sleep(ms(900_001)).await;
        assert_eq!(provider.sign_out_calls(), 1);
        assert_eq!(provider.session().identity_id(), Some("u1"));

        watcher.record(ActivityKind::Scroll);
        sleep(ms(900_001)).await;
        assert_eq!(provider.sign_out_calls(), 2);
    }
}

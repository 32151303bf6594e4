use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn counting_subscription(count: &Arc<AtomicUsize>) -> Subscription {
    let count = Arc::clone(count);
    Subscription::new(move || {
        count.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn unsubscribe_runs_cancel_once() {
    let count = Arc::new(AtomicUsize::new(0));
    counting_subscription(&count).unsubscribe();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_runs_cancel_once() {
    let count = Arc::new(AtomicUsize::new(0));
    {
        let _sub = counting_subscription(&count);
    }
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn noop_subscription_reports_inactive() {
    let sub = Subscription::noop();
    assert!(format!("{sub:?}").contains("active: false"));
    sub.unsubscribe();
}

#[test]
fn tracing_reporter_accepts_errors() {
    TracingReporter.report(&GateError::Identity(AuthError::Unavailable("offline".into())));
}

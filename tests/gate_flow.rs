//! End-to-end session flows through the gate with in-memory collaborators.

use std::sync::Arc;
use std::time::Duration;

use funb_gate::decision::{Action, Condition, Rule};
use funb_gate::idle::{ActivityKind, IdleWatcher};
use funb_gate::memory::{MemoryDocumentStore, MemoryIdentityProvider, MemoryRouter};
use funb_gate::route::Area;
use funb_gate::{Gate, GateConfig, GateEvent, GateStatus, Identity, Location, RuleSet, Session};
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn drain(gate: &mut Gate<MemoryDocumentStore, MemoryRouter>, rx: &mut UnboundedReceiver<GateEvent>) -> GateStatus {
    while let Ok(event) = rx.try_recv() {
        gate.handle(event);
    }
    gate.status().clone()
}

#[tokio::test(start_paused = true)]
async fn idle_expiry_sends_account_user_to_login() {
    init_tracing();
    let config = GateConfig::default();
    let identity = Arc::new(MemoryIdentityProvider::new());
    identity.set_session(Session::signed_in(Identity::new("u1")));
    let router = MemoryRouter::new();

    let (mut gate, mut rx) = Gate::mount(
        config.clone(),
        identity.as_ref(),
        MemoryDocumentStore::new(),
        router.clone(),
        Location::new("/account/orders"),
    );
    gate.handle(GateEvent::Hydrated);
    assert_eq!(drain(&mut gate, &mut rx), GateStatus::Authorized);

    let watcher = IdleWatcher::spawn(config.idle_timeout(), Arc::clone(&identity));
    tokio::time::sleep(Duration::from_secs(10 * 60)).await;
    watcher.record(ActivityKind::TouchStart);
    tokio::time::sleep(Duration::from_secs(10 * 60)).await;
    assert_eq!(drain(&mut gate, &mut rx), GateStatus::Authorized);

    tokio::time::sleep(Duration::from_secs(6 * 60)).await;
    assert_eq!(identity.sign_out_calls(), 1);
    assert_eq!(
        drain(&mut gate, &mut rx),
        GateStatus::Redirecting { target: "/login?redirect=/account/orders".into() }
    );
    assert_eq!(router.replaced(), vec!["/login?redirect=/account/orders"]);
}

#[test]
fn admin_promotion_moves_user_out_of_account_area() {
    init_tracing();
    let identity = MemoryIdentityProvider::new();
    let store = MemoryDocumentStore::new();
    let router = MemoryRouter::new();
    let (mut gate, mut rx) = Gate::mount(
        GateConfig::default(),
        &identity,
        store.clone(),
        router.clone(),
        Location::new("/account"),
    );
    gate.handle(GateEvent::Hydrated);

    identity.set_session(Session::signed_in(Identity::new("u1")));
    store.set_document("users", "u1", json!({ "role": "customer" }));
    assert_eq!(drain(&mut gate, &mut rx), GateStatus::Authorized);

    store.set_document("users", "u1", json!({ "role": "admin" }));
    assert_eq!(
        drain(&mut gate, &mut rx),
        GateStatus::Redirecting { target: "/admin/dashboard".into() }
    );

    gate.handle(GateEvent::Route(Location::new("/admin/dashboard")));
    assert_eq!(drain(&mut gate, &mut rx), GateStatus::Authorized);
}

#[test]
fn custom_rule_set_replaces_defaults() {
    init_tracing();
    let mut config = GateConfig::default();
    config.account_prefixes = vec!["/learn".into()];
    let mut rules = RuleSet::empty();
    rules.push(Rule::new(
        "signed-out-learning",
        [Condition::SignedOut, Condition::InArea(Area::Account)],
        Action::LoginWithReturn,
    ));

    let identity = MemoryIdentityProvider::new();
    identity.set_session(Session::signed_out());
    let router = MemoryRouter::new();
    let (gate, mut rx) = Gate::mount(
        config,
        &identity,
        MemoryDocumentStore::new(),
        router.clone(),
        Location::new("/learn/webinars/7"),
    );
    let mut gate = gate.with_rules(rules);
    gate.handle(GateEvent::Hydrated);

    assert_eq!(
        drain(&mut gate, &mut rx),
        GateStatus::Redirecting { target: "/login?redirect=/learn/webinars/7".into() }
    );

    // No admin rule in this set, so the admin area is open.
    gate.handle(GateEvent::Route(Location::new("/admin")));
    assert_eq!(drain(&mut gate, &mut rx), GateStatus::Authorized);
}

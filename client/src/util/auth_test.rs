use std::cell::RefCell;
use std::rc::Rc;

use funb_gate::StoreError;

use super::*;

// =============================================================
// should_deliver
// =============================================================

#[test]
fn first_result_is_always_delivered() {
    assert!(should_deliver(None, &Ok(None)));
}

#[test]
fn unchanged_result_is_not_redelivered() {
    let doc: DocumentResult = Ok(Some(serde_json::json!({ "role": "customer" })));
    assert!(!should_deliver(Some(&doc), &doc.clone()));
}

#[test]
fn role_change_is_delivered() {
    let before: DocumentResult = Ok(Some(serde_json::json!({ "role": "customer" })));
    let after: DocumentResult = Ok(Some(serde_json::json!({ "role": "admin" })));
    assert!(should_deliver(Some(&before), &after));
}

#[test]
fn error_after_success_is_delivered() {
    let before: DocumentResult = Ok(Some(serde_json::json!({ "role": "admin" })));
    let after: DocumentResult = Err(StoreError::Unavailable("down".into()));
    assert!(should_deliver(Some(&before), &after));
}

// =============================================================
// LeptosRouter
// =============================================================

#[test]
fn router_replaces_history_entry() {
    let calls: Rc<RefCell<Vec<(String, bool)>>> = Rc::default();
    let sink = calls.clone();
    let router = LeptosRouter::new(move |path: &str, options: NavigateOptions| {
        sink.borrow_mut().push((path.to_owned(), options.replace));
    });

    router.replace("/login?redirect=/account");

    assert_eq!(calls.borrow().as_slice(), &[("/login?redirect=/account".to_owned(), true)]);
}

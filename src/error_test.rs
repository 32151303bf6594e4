use std::error::Error as _;

use super::*;

#[test]
fn not_found_is_recognized() {
    assert!(StoreError::NotFound.is_not_found());
    assert!(!StoreError::Unavailable("offline".into()).is_not_found());
}

#[test]
fn permission_denied_names_the_record() {
    let err = StoreError::PermissionDenied { collection: "users".into(), id: "u1".into() };
    assert_eq!(err.to_string(), "permission denied reading users/u1");
}

#[test]
fn profile_error_exposes_store_source() {
    let err = GateError::Profile { identity_id: "u1".into(), source: StoreError::Unavailable("offline".into()) };
    assert!(err.to_string().contains("u1"));
    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "document store unavailable: offline");
}

#[test]
fn sign_out_error_wraps_auth_error() {
    let err = GateError::SignOut(AuthError::SignOutRejected("network".into()));
    assert_eq!(err.to_string(), "idle sign-out failed: sign-out rejected: network");
}

use super::*;

// =============================================================
// Session
// =============================================================

#[test]
fn session_default_is_loading() {
    let session = Session::default();
    assert!(session.loading);
    assert!(session.identity.is_none());
}

#[test]
fn signed_in_session_exposes_identity_id() {
    let session = Session::signed_in(Identity::new("u1"));
    assert!(!session.loading);
    assert_eq!(session.identity_id(), Some("u1"));
}

#[test]
fn signed_out_session_has_no_identity() {
    assert_eq!(Session::signed_out().identity_id(), None);
}

// =============================================================
// Role / UserProfile
// =============================================================

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
    assert_eq!(Role::Customer.as_str(), "customer");
}

#[test]
fn profile_with_role_decodes() {
    let profile: UserProfile = serde_json::from_str(r#"{"role":"admin","name":"Ada"}"#).unwrap();
    assert_eq!(profile.effective_role(), Role::Admin);
}

#[test]
fn profile_without_role_defaults_to_customer() {
    let profile: UserProfile = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
    assert_eq!(profile.role, None);
    assert_eq!(profile.effective_role(), Role::Customer);
}

#[test]
fn profile_with_unknown_role_fails_to_decode() {
    let result = serde_json::from_str::<UserProfile>(r#"{"role":"owner"}"#);
    assert!(result.is_err());
}

// =============================================================
// ProfileState
// =============================================================

#[test]
fn only_loading_profile_is_unsettled() {
    assert!(ProfileState::Idle.is_settled());
    assert!(!ProfileState::Loading.is_settled());
    assert!(ProfileState::Loaded(Role::Admin).is_settled());
    assert!(ProfileState::Failed.is_settled());
}

#[test]
fn failed_profile_resolves_to_customer() {
    assert_eq!(ProfileState::Failed.role(), Role::Customer);
    assert_eq!(ProfileState::Loaded(Role::Admin).role(), Role::Admin);
}

use super::*;

#[test]
fn user_deserializes_with_optional_fields_missing() {
    let user: User = serde_json::from_str(r#"{"id":"u1"}"#).unwrap();
    assert_eq!(user, User { id: "u1".into(), name: None, email: None });
}

#[test]
fn user_ignores_unknown_fields() {
    let user: User = serde_json::from_str(r#"{"id":"u1","name":"Ada","avatar_url":"x"}"#).unwrap();
    assert_eq!(user.name.as_deref(), Some("Ada"));
}

#[test]
fn user_converts_into_identity() {
    let identity: Identity = User { id: "u1".into(), name: Some("Ada".into()), email: Some("a@b.c".into()) }.into();
    assert_eq!(identity.id, "u1");
    assert_eq!(identity.display_name.as_deref(), Some("Ada"));
    assert_eq!(identity.email.as_deref(), Some("a@b.c"));
}

#[test]
fn credentials_serialize_as_flat_object() {
    let body = serde_json::to_value(Credentials { email: "a@b.c", password: "pw" }).unwrap();
    assert_eq!(body, serde_json::json!({ "email": "a@b.c", "password": "pw" }));
}

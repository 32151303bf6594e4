use super::*;

#[test]
fn document_endpoint_formats_expected_path() {
    assert_eq!(document_endpoint("users", "u123"), "/api/users/u123/profile");
}

#[test]
fn document_status_not_found_is_absent_record() {
    assert_eq!(document_status("users", "u1", 404), Ok(None));
}

#[test]
fn document_status_unauthorized_is_permission_denied() {
    for status in [401, 403] {
        assert_eq!(
            document_status("users", "u1", status),
            Err(StoreError::PermissionDenied { collection: "users".into(), id: "u1".into() })
        );
    }
}

#[test]
fn document_status_server_error_is_unavailable() {
    assert_eq!(
        document_status("users", "u1", 503),
        Err(StoreError::Unavailable("profile request failed: 503".into()))
    );
}

#[test]
fn auth_failed_message_formats_status() {
    assert_eq!(auth_failed_message("logout", 500), "logout failed: 500");
}

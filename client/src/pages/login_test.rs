use super::*;

#[test]
fn validate_credentials_trims_email() {
    assert_eq!(
        validate_credentials("  ada@example.com ", "secret"),
        Ok(("ada@example.com".to_owned(), "secret".to_owned()))
    );
}

#[test]
fn validate_credentials_keeps_password_whitespace() {
    assert_eq!(
        validate_credentials("ada@example.com", " pw "),
        Ok(("ada@example.com".to_owned(), " pw ".to_owned()))
    );
}

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("   ", "secret"), Err("Enter both email and password."));
    assert_eq!(validate_credentials("ada@example.com", ""), Err("Enter both email and password."));
}

#[test]
fn validate_credentials_rejects_email_without_at() {
    assert_eq!(validate_credentials("ada", "secret"), Err("Enter a valid email address."));
}

use super::*;

fn signup() -> SignupForm {
    SignupForm {
        username: " Alice ".into(),
        email: "alice@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
        full_name: "Alice A".into(),
    }
}

#[test]
fn login_requires_identifier_and_password_length() {
    let form = LoginForm { kind: IdentifierKind::Email, identifier: "  ".into(), password: "12345".into() };
    let err = form.validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.errors.len(), 2);
    assert_eq!(err.message_for(Field::Identifier), Some("Please enter a username or email."));
    assert_eq!(err.message_for(Field::Password), Some("Password must be at least 6 characters."));
}

#[test]
fn login_produces_trimmed_credentials() {
    let form = LoginForm { kind: IdentifierKind::Username, identifier: " alice ".into(), password: "secret1".into() };
    let credentials = form.into_credentials().unwrap();
    assert_eq!(credentials.identifier, "alice");
    assert_eq!(credentials.kind, IdentifierKind::Username);
}

#[test]
fn signup_accepts_valid_form() {
    let registration = signup().into_registration().unwrap();
    assert_eq!(registration.username, "Alice");
    assert_eq!(registration.full_name, "Alice A");
}

#[test]
fn signup_reports_each_field() {
    let form = SignupForm {
        username: "a".into(),
        email: "not-an-email".into(),
        password: "123".into(),
        confirm_password: "123".into(),
        full_name: "B".into(),
    };
    let fields: Vec<Field> = form.validate().unwrap_err().errors.iter().map(|e| e.field).collect();
    assert_eq!(
        fields,
        vec![Field::Username, Field::Email, Field::Password, Field::ConfirmPassword, Field::FullName]
    );
}

#[test]
fn signup_password_mismatch() {
    let form = SignupForm { confirm_password: "secret2".into(), ..signup() };
    let err = form.validate().unwrap_err();
    assert_eq!(err.message_for(Field::ConfirmPassword), Some("Passwords do not match."));
    assert_eq!(err.errors.len(), 1);
}

#[test]
fn email_shape() {
    assert!(looks_like_email("a@b.co"));
    assert!(!looks_like_email("a@b"));
    assert!(!looks_like_email("@b.co"));
    assert!(!looks_like_email("a@@b.co"));
    assert!(!looks_like_email("a b@c.io"));
    assert!(!looks_like_email("a@b..co"));
}

use clap::Parser;

use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("vidsync-cli").chain(args.iter().copied()))
}

#[test]
fn login_with_username_selects_username_field() {
    let cli = parse(&["login", "--username", " alice ", "--password", "secret1"]).unwrap();
    let Command::Login(args) = cli.command else { panic!("expected login") };
    let credentials = args.into_form().into_credentials().unwrap();
    assert_eq!(credentials.kind, IdentifierKind::Username);
    assert_eq!(credentials.identifier, "alice");
}

#[test]
fn login_requires_exactly_one_identifier() {
    assert!(parse(&["login", "--password", "secret1"]).is_err());
    assert!(parse(&["login", "--email", "a@b.co", "--username", "alice", "--password", "secret1"]).is_err());
}

#[test]
fn short_password_fails_validation_before_any_request() {
    let cli = parse(&["login", "--email", "a@b.co", "--password", "123"]).unwrap();
    let Command::Login(args) = cli.command else { panic!("expected login") };
    let err = args.into_form().into_credentials().unwrap_err();
    assert_eq!(err.message_for(session::Field::Password), Some("Password must be at least 6 characters."));
}

#[test]
fn validation_error_message_lists_each_field() {
    let form = LoginForm { kind: IdentifierKind::Email, identifier: "  ".to_owned(), password: "123".to_owned() };
    let err = CliError::from(form.into_credentials().unwrap_err());
    assert_eq!(
        err.to_string(),
        "invalid input: identifier: Please enter a username or email.; password: Password must be at least 6 characters."
    );
}

#[test]
fn register_confirm_defaults_to_password() {
    let cli = parse(&[
        "register",
        "--username",
        "alice",
        "--email",
        "alice@example.com",
        "--full-name",
        "Alice Doe",
        "--password",
        "secret1",
    ])
    .unwrap();
    let Command::Register(args) = cli.command else { panic!("expected register") };
    let registration = args.into_form().into_registration().unwrap();
    assert_eq!(registration.username, "alice");
    assert_eq!(registration.full_name, "Alice Doe");
}

#[test]
fn register_mismatched_confirm_is_rejected() {
    let cli = parse(&[
        "register",
        "--username",
        "alice",
        "--email",
        "alice@example.com",
        "--full-name",
        "Alice Doe",
        "--password",
        "secret1",
        "--confirm-password",
        "secret2",
    ])
    .unwrap();
    let Command::Register(args) = cli.command else { panic!("expected register") };
    let err = args.into_form().into_registration().unwrap_err();
    assert_eq!(err.message_for(session::Field::ConfirmPassword), Some("Passwords do not match."));
}

#[test]
fn videos_defaults_to_newest_first() {
    let cli = parse(&["videos"]).unwrap();
    let Command::Videos(args) = cli.command else { panic!("expected videos") };
    assert_eq!(args.sort_by, "createdAt");
    assert_eq!(SortType::from(args.sort_type), SortType::Desc);
    assert!(args.user_id.is_none());
}

#[test]
fn route_report_describes_guard_decision() {
    let anonymous = route_report("/profile", false);
    assert_eq!(anonymous["class"], "protected");
    assert_eq!(anonymous["decision"], "redirect");
    assert_eq!(anonymous["target"], "/login");

    let signed_in = route_report("/login", true);
    assert_eq!(signed_in["class"], "public-only");
    assert_eq!(signed_in["target"], "/explore");

    let asset = route_report("/pkg/app.wasm", false);
    assert_eq!(asset["class"], "asset");
    assert_eq!(asset["decision"], "allow");
    assert!(asset["target"].is_null());
}

use crate::{Credential, PLACEHOLDER_CREDENTIAL, ValidationError};

/// **VALUE**: Verifies that the credential value never leaks through Debug or Display.
///
/// **WHY THIS MATTERS**: Credentials end up inside structs that get logged with `{:?}`.
/// A derived Debug would write the bearer token straight into the log file.
///
/// **BUG THIS CATCHES**: Would catch someone replacing the manual impls with `#[derive(Debug)]`.
#[test]
fn given_credential_when_formatted_then_value_is_redacted() {
    // GIVEN: A credential with a recognizable value
    let credential = Credential::new("sk-very-secret-value");

    // WHEN: Formatting it both ways
    let debug = format!("{:?}", credential);
    let display = format!("{}", credential);

    // THEN: Neither output contains the secret
    assert!(!debug.contains("very-secret"), "Debug leaked: {debug}");
    assert!(!display.contains("very-secret"), "Display leaked: {display}");
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies that serde refuses to serialize a credential.
///
/// **BUG THIS CATCHES**: Would catch a `#[derive(Serialize)]` sneaking in, which would let
/// the credential reach JSON logs or IPC payloads.
#[test]
fn given_credential_when_serialized_then_fails() {
    let credential = Credential::new("sk-abc");

    let result = serde_json::to_string(&credential);

    assert!(result.is_err(), "Credential must not be serializable");
}

/// **VALUE**: Verifies that parsing trims whitespace and rejects blank input.
///
/// **WHY THIS MATTERS**: Keys are pasted from web dashboards and often carry a trailing
/// newline. Saving that newline would make every request fail authentication.
#[test]
fn given_user_input_when_parsed_then_trimmed_or_rejected() {
    let parsed = Credential::parse("  sk-abc\n").expect("non-blank input should parse");
    assert_eq!(parsed.expose(), "sk-abc");

    for blank in ["", "   ", "\n\t"] {
        let result = Credential::parse(blank);
        assert!(
            matches!(result, Err(ValidationError::Empty { .. })),
            "Blank input {blank:?} should be rejected"
        );
    }
}

#[test]
fn given_placeholder_or_blank_when_checked_then_unusable() {
    assert!(Credential::new("").is_unusable());
    assert!(Credential::new("   ").is_unusable());
    assert!(Credential::new(PLACEHOLDER_CREDENTIAL).is_unusable());
    assert!(!Credential::new("sk-abc").is_unusable());
}

#[test]
fn given_credential_when_length_queried_then_matches_raw_value() {
    let credential = Credential::new("sk-abc");

    assert_eq!(credential.len(), 6);
    assert!(!credential.is_empty());
}

// Unit tests for error module
// Tests that core failures become short notices

use crate::error::KorektorError;

use client_core::error::{ClipboardError, CorrectionError, SaveCredentialError};

use common::ValidationError;

/// **VALUE**: Verifies core errors are converted to the short notice, not the debug text.
///
/// **WHY THIS MATTERS**: The shell prints `user_message()` verbatim. Leaking the
/// `[file:line:col]` location or the Rust variant name into the terminal is noise
/// the user cannot act on.
///
/// **BUG THIS CATCHES**: Would catch a From impl that uses `to_string()` instead of
/// the core error's `user_message()`.
#[test]
fn given_core_errors_when_converted_then_user_message_is_notice_only() {
    // GIVEN: One error of each core kind
    let correction = KorektorError::from(CorrectionError::rejected(401, Some("bad key".into())));
    let credential = KorektorError::from(SaveCredentialError::from(ValidationError::empty()));
    let clipboard = KorektorError::from(ClipboardError::unavailable("no display"));

    // THEN: Each maps to its variant with a plain notice
    assert!(matches!(correction, KorektorError::Correction { .. }));
    assert!(correction.user_message().contains("bad key"));

    assert!(matches!(credential, KorektorError::Credential { .. }));
    assert_eq!(credential.user_message(), "Enter an API key");

    assert!(matches!(clipboard, KorektorError::Clipboard { .. }));
    assert_eq!(clipboard.user_message(), "Could not copy to the clipboard");

    for error in [&correction, &credential, &clipboard] {
        assert!(
            !error.user_message().contains(".rs:"),
            "Notice must not carry a source location: {}",
            error.user_message()
        );
    }
}

#[test]
fn given_busy_error_when_displayed_then_includes_location() {
    let err = KorektorError::busy();

    let display = err.to_string();

    assert!(display.starts_with("Busy Error: A correction is already in progress"));
    assert!(display.contains("error.rs:"), "Display should carry location: {display}");
}

/// **BUG THIS CATCHES**: Would catch a missing key being reported as a correction
/// failure, which stops the shell from offering the key prompt.
#[test]
fn given_missing_credential_when_converted_then_credential_variant() {
    let err = KorektorError::from(CorrectionError::missing_credential());

    assert!(matches!(err, KorektorError::Credential { .. }));
    assert_eq!(err.user_message(), "Set your API key first");
}

use crate::error::{CorrectionError, REJECTED_FALLBACK_MESSAGE};

/// **VALUE**: Verifies that a rejection without a usable message falls back to the generic one.
///
/// **BUG THIS CATCHES**: Would catch an empty notice being shown when the endpoint sends
/// `{"error":{"message":""}}` or no body at all.
#[test]
fn given_blank_or_missing_message_when_rejected_then_fallback_message_used() {
    for message in [None, Some(String::new()), Some(String::from("   "))] {
        match CorrectionError::rejected(500, message) {
            CorrectionError::Rejected { message, status_code, .. } => {
                assert_eq!(message, REJECTED_FALLBACK_MESSAGE);
                assert_eq!(status_code.0, 500);
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }
    }
}

/// **VALUE**: Verifies the user-facing notices are short and free of locations.
///
/// **WHY THIS MATTERS**: Notices are shown directly to the user. Source file paths and
/// line numbers belong in the log, not the notice.
#[test]
fn given_each_error_when_user_message_built_then_no_location_leaks() {
    let errors = [
        CorrectionError::empty_input(),
        CorrectionError::missing_credential(),
        CorrectionError::rejected(401, Some("Incorrect API key provided".into())),
        CorrectionError::rejected(429, Some("quota exceeded".into())),
        CorrectionError::rejected(400, Some("bad request".into())),
        CorrectionError::malformed("missing field `choices`"),
    ];

    for error in &errors {
        let notice = error.user_message();
        assert!(!notice.is_empty());
        assert!(!notice.contains(".rs:"), "Notice leaked a location: {notice}");
    }

    assert!(errors[2].user_message().contains("Incorrect API key provided"));
    assert!(errors[2].user_message().starts_with("API key rejected"));
    assert!(errors[3].user_message().starts_with("Rate limit"));
    assert_eq!(errors[4].user_message(), "bad request");
}

#[test]
fn given_errors_when_categorized_then_preconditions_are_flagged() {
    assert!(CorrectionError::empty_input().is_precondition());
    assert!(CorrectionError::missing_credential().is_precondition());
    assert!(!CorrectionError::malformed("x").is_precondition());

    assert_eq!(CorrectionError::rejected(503, None).error_category(), "server_error");
    assert_eq!(CorrectionError::rejected(401, None).status_code(), Some(401));
    assert_eq!(CorrectionError::empty_input().status_code(), None);
}

#[test]
fn given_rejected_error_when_formatted_then_includes_status_and_location() {
    let error = CorrectionError::rejected(401, Some("bad key".into()));

    let formatted = error.to_string();

    assert!(formatted.contains("HTTP 401"));
    assert!(formatted.contains("bad key"));
    assert!(formatted.contains("correction_error.rs"));
}

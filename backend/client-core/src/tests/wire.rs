// Unit tests for the request/response JSON shapes.

use crate::config::CorrectionSettings;
use crate::correction::wire::{ApiErrorBody, ChatCompletionResponse};
use crate::correction::{CORRECTION_SYSTEM_PROMPT, CorrectionService};

use serde_json::{Value, json};

/// **VALUE**: Verifies the exact request body shape: model, two messages, temperature, max_tokens.
///
/// **WHY THIS MATTERS**: The endpoint rejects unknown roles and misspelled fields. A body
/// that drifts from this shape fails every single correction.
///
/// **BUG THIS CATCHES**: Would catch renamed fields, a third message sneaking in, the
/// roles serializing as `"System"`, or the user text being trimmed before sending.
#[test]
fn given_input_text_when_building_request_then_body_has_system_and_verbatim_user_message() {
    // GIVEN: A service with default settings and input with surrounding whitespace
    let service = CorrectionService::new(CorrectionSettings::default()).expect("valid settings");
    let text = "  ala ma kota \n";

    // WHEN: Serializing the request body
    let body: Value = serde_json::to_value(service.build_request(text)).expect("serializable");

    // THEN: Body matches the wire contract
    assert_eq!(body["model"], json!("gpt-4o-mini"));
    assert_eq!(body["max_tokens"], json!(2000));
    assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);

    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 2, "Exactly two messages");
    assert_eq!(messages[0]["role"], json!("system"));
    assert_eq!(messages[0]["content"], json!(CORRECTION_SYSTEM_PROMPT));
    assert_eq!(messages[1]["role"], json!("user"));
    assert_eq!(messages[1]["content"], json!(text), "User text must be verbatim");
}

#[test]
fn given_completion_json_when_extracting_first_content_then_returns_first_choice() {
    let response: ChatCompletionResponse = serde_json::from_value(json!({
        "id": "chatcmpl-1",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "first"}},
            {"index": 1, "message": {"role": "assistant", "content": "second"}}
        ],
        "usage": {"total_tokens": 10}
    }))
    .expect("valid response");

    assert_eq!(response.first_content().as_deref(), Some("first"));
}

#[test]
fn given_choice_without_content_when_extracting_then_none() {
    let null_content: ChatCompletionResponse = serde_json::from_value(json!({
        "choices": [{"message": {"role": "assistant", "content": null}}]
    }))
    .expect("valid response");
    let no_choices: ChatCompletionResponse =
        serde_json::from_value(json!({"choices": []})).expect("valid response");

    assert!(null_content.first_content().is_none());
    assert!(no_choices.first_content().is_none());
}

/// **VALUE**: Verifies error-message extraction from the many shapes a failure body can take.
///
/// **BUG THIS CATCHES**: Would catch a panic or a bogus message when the body is HTML
/// from a proxy, empty, or uses an unexpected `error` type.
#[test]
fn given_error_bodies_when_extracting_message_then_only_structured_message_is_used() {
    assert_eq!(
        ApiErrorBody::message_from(r#"{"error":{"message":"bad key","type":"invalid_request_error"}}"#)
            .as_deref(),
        Some("bad key")
    );
    assert_eq!(ApiErrorBody::message_from(r#"{"error":{}}"#), None);
    assert_eq!(ApiErrorBody::message_from(r#"{"error":"oops"}"#), None);
    assert_eq!(ApiErrorBody::message_from("<html>502 Bad Gateway</html>"), None);
    assert_eq!(ApiErrorBody::message_from(""), None);
}

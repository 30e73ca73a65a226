use super::helpers::{COMPLETIONS_PATH, TEST_CREDENTIAL, completion_body, credential, start_endpoint};

use client_core::correction::CORRECTION_SYSTEM_PROMPT;
use client_core::error::{CorrectionError, REJECTED_FALLBACK_MESSAGE};

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: Verifies the success path end to end: headers, body, and verbatim result.
///
/// **WHY THIS MATTERS**: This is the one thing the application exists to do. The
/// corrected text must come back exactly as the endpoint produced it.
///
/// **BUG THIS CATCHES**: Would catch:
/// - Missing or malformed `Authorization: Bearer` header
/// - Wrong content type, model, or max_tokens in the body
/// - Trimming or reformatting of the returned content
#[tokio::test]
async fn given_success_response_when_correcting_then_first_choice_content_returned_verbatim() {
    // GIVEN: An endpoint that expects a well-formed request exactly once
    let (server, service) = start_endpoint().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", format!("Bearer {TEST_CREDENTIAL}").as_str()))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini", "max_tokens": 2000})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Poprawiony tekst.")))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Correcting text
    let result = service.correct("Poprawiony tekts.", &credential()).await;

    // THEN: Content passes through unchanged
    assert_eq!(result.expect("correction succeeds"), "Poprawiony tekst.");
}

#[tokio::test]
async fn given_content_with_surrounding_whitespace_when_correcting_then_not_trimmed() {
    let (server, service) = start_endpoint().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  Linia 1\nLinia 2\n")))
        .mount(&server)
        .await;

    let result = service.correct("linia 1\nlinia 2", &credential()).await;

    assert_eq!(result.expect("correction succeeds"), "  Linia 1\nLinia 2\n");
}

/// **VALUE**: Verifies the user text is sent verbatim as the second of exactly two messages.
///
/// **WHY THIS MATTERS**: Trimming or normalizing the input changes what the model sees;
/// leading indentation or trailing newlines are part of the user's text.
#[tokio::test]
async fn given_text_with_whitespace_when_correcting_then_user_message_is_verbatim() {
    let (server, service) = start_endpoint().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .mount(&server)
        .await;
    let text = "\t Ala ma  kota \n";

    service.correct(text, &credential()).await.expect("correction succeeds");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "Exactly one request per call");

    let body: Value = requests[0].body_json().expect("JSON body");
    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], json!({"role": "system", "content": CORRECTION_SYSTEM_PROMPT}));
    assert_eq!(messages[1], json!({"role": "user", "content": text}));
    let temperature = body["temperature"].as_f64().expect("numeric temperature");
    assert!(temperature > 0.0 && temperature < 0.5, "Low, non-zero temperature");
}

/// **VALUE**: Verifies the endpoint's own error message reaches the user.
///
/// **WHY THIS MATTERS**: "Incorrect API key provided" tells the user exactly what to fix.
/// A generic "request failed" leaves them guessing.
#[tokio::test]
async fn given_error_status_with_message_when_correcting_then_rejected_with_that_message() {
    let (server, service) = start_endpoint().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "bad key"}})))
        .expect(1)
        .mount(&server)
        .await;

    let result = service.correct("tekst", &credential()).await;

    match result {
        Err(CorrectionError::Rejected { message, status_code, .. }) => {
            assert_eq!(message, "bad key");
            assert_eq!(status_code.0, 401);
        }
        other => panic!("Expected Rejected, got {other:?}"),
    }
}

/// **VALUE**: Verifies non-JSON error bodies produce the generic rejection, never a fault.
///
/// **BUG THIS CATCHES**: Would catch `response.json()` being called on error bodies and the
/// resulting parse failure surfacing as MalformedResponse or a panic.
#[tokio::test]
async fn given_error_status_without_parseable_body_when_correcting_then_rejected_with_fallback() {
    for (status, body) in [
        (500, "<html><body>Internal Server Error</body></html>"),
        (502, ""),
        (429, r#"{"error": "slow down"}"#),
    ] {
        let (server, service) = start_endpoint().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let result = service.correct("tekst", &credential()).await;

        match result {
            Err(CorrectionError::Rejected { message, status_code, .. }) => {
                assert_eq!(message, REJECTED_FALLBACK_MESSAGE, "status {status}");
                assert_eq!(status_code.0, status);
            }
            other => panic!("Expected Rejected for {status}, got {other:?}"),
        }
    }
}

/// **VALUE**: Verifies that 2xx bodies of the wrong shape are classified as malformed.
///
/// **WHY THIS MATTERS**: An empty success would show the user a blank result and make
/// them think their text was erased. Absent content is reported instead.
#[tokio::test]
async fn given_success_status_with_unexpected_body_when_correcting_then_malformed_response() {
    for body in [
        String::from("definitely not json"),
        json!({"object": "chat.completion"}).to_string(),
        json!({"choices": []}).to_string(),
        json!({"choices": [{"index": 0}]}).to_string(),
        json!({"choices": [{"message": {"role": "assistant", "content": null}}]}).to_string(),
    ] {
        let (server, service) = start_endpoint().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
            .mount(&server)
            .await;

        let result = service.correct("tekst", &credential()).await;

        assert!(
            matches!(result, Err(CorrectionError::MalformedResponse { .. })),
            "Expected MalformedResponse for {body}, got {result:?}"
        );
    }
}

/// **VALUE**: Verifies failures are terminal: one request, no internal retry.
///
/// **BUG THIS CATCHES**: Would catch a retry loop being added around `send()`, which would
/// multiply cost and latency on a misconfigured key.
#[tokio::test]
async fn given_server_error_when_correcting_then_exactly_one_request_sent() {
    let (server, service) = start_endpoint().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = service.correct("tekst", &credential()).await;

    assert!(matches!(result, Err(CorrectionError::Rejected { .. })));
}

use super::helpers::{credential, start_endpoint};

use client_core::error::CorrectionError;

use common::{Credential, PLACEHOLDER_CREDENTIAL};

use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: Verifies that blank input is rejected before any network activity.
///
/// **WHY THIS MATTERS**: Every request costs the user money. Sending an empty prompt
/// would bill them for nothing and return an unpredictable answer.
///
/// **BUG THIS CATCHES**: Would catch the emptiness check moving after `send()`, or being
/// dropped entirely. The `.expect(0)` mock fails the test on ANY request.
#[tokio::test]
async fn given_blank_text_when_correcting_then_empty_input_without_request() {
    // GIVEN: An endpoint that must never be called
    let (server, service) = start_endpoint().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for text in ["", "   ", "\n\t  \n"] {
        // WHEN: Correcting blank input with a valid credential
        let result = service.correct(text, &credential()).await;

        // THEN: EmptyInput, detected locally
        assert!(
            matches!(result, Err(CorrectionError::EmptyInput { .. })),
            "Expected EmptyInput for {text:?}, got {result:?}"
        );
    }
    // Server verifies expect(0) on drop
}

/// **VALUE**: Verifies that a missing credential is rejected before any network activity.
///
/// **BUG THIS CATCHES**: Would catch sending `Authorization: Bearer ` (empty token),
/// which the endpoint answers with a confusing 401.
#[tokio::test]
async fn given_blank_credential_when_correcting_then_missing_credential_without_request() {
    let (server, service) = start_endpoint().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for value in ["", "   ", PLACEHOLDER_CREDENTIAL] {
        let result = service
            .correct("Ala ma kota", &Credential::new(value))
            .await;

        assert!(
            matches!(result, Err(CorrectionError::MissingCredential { .. })),
            "Expected MissingCredential for {value:?}, got {result:?}"
        );
    }
}

#[tokio::test]
async fn given_blank_text_and_blank_credential_when_correcting_then_empty_input_reported_first() {
    let (_server, service) = start_endpoint().await;

    let result = service.correct("", &Credential::new("")).await;

    assert!(matches!(result, Err(CorrectionError::EmptyInput { .. })));
    assert!(result.unwrap_err().is_precondition());
}

use super::helpers::{credential, settings_for};

use client_core::config::CorrectionSettings;
use client_core::correction::CorrectionService;
use client_core::error::CorrectionError;

use std::time::Duration;

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies that an unreachable endpoint is reported as a network failure.
///
/// **WHY THIS MATTERS**: Offline users must get "could not reach the service", not a
/// misleading rejection or a hang.
#[tokio::test]
async fn given_unreachable_endpoint_when_correcting_then_network_error() {
    // GIVEN: An endpoint on a port nothing listens on
    let settings = CorrectionSettings::with_endpoint("http://127.0.0.1:9/v1/chat/completions")
        .expect("valid URL");
    let service = CorrectionService::new(settings).expect("valid settings");

    // WHEN: Correcting
    let result = service.correct("tekst", &credential()).await;

    // THEN: Network error, not Rejected
    match result {
        Err(error @ CorrectionError::Network { .. }) => {
            assert!(!error.is_precondition());
            assert!(error.status_code().is_none());
        }
        other => panic!("Expected Network, got {other:?}"),
    }
}

/// **VALUE**: Verifies that a transport timeout is flagged as such.
///
/// **BUG THIS CATCHES**: Would catch the request timeout not being applied to the client,
/// leaving the shell stuck in its busy state on a hung endpoint.
#[tokio::test]
async fn given_slow_endpoint_when_request_timeout_elapses_then_network_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    let settings = CorrectionSettings {
        request_timeout: Duration::from_millis(200),
        ..settings_for(&server)
    };
    let service = CorrectionService::new(settings).expect("valid settings");

    let result = service.correct("tekst", &credential()).await;

    match result {
        Err(CorrectionError::Network { is_timeout, .. }) => assert!(is_timeout),
        other => panic!("Expected Network timeout, got {other:?}"),
    }
}

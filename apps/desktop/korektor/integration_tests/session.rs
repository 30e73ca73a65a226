use crate::helpers::{
    COMPLETIONS_PATH, RecordingClipboard, TEST_CREDENTIAL, completion_body, service_for,
    session_for,
};

use korektor::commands::clipboard::copy_result;
use korektor::commands::correction::{set_input, submit_correction};
use korektor::commands::credential::{forget_credential, has_credential, save_credential};
use korektor::commands::deep_link::{DeepLinkListener, apply_launch_url, open_url};
use korektor::error::KorektorError;
use korektor::session::Session;

use client_core::clipboard::CopyOutcome;
use client_core::credential_store::{CredentialStore, InMemoryCredentialStore};

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wait until the input equals `expected` (the deep-link listener runs on its own task).
async fn wait_for_input(session: &Session, expected: &str) {
    for _ in 0..100 {
        if session.state().input().await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "input never became {expected:?}, last: {:?}",
        session.state().input().await
    );
}

/// **VALUE**: End-to-end submit: stored credential + current input in, result stored.
///
/// **WHY THIS MATTERS**: This is the one thing the app does. It crosses the store,
/// the service, and the state actor.
#[tokio::test]
async fn given_input_and_credential_when_submitting_then_result_stored_and_slot_released() {
    // GIVEN: An endpoint that corrects the text
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", format!("Bearer {TEST_CREDENTIAL}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Ala ma kota.")))
        .expect(1)
        .mount(&server)
        .await;
    let (session, _, _) = session_for(&server, Some(TEST_CREDENTIAL));
    set_input(&session, "ala ma kota").await.unwrap();

    // WHEN: Submitting
    let result = submit_correction(&session).await;

    // THEN: The corrected text is returned and stored
    assert_eq!(result.unwrap(), "Ala ma kota.");
    let view = session.state().view().await;
    assert_eq!(view.result.as_deref(), Some("Ala ma kota."));
    assert_eq!(view.input, "ala ma kota", "Input stays for editing");
    assert!(view.notice.is_none());
    assert!(!session.state().is_busy());
}

/// **VALUE**: Verifies every failure path clears the progress indicator and leaves a notice.
///
/// **BUG THIS CATCHES**: Would catch an early `?` return that skips resetting the
/// in-flight flag, leaving the shell stuck in "loading" forever.
#[tokio::test]
async fn given_failing_paths_when_submitting_then_notice_set_and_not_busy() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "bad key"}})))
        .mount(&server)
        .await;

    // Missing credential: no request
    let (no_key, _, _) = session_for(&server, None);
    set_input(&no_key, "tekst").await.unwrap();
    let err = submit_correction(&no_key).await.unwrap_err();
    assert_eq!(err.user_message(), "Set your API key first");
    assert!(!no_key.state().is_busy());

    // Empty input: no request
    let (empty, _, _) = session_for(&server, Some(TEST_CREDENTIAL));
    set_input(&empty, "   ").await.unwrap();
    let err = submit_correction(&empty).await.unwrap_err();
    assert_eq!(err.user_message(), "Enter some text to correct");
    assert!(!empty.state().is_busy());

    // Rejected
    let (rejected, _, _) = session_for(&server, Some("sk-wrong"));
    set_input(&rejected, "tekst").await.unwrap();
    let err = submit_correction(&rejected).await.unwrap_err();
    assert!(matches!(err, KorektorError::Correction { .. }));
    assert!(err.user_message().contains("bad key"));
    let view = rejected.state().view().await;
    assert_eq!(view.notice.as_deref(), Some(err.user_message()));
    assert!(view.result.is_none());
    assert!(!rejected.state().is_busy());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "Only the rejected submission reached the network");
}

/// **VALUE**: Verifies a second submit while one is in flight is refused, not queued.
///
/// **WHY THIS MATTERS**: At most one correction may be outstanding. Queueing would
/// send a second billed request the user never asked for.
#[tokio::test]
async fn given_correction_in_flight_when_submitting_again_then_busy_and_single_request() {
    // GIVEN: A slow endpoint
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Gotowe."))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (session, _, _) = session_for(&server, Some(TEST_CREDENTIAL));
    set_input(&session, "gotowe").await.unwrap();

    // WHEN: Two submissions overlap
    let first = {
        let session = session.clone();
        tokio::spawn(async move { submit_correction(&session).await })
    };
    while !session.state().is_busy() {
        tokio::task::yield_now().await;
    }
    let second = submit_correction(&session).await;

    // THEN: The second is refused and the first completes
    assert!(matches!(second, Err(KorektorError::Busy { .. })));
    assert_eq!(first.await.unwrap().unwrap(), "Gotowe.");
    assert!(!session.state().is_busy());
}

/// **VALUE**: Verifies a deep link arriving mid-request replaces the input without
/// touching the request already sent.
///
/// **BUG THIS CATCHES**: Would catch the service reading input from shared state
/// after submission instead of holding its own copy.
#[tokio::test]
async fn given_deep_link_during_request_when_request_finishes_then_sent_text_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Pierwszy."))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    let (session, _, _) = session_for(&server, Some(TEST_CREDENTIAL));
    let _listener = DeepLinkListener::spawn(&session);
    set_input(&session, "pierwszy").await.unwrap();

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { submit_correction(&session).await })
    };
    while !session.state().is_busy() {
        tokio::task::yield_now().await;
    }
    open_url(&session, "korektor://app?text=drugi");
    wait_for_input(&session, "drugi").await;

    assert_eq!(pending.await.unwrap().unwrap(), "Pierwszy.");
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["messages"][1]["content"], "pierwszy");
    assert_eq!(session.state().input().await, "drugi");
}

#[tokio::test]
async fn given_launch_url_when_applied_then_input_prefilled_only_when_text_present() {
    let server = MockServer::start().await;
    let (session, _, _) = session_for(&server, Some(TEST_CREDENTIAL));

    let applied = apply_launch_url(&session, "korektor://app?text=Hello%20world")
        .await
        .unwrap();
    assert!(applied);
    assert_eq!(session.state().input().await, "Hello world");

    let applied = apply_launch_url(&session, "korektor://app?lang=pl").await.unwrap();
    assert!(!applied);
    assert_eq!(session.state().input().await, "Hello world", "Absent text keeps input");
}

/// **VALUE**: Verifies the listener subscription is released when the listener is dropped.
///
/// **WHY THIS MATTERS**: Re-initializing the shell must not leave an old listener
/// writing into state.
#[tokio::test]
async fn given_listener_when_dropped_then_hub_has_no_subscribers() {
    let server = MockServer::start().await;
    let (session, _, _) = session_for(&server, Some(TEST_CREDENTIAL));

    let listener = DeepLinkListener::spawn(&session);
    assert_eq!(session.hub().subscriber_count(), 1);

    drop(listener);
    for _ in 0..100 {
        if session.hub().subscriber_count() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(session.hub().subscriber_count(), 0);
    assert_eq!(open_url(&session, "korektor://app?text=late"), 0);
}

/// **VALUE**: Verifies copy uses only the last successful result.
///
/// **BUG THIS CATCHES**: Would catch copying the input (or a stale result after a
/// failed resubmission) instead of the current correction.
#[tokio::test]
async fn given_results_when_copying_then_only_successful_result_reaches_clipboard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Gotowe.")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (session, _, clipboard) = session_for(&server, Some(TEST_CREDENTIAL));

    // Nothing yet: skipped without touching the clipboard
    assert_eq!(copy_result(&session).await.unwrap(), CopyOutcome::Skipped);
    assert!(clipboard.writes().is_empty());

    set_input(&session, "gotowe").await.unwrap();
    submit_correction(&session).await.unwrap();
    assert_eq!(copy_result(&session).await.unwrap(), CopyOutcome::Copied);
    assert_eq!(clipboard.writes(), vec!["Gotowe.".to_string()]);

    // Failed resubmission discards the old result
    submit_correction(&session).await.unwrap_err();
    assert_eq!(copy_result(&session).await.unwrap(), CopyOutcome::Skipped);
    assert_eq!(clipboard.writes().len(), 1);
}

#[tokio::test]
async fn given_failing_clipboard_when_copying_then_clipboard_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Gotowe.")))
        .mount(&server)
        .await;
    let store = Arc::new(InMemoryCredentialStore::with_credential(TEST_CREDENTIAL));
    let clipboard = Arc::new(RecordingClipboard::failing());
    let session = Session::new(store, service_for(&server), clipboard.clone());
    set_input(&session, "gotowe").await.unwrap();
    submit_correction(&session).await.unwrap();

    let result = copy_result(&session).await;

    assert!(matches!(result, Err(KorektorError::Clipboard { .. })));
    assert_eq!(clipboard.writes().len(), 1, "Attempted once, never retried");
}

#[tokio::test]
async fn given_credential_commands_when_used_then_store_updated() {
    let server = MockServer::start().await;
    let (session, store, _) = session_for(&server, None);
    assert!(!has_credential(&session).unwrap());

    let err = save_credential(&session, "   ").unwrap_err();
    assert!(matches!(err, KorektorError::Credential { .. }));
    assert!(!has_credential(&session).unwrap());

    save_credential(&session, " sk-abc ").unwrap();
    assert_eq!(store.load().unwrap().unwrap().expose(), "sk-abc");

    forget_credential(&session).unwrap();
    assert!(!has_credential(&session).unwrap());
}

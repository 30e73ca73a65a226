use crate::helpers::{COMPLETIONS_PATH, TEST_CREDENTIAL, completion_body, session_for};

use korektor::session::Session;
use korektor::shell::{HELP_TEXT, run};

use client_core::credential_store::CredentialStore;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Drive the shell with a scripted stdin and return everything it printed.
async fn run_script(session: &Session, script: &str) -> String {
    let mut out = Vec::new();
    run(session, script.as_bytes(), &mut out)
        .await
        .expect("shell runs to completion");
    String::from_utf8(out).expect("shell output is UTF-8")
}

/// **VALUE**: Verifies the startup flow asks for a key when none is stored.
///
/// **WHY THIS MATTERS**: Without a key every submission fails; the shell must
/// collect it before anything else, and reject a blank one.
#[tokio::test]
async fn given_no_credential_when_shell_starts_then_prompts_until_saved() {
    let server = MockServer::start().await;
    let (session, store, _) = session_for(&server, None);

    let output = run_script(&session, "\n   \nsk-abc\n:quit\n").await;

    assert_eq!(output.matches("Enter your OpenAI API key: ").count(), 3);
    assert_eq!(output.matches("! Enter an API key").count(), 2);
    assert!(output.contains("API key saved."));
    assert_eq!(store.load().unwrap().unwrap().expose(), "sk-abc");
}

#[tokio::test]
async fn given_no_credential_when_input_ends_at_prompt_then_shell_exits_cleanly() {
    let server = MockServer::start().await;
    let (session, _, _) = session_for(&server, None);

    let output = run_script(&session, "").await;

    assert!(output.contains("Enter your OpenAI API key: "));
    assert!(!output.contains("Korektor ready"));
}

/// **VALUE**: Verifies a typed line is corrected, printed and copyable.
#[tokio::test]
async fn given_plain_line_when_entered_then_correction_printed_and_copied() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Ala ma kota.")))
        .expect(1)
        .mount(&server)
        .await;
    let (session, _, clipboard) = session_for(&server, Some(TEST_CREDENTIAL));

    let output = run_script(&session, "ala ma kota\n:copy\n:quit\n").await;

    assert!(output.contains("Ala ma kota.\n"));
    assert!(output.contains("Copied to clipboard."));
    assert_eq!(clipboard.writes(), vec!["Ala ma kota.".to_string()]);
}

/// **VALUE**: Verifies `:paste` sends the lines joined, untrimmed, as one request.
#[tokio::test]
async fn given_paste_block_when_terminated_then_submitted_as_one_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .expect(1)
        .mount(&server)
        .await;
    let (session, _, _) = session_for(&server, Some(TEST_CREDENTIAL));

    run_script(&session, ":paste\n  linia pierwsza\nlinia druga\n.\n:quit\n").await;

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["messages"][1]["content"], "  linia pierwsza\nlinia druga");
}

/// **VALUE**: Verifies failures are printed as notices and the shell keeps going.
///
/// **BUG THIS CATCHES**: Would catch a command error propagating out of `run`,
/// which would end the session on the first network hiccup.
#[tokio::test]
async fn given_failing_commands_when_run_then_notices_printed_and_shell_continues() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("{\"error\":\"slow down\"}"))
        .mount(&server)
        .await;
    let (session, _, _) = session_for(&server, Some(TEST_CREDENTIAL));

    let output = run_script(
        &session,
        ":correct\ntekst\n:copy\n:key   \n:bogus\n:help\n:quit\n",
    )
    .await;

    assert!(output.contains("! Enter some text to correct"));
    assert!(output.contains("! Rate limit reached"));
    assert!(output.contains("Nothing to copy yet."));
    assert!(output.contains("! Enter an API key"));
    assert!(output.contains("! Unknown command :bogus (try :help)"));
    assert!(output.contains(HELP_TEXT));
    assert!(!session.state().is_busy());
}

#[tokio::test]
async fn given_forget_key_and_clear_when_run_then_state_reset() {
    let server = MockServer::start().await;
    let (session, store, _) = session_for(&server, Some(TEST_CREDENTIAL));

    let output = run_script(&session, ":forget-key\n:clear\n:show\n").await;

    assert!(output.contains("API key removed."));
    assert!(output.contains("Cleared."));
    assert!(output.contains("Input:\n\n"));
    assert!(store.load().unwrap().is_none());
}

/// **VALUE**: Verifies a submit without a key reopens the key prompt.
///
/// **WHY THIS MATTERS**: After `:forget-key` every submission fails. Printing the
/// notice alone leaves the user to discover `:key`; asking right away lets them
/// fix it and resubmit with `:correct`.
#[tokio::test]
async fn given_key_forgotten_when_submitting_then_prompted_and_resubmit_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Ala ma kota.")))
        .expect(1)
        .mount(&server)
        .await;
    let (session, store, _) = session_for(&server, Some(TEST_CREDENTIAL));

    let output = run_script(
        &session,
        ":forget-key\nala ma kota\nsk-new\n:correct\n:quit\n",
    )
    .await;

    assert!(output.contains("! Set your API key first"));
    assert_eq!(output.matches("Enter your OpenAI API key: ").count(), 1);
    assert!(output.contains("Ala ma kota.\n"));
    assert_eq!(store.load().unwrap().unwrap().expose(), "sk-new");
}

/// **VALUE**: Verifies text starting with `:` can still be corrected through `:paste`.
///
/// **BUG THIS CATCHES**: Would catch paste mode parsing its lines as commands.
#[tokio::test]
async fn given_text_starting_with_colon_when_pasted_then_submitted_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(":) Super!")))
        .expect(1)
        .mount(&server)
        .await;
    let (session, _, _) = session_for(&server, Some(TEST_CREDENTIAL));

    let output = run_script(&session, ":paste\n:) super\n.\n:quit\n").await;

    assert!(HELP_TEXT.contains("starts with ':'"));
    assert!(!output.contains("Unknown command"));
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["messages"][1]["content"], ":) super");
}

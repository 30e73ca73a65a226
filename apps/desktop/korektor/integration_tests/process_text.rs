use crate::helpers::{TEST_CREDENTIAL, completion_body, session_for};

use korektor::commands::process_text::{process_text, write_output};
use korektor::error::KorektorError;

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::AsyncWrite;
use wiremock::matchers::{any, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies a selection handed over by another app comes back corrected.
#[tokio::test]
async fn given_selection_when_processed_then_corrected_text_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Poprawiony tekst.")))
        .expect(1)
        .mount(&server)
        .await;
    let (session, _, clipboard) = session_for(&server, Some(TEST_CREDENTIAL));

    let output = process_text(&session, "poprawiony tekst").await;

    assert_eq!(output, "Poprawiony tekst.");
    assert!(clipboard.writes().is_empty(), "Process-text never uses the clipboard");
}

/// **VALUE**: Verifies every failure hands back the original selection unchanged.
///
/// **WHY THIS MATTERS**: The calling app replaces the user's selection with whatever
/// we return. Returning an error string (or nothing) would destroy their text.
///
/// **BUG THIS CATCHES**: Would catch an error path that returns an empty string or
/// the notice instead of the selection.
#[tokio::test]
async fn given_any_failure_when_processing_then_original_selection_returned() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
        .mount(&server)
        .await;

    let (rejected, _, _) = session_for(&server, Some(TEST_CREDENTIAL));
    assert_eq!(process_text(&rejected, "Zażółć gęślą jaźń\n").await, "Zażółć gęślą jaźń\n");

    let (no_key, _, _) = session_for(&server, None);
    assert_eq!(process_text(&no_key, "bez klucza").await, "bez klucza");

    assert_eq!(process_text(&rejected, "  ").await, "  ");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "Only the first case reached the network");
}

/// Output pipe that accepts bytes but cannot flush them.
#[derive(Default)]
struct UnflushablePipe {
    written: Vec<u8>,
}

impl AsyncWrite for UnflushablePipe {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.written.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// **VALUE**: Verifies a failed flush of the processed text is reported.
///
/// **WHY THIS MATTERS**: The calling app replaces the selection with what it reads.
/// Reporting success after a failed flush could hand it a truncated selection with
/// no signal that anything went wrong.
#[tokio::test]
async fn given_output_that_cannot_flush_when_writing_then_error_returned() {
    let mut pipe = UnflushablePipe::default();

    let result = write_output(&mut pipe, "Poprawiony tekst.").await;

    assert!(matches!(result, Err(KorektorError::Korektor { .. })), "got {result:?}");
    assert!(result.unwrap_err().user_message().starts_with("Failed to flush output"));
}

#[tokio::test]
async fn given_working_output_when_writing_then_text_written_verbatim() {
    let mut out = Vec::new();

    write_output(&mut out, "Zażółć gęślą jaźń\n").await.unwrap();

    assert_eq!(out, "Zażółć gęślą jaźń\n".as_bytes());
}

// Unit tests for the copy policy, using a recording backend.

use crate::clipboard::{ClipboardSink, CopyOutcome, copy};
use crate::error::ClipboardError;

use std::sync::Mutex;

#[derive(Default)]
struct RecordingSink {
    calls: Mutex<Vec<String>>,
    fail: bool,
}

impl ClipboardSink for RecordingSink {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(ClipboardError::write("backend refused"));
        }
        Ok(())
    }
}

/// **VALUE**: Verifies empty text never reaches the clipboard backend.
///
/// **WHY THIS MATTERS**: Copying an empty result would wipe whatever the user had on
/// the clipboard before.
#[test]
fn given_empty_text_when_copying_then_skipped_without_backend_call() {
    let sink = RecordingSink::default();

    let outcome = copy(&sink, "").expect("skip is not an error");

    assert_eq!(outcome, CopyOutcome::Skipped);
    assert!(sink.calls.lock().unwrap().is_empty(), "Backend must not be called");
}

#[test]
fn given_text_when_copying_then_backend_receives_it_once() {
    let sink = RecordingSink::default();

    let outcome = copy(&sink, "Poprawiony tekst.").expect("copy succeeds");

    assert_eq!(outcome, CopyOutcome::Copied);
    assert_eq!(*sink.calls.lock().unwrap(), vec!["Poprawiony tekst.".to_string()]);
}

/// **VALUE**: Verifies backend failures are reported, not swallowed or retried.
///
/// **BUG THIS CATCHES**: Would catch a `let _ =` around the backend call (silent failure)
/// or a retry loop calling the backend more than once.
#[test]
fn given_failing_backend_when_copying_then_error_returned_after_single_attempt() {
    let sink = RecordingSink {
        fail: true,
        ..RecordingSink::default()
    };

    let result = copy(&sink, "text");

    assert!(matches!(result, Err(ClipboardError::Write { .. })));
    assert_eq!(sink.calls.lock().unwrap().len(), 1, "No retry");
}

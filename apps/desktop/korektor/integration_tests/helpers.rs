use korektor::session::Session;

use client_core::clipboard::ClipboardSink;
use client_core::config::CorrectionSettings;
use client_core::correction::CorrectionService;
use client_core::credential_store::InMemoryCredentialStore;
use client_core::error::ClipboardError;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_CREDENTIAL: &str = "sk-test-credential";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Clipboard double that records writes, or fails every write.
#[derive(Default)]
pub struct RecordingClipboard {
    pub writes: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingClipboard {
    pub fn failing() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(ClipboardError::unavailable("test clipboard is offline"));
        }
        Ok(())
    }
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

pub fn service_for(server: &MockServer) -> CorrectionService {
    let mut settings = CorrectionSettings::with_endpoint(&format!("{}{COMPLETIONS_PATH}", server.uri()))
        .expect("mock endpoint is a valid URL");
    settings.request_timeout = Duration::from_secs(5);
    CorrectionService::new(settings).expect("settings are valid")
}

/// A session against `server` with an in-memory store and a recording clipboard.
pub fn session_for(
    server: &MockServer,
    credential: Option<&str>,
) -> (Session, Arc<InMemoryCredentialStore>, Arc<RecordingClipboard>) {
    let store = Arc::new(match credential {
        Some(value) => InMemoryCredentialStore::with_credential(value),
        None => InMemoryCredentialStore::new(),
    });
    let clipboard = Arc::new(RecordingClipboard::default());
    let session = Session::new(store.clone(), service_for(server), clipboard.clone());
    (session, store, clipboard)
}

//! Test helpers for correction service integration tests.
//!
//! Every test gets its own wiremock server standing in for the completion endpoint.

use client_core::config::CorrectionSettings;
use client_core::correction::CorrectionService;

use common::Credential;

use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_CREDENTIAL: &str = "sk-test-0123456789";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub fn credential() -> Credential {
    Credential::new(TEST_CREDENTIAL)
}

pub fn settings_for(server: &MockServer) -> CorrectionSettings {
    CorrectionSettings::with_endpoint(&format!("{}{}", server.uri(), COMPLETIONS_PATH))
        .expect("mock server URI is valid")
}

/// Start a mock endpoint and a service pointed at it.
pub async fn start_endpoint() -> (MockServer, CorrectionService) {
    let server = MockServer::start().await;
    let service = CorrectionService::new(settings_for(&server)).expect("valid settings");
    (server, service)
}

/// A chat-completion success body whose first choice carries `content`.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49}
    })
}

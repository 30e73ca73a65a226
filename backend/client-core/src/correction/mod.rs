//! The correction request/response lifecycle.
//!
//! One call to [`CorrectionService::correct`] sends at most one HTTP request:
//! preconditions are checked first, then the request is awaited in full. No
//! retries, no streaming. The credential travels only in the `Authorization`
//! header of that request.

pub mod prompt;
pub mod wire;

pub use prompt::CORRECTION_SYSTEM_PROMPT;

use crate::config::CorrectionSettings;
use crate::error::config::ConfigError;
use crate::error::correction::CorrectionError;

use common::{Credential, ErrorLocation};

use wire::{ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Role};

use std::panic::Location;
use std::time::Instant;

use log::{debug, info, warn};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone)]
pub struct CorrectionService {
    client: Client,
    settings: CorrectionSettings,
}

impl CorrectionService {
    /// Build the service and its HTTP client.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the settings are invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(settings: CorrectionSettings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient {
                location: ErrorLocation::from(Location::caller()),
                message: e.to_string(),
            })?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &CorrectionSettings {
        &self.settings
    }

    /// Request body for `text`, with the fixed system instruction.
    pub fn build_request<'a>(&'a self, text: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: Role::System,
                    content: CORRECTION_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: Role::User,
                    content: text,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// Correct `text` using `credential`.
    ///
    /// The user message is `text` verbatim; the returned string is the first
    /// choice's content verbatim.
    ///
    /// # Errors
    /// - [`CorrectionError::EmptyInput`] if `text` is blank (no request sent)
    /// - [`CorrectionError::MissingCredential`] if `credential` is blank or the placeholder (no request sent)
    /// - [`CorrectionError::Network`] if no response was received
    /// - [`CorrectionError::Rejected`] on a non-2xx status
    /// - [`CorrectionError::MalformedResponse`] if a 2xx body lacks the first choice's content
    pub async fn correct(
        &self,
        text: &str,
        credential: &Credential,
    ) -> Result<String, CorrectionError> {
        if text.trim().is_empty() {
            return Err(CorrectionError::empty_input());
        }
        if credential.is_unusable() {
            return Err(CorrectionError::missing_credential());
        }

        let body = self.build_request(text);
        let started = Instant::now();

        debug!(
            "Sending correction request: model={}, input={} chars",
            self.settings.model,
            text.chars().count()
        );

        let response = self
            .client
            .post(self.settings.endpoint.clone())
            .bearer_auth(credential.expose())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Correction request failed to send: {}", e);
                CorrectionError::from_reqwest(&e)
            })?;

        let status = response.status();
        let raw = response.text().await.map_err(|e| {
            warn!("Failed to read correction response body: {}", e);
            CorrectionError::from_reqwest(&e)
        })?;

        if !status.is_success() {
            let error = CorrectionError::rejected(status.as_u16(), ApiErrorBody::message_from(&raw));
            warn!(
                "Correction rejected: HTTP {} ({})",
                status.as_u16(),
                error.error_category()
            );
            return Err(error);
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&raw)?;
        let corrected = parsed.first_content().ok_or_else(|| {
            warn!("Correction response has no content in its first choice");
            CorrectionError::malformed("response has no content in its first choice")
        })?;

        info!(
            "Correction completed in {} ms ({} chars)",
            started.elapsed().as_millis(),
            corrected.chars().count()
        );

        Ok(corrected)
    }
}

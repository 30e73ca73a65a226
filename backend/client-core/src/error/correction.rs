//! Error types for the correction request lifecycle.
//!
//! - Precondition failures (`EmptyInput`, `MissingCredential`) never touch the network
//! - HTTP status codes stored directly (not parsed from strings)
//! - All errors include ErrorLocation and are built with `#[track_caller]`

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Message used when a rejection carries no readable `error.message`.
pub const REJECTED_FALLBACK_MESSAGE: &str = "Completion endpoint rejected the request";

#[derive(Debug, ThisError)]
pub enum CorrectionError {
    #[error("Empty Input Error: nothing to correct {location}")]
    EmptyInput { location: ErrorLocation },

    #[error("Missing Credential Error: no API key configured {location}")]
    MissingCredential { location: ErrorLocation },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Rejected Error: HTTP {status_code} - {message} {location}")]
    Rejected {
        message: String,
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Malformed Response Error: {message} {location}")]
    MalformedResponse {
        message: String,
        location: ErrorLocation,
    },
}

impl CorrectionError {
    #[track_caller]
    pub fn empty_input() -> Self {
        CorrectionError::EmptyInput {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_credential() -> Self {
        CorrectionError::MissingCredential {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rejected(status_code: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| REJECTED_FALLBACK_MESSAGE.to_string());

        CorrectionError::Rejected {
            message,
            status_code: HttpStatusCode(status_code),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        CorrectionError::MalformedResponse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Categorize a transport failure. Timeouts and connect failures are flagged
    /// so the notice can say which one happened.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        CorrectionError::Network {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short notice for the user. Never includes the location or raw transport detail.
    pub fn user_message(&self) -> String {
        match self {
            CorrectionError::EmptyInput { .. } => String::from("Enter some text to correct"),
            CorrectionError::MissingCredential { .. } => {
                String::from("Set your API key first")
            }
            CorrectionError::Network {
                is_timeout: true, ..
            } => String::from("The correction request timed out"),
            CorrectionError::Network { .. } => {
                String::from("Could not reach the correction service")
            }
            CorrectionError::Rejected {
                message,
                status_code,
                ..
            } if status_code.is_auth_failure() => {
                format!("API key rejected: {message}")
            }
            CorrectionError::Rejected {
                message,
                status_code,
                ..
            } if status_code.is_rate_limited() => {
                format!("Rate limit reached: {message}")
            }
            CorrectionError::Rejected { message, .. } => message.clone(),
            CorrectionError::MalformedResponse { .. } => {
                String::from("The correction service returned an unexpected response")
            }
        }
    }

    /// Get error category for logging.
    pub fn error_category(&self) -> &'static str {
        match self {
            CorrectionError::EmptyInput { .. } => "empty_input",
            CorrectionError::MissingCredential { .. } => "missing_credential",
            CorrectionError::Network {
                is_timeout: true, ..
            } => "timeout",
            CorrectionError::Network {
                is_connection: true,
                ..
            } => "connection",
            CorrectionError::Network { .. } => "network",
            CorrectionError::Rejected { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            CorrectionError::Rejected { .. } => "rejected",
            CorrectionError::MalformedResponse { .. } => "malformed_response",
        }
    }

    /// True for failures detected before any I/O.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CorrectionError::EmptyInput { .. } | CorrectionError::MissingCredential { .. }
        )
    }

    /// Get HTTP status code if applicable.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CorrectionError::Rejected { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CorrectionError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        CorrectionError::MalformedResponse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

use client_core::error::{
    ClipboardError, ConfigError, CorrectionError, SaveCredentialError, StoreError,
};

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// Errors surfaced by shell commands.
///
/// `message` is the short notice shown to the user; the wrapped core error has
/// already been logged with its full detail where it happened.
#[derive(Debug, Error)]
pub enum KorektorError {
    /// Error from this app (logger, state actor, terminal I/O)
    #[error("Korektor Error: {message} {location}")]
    Korektor {
        message: String,
        location: ErrorLocation,
    },

    /// A correction attempt failed
    #[error("Correction Error: {message} {location}")]
    Correction {
        message: String,
        location: ErrorLocation,
    },

    /// Credential could not be read, validated or saved
    #[error("Credential Error: {message} {location}")]
    Credential {
        message: String,
        location: ErrorLocation,
    },

    /// Clipboard export failed
    #[error("Clipboard Error: {message} {location}")]
    Clipboard {
        message: String,
        location: ErrorLocation,
    },

    /// A correction is already in flight
    #[error("Busy Error: {message} {location}")]
    Busy {
        message: String,
        location: ErrorLocation,
    },
}

impl KorektorError {
    #[track_caller]
    pub fn korektor(message: impl Into<String>) -> Self {
        KorektorError::Korektor {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn busy() -> Self {
        KorektorError::Busy {
            message: "A correction is already in progress".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The notice to show the user, without location detail.
    pub fn user_message(&self) -> &str {
        match self {
            KorektorError::Korektor { message, .. }
            | KorektorError::Correction { message, .. }
            | KorektorError::Credential { message, .. }
            | KorektorError::Clipboard { message, .. }
            | KorektorError::Busy { message, .. } => message,
        }
    }
}

impl From<CorrectionError> for KorektorError {
    /// A missing key is a credential problem the shell can fix by asking for one.
    #[track_caller]
    fn from(error: CorrectionError) -> Self {
        let message = error.user_message();
        let location = ErrorLocation::from(Location::caller());
        match error {
            CorrectionError::MissingCredential { .. } => {
                KorektorError::Credential { message, location }
            }
            _ => KorektorError::Correction { message, location },
        }
    }
}

impl From<StoreError> for KorektorError {
    #[track_caller]
    fn from(error: StoreError) -> Self {
        KorektorError::Credential {
            message: error.user_message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<SaveCredentialError> for KorektorError {
    #[track_caller]
    fn from(error: SaveCredentialError) -> Self {
        KorektorError::Credential {
            message: error.user_message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ClipboardError> for KorektorError {
    #[track_caller]
    fn from(error: ClipboardError) -> Self {
        KorektorError::Clipboard {
            message: error.user_message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for KorektorError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        KorektorError::Korektor {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

use common::{ErrorLocation, ValidationError};

use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Persistence-layer failures of the credential store.
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Credential Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credential Parse Error: {path}: {reason} {location}")]
    Parse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Credential Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credential Serialization Error: {reason} {location}")]
    Serialize {
        location: ErrorLocation,
        reason: String,
    },
}

impl StoreError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::Read { .. } | StoreError::Parse { .. } => "Could not read the saved API key",
            StoreError::Write { .. } | StoreError::Serialize { .. } => {
                "Could not save the API key"
            }
        }
    }
}

/// Failure of `CredentialStore::save`: either the value was rejected locally or
/// the store could not persist it.
#[derive(Debug, ThisError)]
pub enum SaveCredentialError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SaveCredentialError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SaveCredentialError::Validation(e) => e.user_message(),
            SaveCredentialError::Store(e) => e.user_message(),
        }
    }
}

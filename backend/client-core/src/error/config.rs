use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Parse Error: {key}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        key: String,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("HTTP Client Error: {message} {location}")]
    HttpClient {
        location: ErrorLocation,
        message: String,
    },

    #[error("Data Directory Not Found Error: {message} {location}")]
    DirectoryNotFound {
        location: ErrorLocation,
        message: String,
    },

    #[error("Data Directory Create Error: {path}: {source} {location}")]
    DirectoryCreate {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

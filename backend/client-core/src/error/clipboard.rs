use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ClipboardError {
    #[error("Clipboard Unavailable Error: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Clipboard Write Error: {message} {location}")]
    Write {
        message: String,
        location: ErrorLocation,
    },
}

impl ClipboardError {
    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        ClipboardError::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn write(message: impl Into<String>) -> Self {
        ClipboardError::Write {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn user_message(&self) -> &'static str {
        "Could not copy to the clipboard"
    }
}

impl From<arboard::Error> for ClipboardError {
    #[track_caller]
    fn from(error: arboard::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            arboard::Error::ClipboardNotSupported | arboard::Error::ClipboardOccupied => {
                ClipboardError::Unavailable {
                    message: error.to_string(),
                    location,
                }
            }
            other => ClipboardError::Write {
                message: other.to_string(),
                location,
            },
        }
    }
}

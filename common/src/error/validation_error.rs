use crate::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Local input validation failures. These never reach the network or disk.
#[derive(Debug, ThisError)]
pub enum ValidationError {
    #[error("Validation Error: value is empty {location}")]
    Empty { location: ErrorLocation },
}

impl ValidationError {
    #[track_caller]
    pub fn empty() -> Self {
        ValidationError::Empty {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short notice suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::Empty { .. } => "Enter an API key",
        }
    }
}

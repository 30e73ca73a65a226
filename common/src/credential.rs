//! The API credential, with redacted Debug/Display output.

use crate::{ErrorLocation, RedactError, ValidationError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// Value shipped in sample configs; treated the same as no credential at all.
pub const PLACEHOLDER_CREDENTIAL: &str = "YOUR_OPENAI_API_KEY_HERE";

/// The bearer token for the completion endpoint.
///
/// Never exposes its value through `Debug`, `Display` or serde. The only way
/// to read it is [`Credential::expose`], which the correction service calls
/// when building the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    inner: String,
}

impl Credential {
    /// Wrap a raw value as-is. Use [`Credential::parse`] for user input.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Validate user input: trims surrounding whitespace and rejects blank values.
    #[track_caller]
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty());
        }
        Ok(Self::new(trimmed))
    }

    /// The raw value, for transmission only.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Length in bytes (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Empty, whitespace-only, or the sample placeholder.
    pub fn is_unusable(&self) -> bool {
        let trimmed = self.inner.trim();
        trimmed.is_empty() || trimmed == PLACEHOLDER_CREDENTIAL
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential([REDACTED])")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED CREDENTIAL]")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Persisting goes through the credential store, which calls expose() explicitly.
impl serde::Serialize for Credential {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("Credential cannot be serialized - use expose() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}

//! Shared value types for Korektor.
//!
//! This crate contains plain data shared by every layer: the credential
//! wrapper, error locations and HTTP status helpers. No I/O lives here.
//!
//! ## Architecture
//!
//! - **common** (this crate): Value types
//! - **client-core**: Credential store, correction service, clipboard, deep links
//! - **korektor**: Terminal shell wiring everything together

pub mod credential;
pub mod error;
pub mod http_status;

#[cfg(test)]
mod tests;

pub use credential::{Credential, PLACEHOLDER_CREDENTIAL};
pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use error::validation_error::ValidationError;
pub use http_status::HttpStatusCode;

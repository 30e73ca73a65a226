pub mod error_location;
pub mod redact_error;
pub mod validation_error;

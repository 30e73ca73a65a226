pub mod clipboard;
pub mod config;
pub mod correction;
pub mod credential_store;

pub use clipboard::ClipboardError;
pub use config::ConfigError;
pub use correction::{CorrectionError, REJECTED_FALLBACK_MESSAGE};
pub use credential_store::{SaveCredentialError, StoreError};

//! Single-slot durable storage for the API credential.
//!
//! # Contract
//! - `load()` returns `Ok(None)` when nothing was ever saved
//! - `save()` trims the value, rejects blank input before touching storage,
//!   and replaces any previous credential wholesale
//! - Persistence failures are returned, never retried
//!
//! # Security
//! - Values travel as [`Credential`] (redacted Debug, zeroized on drop)
//! - Implementations must never log the value, only its length

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::InMemoryCredentialStore;

use crate::error::{SaveCredentialError, StoreError};

use common::Credential;

use log::info;

pub trait CredentialStore: Send + Sync {
    /// Read the persisted credential, if any.
    fn load(&self) -> Result<Option<Credential>, StoreError>;

    /// Write an already-validated credential, overwriting the slot.
    fn persist(&self, credential: &Credential) -> Result<(), StoreError>;

    /// Remove the stored credential. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<(), StoreError>;

    /// Validate and persist user input.
    ///
    /// # Errors
    /// - [`SaveCredentialError::Validation`] if `value` is blank; the store is untouched
    /// - [`SaveCredentialError::Store`] if persisting fails
    fn save(&self, value: &str) -> Result<Credential, SaveCredentialError> {
        let credential = Credential::parse(value)?;
        self.persist(&credential)?;
        info!("Credential saved ({} chars)", credential.len());
        Ok(credential)
    }

    fn has_credential(&self) -> Result<bool, StoreError> {
        Ok(self.load()?.is_some())
    }
}

use crate::error::KorektorError;
use crate::session::Session;

use log::{error, info};

/// Validate and persist a new credential, replacing any previous one.
///
/// Blank input is rejected without touching the store.
pub fn save_credential(session: &Session, value: &str) -> Result<(), KorektorError> {
    session.store().save(value).map_err(|e| {
        error!("Failed to save credential: {}", e);
        KorektorError::from(e)
    })?;
    info!("Credential updated");
    Ok(())
}

pub fn forget_credential(session: &Session) -> Result<(), KorektorError> {
    session.store().clear().map_err(|e| {
        error!("Failed to clear credential: {}", e);
        KorektorError::from(e)
    })?;
    info!("Credential cleared");
    Ok(())
}

/// Whether a credential is stored. Read failures are reported, not treated as absent.
pub fn has_credential(session: &Session) -> Result<bool, KorektorError> {
    Ok(session.store().has_credential()?)
}

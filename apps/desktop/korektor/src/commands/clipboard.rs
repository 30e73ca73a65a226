use crate::error::KorektorError;
use crate::session::Session;

use client_core::clipboard::{CopyOutcome, copy};

/// Copy the latest successful correction to the clipboard.
///
/// # Returns
///
/// * `Ok(CopyOutcome::Skipped)` - No result yet (or it is empty); clipboard untouched
/// * `Ok(CopyOutcome::Copied)` - Clipboard updated
/// * `Err(KorektorError::Clipboard)` - The platform clipboard refused the write
pub async fn copy_result(session: &Session) -> Result<CopyOutcome, KorektorError> {
    let result = session.state().view().await.result.unwrap_or_default();
    Ok(copy(session.clipboard(), &result)?)
}

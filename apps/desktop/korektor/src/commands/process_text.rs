use crate::commands::correction::correct_text;
use crate::error::KorektorError;
use crate::session::Session;

use log::{info, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Correct a selection handed over by another app.
///
/// Always yields text to hand back: the correction on success, the original
/// selection unchanged on any failure (including empty input or no credential).
pub async fn process_text(session: &Session, selection: &str) -> String {
    match correct_text(session, selection).await {
        Ok(corrected) => {
            info!("Processed selection ({} chars)", selection.chars().count());
            corrected
        }
        Err(e) => {
            warn!("Returning selection unchanged: {}", e);
            selection.to_string()
        }
    }
}

/// Hand the processed text back, flushed. A short or unflushed write is an error.
pub async fn write_output<W>(out: &mut W, text: &str) -> Result<(), KorektorError>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes())
        .await
        .map_err(|e| KorektorError::korektor(format!("Failed to write output: {e}")))?;
    out.flush()
        .await
        .map_err(|e| KorektorError::korektor(format!("Failed to flush output: {e}")))
}

//! Copying the corrected text to the system clipboard.

pub mod system;

pub use system::SystemClipboard;

use crate::error::ClipboardError;

use log::{debug, info, warn};

/// Text-only clipboard backend.
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// What [`copy`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Nothing to copy; the backend was not called.
    Skipped,
}

/// Copy `text` through `sink`.
///
/// Empty text is skipped without touching the backend. Any backend failure is
/// returned to the caller; there is no retry.
pub fn copy(sink: &dyn ClipboardSink, text: &str) -> Result<CopyOutcome, ClipboardError> {
    if text.is_empty() {
        debug!("Nothing to copy, skipping clipboard");
        return Ok(CopyOutcome::Skipped);
    }

    sink.set_text(text).inspect_err(|e| {
        warn!("Clipboard write failed: {}", e);
    })?;

    info!("Copied {} chars to clipboard", text.chars().count());
    Ok(CopyOutcome::Copied)
}

use super::ClipboardSink;
use crate::error::ClipboardError;

use arboard::Clipboard;
use log::debug;

/// Platform clipboard via `arboard`. A backend handle is opened per copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    /// Try to open the backend to detect availability (headless sessions have none).
    pub fn available() -> bool {
        Clipboard::new().is_ok()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        debug!("Opening system clipboard");
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text.to_owned())?;
        Ok(())
    }
}

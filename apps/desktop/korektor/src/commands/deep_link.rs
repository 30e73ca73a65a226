use crate::error::KorektorError;
use crate::session::Session;
use crate::state::StateCommand;

use client_core::deep_link::shared_text_from_url;

use log::{debug, error, info};
use tokio::task::JoinHandle;

/// Pre-fill the input from the URL the process was launched with.
///
/// Returns whether the URL carried shared text. A URL without it is ignored.
pub async fn apply_launch_url(session: &Session, url: &str) -> Result<bool, KorektorError> {
    match shared_text_from_url(url) {
        Some(text) => {
            info!("Launch URL carried shared text ({} chars)", text.chars().count());
            session.state().update(StateCommand::SetInput(text)).await?;
            Ok(true)
        }
        None => {
            debug!("Launch URL has no shared text");
            Ok(false)
        }
    }
}

/// Deliver an "open with URL" event to every listener.
pub fn open_url(session: &Session, url: &str) -> usize {
    session.hub().publish(url)
}

/// Background task that applies deep-link text to the input.
///
/// Subscribed before this returns, so no event published afterwards is
/// missed. Dropping the listener aborts the task and releases the subscription.
#[must_use = "the listener stops when dropped"]
pub struct DeepLinkListener {
    handle: JoinHandle<()>,
}

impl DeepLinkListener {
    pub fn spawn(session: &Session) -> Self {
        let mut subscription = session.hub().subscribe();
        let state = session.state().clone();

        let handle = tokio::spawn(async move {
            while let Some(text) = subscription.next_shared_text().await {
                info!("Deep link replaced input ({} chars)", text.chars().count());
                if let Err(e) = state.update(StateCommand::SetInput(text)).await {
                    error!("Failed to apply deep-link text: {}", e);
                    break;
                }
            }
            debug!("Deep-link listener finished");
        });

        Self { handle }
    }
}

impl Drop for DeepLinkListener {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

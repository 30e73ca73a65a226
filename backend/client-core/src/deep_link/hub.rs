use super::parse::shared_text_from_url;

use log::{debug, warn};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

const EVENT_CAPACITY: usize = 16;

/// Fan-out point for "open with URL" events.
///
/// The platform side calls [`DeepLinkHub::publish`]; each shell instance holds
/// a [`DeepLinkSubscription`]. Dropping the subscription unsubscribes it, so
/// re-initializing a shell cannot leak listeners.
#[derive(Clone)]
pub struct DeepLinkHub {
    sender: broadcast::Sender<String>,
}

impl DeepLinkHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Deliver a URL event. Returns the number of subscriptions that received it.
    pub fn publish(&self, url: impl Into<String>) -> usize {
        match self.sender.send(url.into()) {
            Ok(receivers) => {
                debug!("Deep link delivered to {receivers} subscriber(s)");
                receivers
            }
            Err(_) => {
                debug!("Deep link dropped: no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> DeepLinkSubscription {
        debug!("Deep-link subscription acquired");
        DeepLinkSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for DeepLinkHub {
    fn default() -> Self {
        Self::new()
    }
}

/// A live subscription to deep-link events. Released on drop.
pub struct DeepLinkSubscription {
    receiver: broadcast::Receiver<String>,
}

impl DeepLinkSubscription {
    /// Wait for the next event that carries shared text.
    ///
    /// Events without text are skipped. Returns `None` once the hub is gone.
    pub async fn next_shared_text(&mut self) -> Option<String> {
        loop {
            match self.receiver.recv().await {
                Ok(url) => match shared_text_from_url(&url) {
                    Some(text) => return Some(text),
                    None => debug!("Ignoring deep link without shared text"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Deep-link listener fell behind, skipped {skipped} event(s)");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for DeepLinkSubscription {
    fn drop(&mut self) {
        debug!("Deep-link subscription released");
    }
}

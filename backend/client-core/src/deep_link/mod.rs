//! Shared text delivered through deep links.
//!
//! A deep link is a URL such as `korektor://app?text=Hello%20world`. The text
//! arrives either at launch or as an "open with URL" event while running;
//! events are fanned out through [`DeepLinkHub`] to scoped subscriptions.

pub mod hub;
pub mod parse;

pub use hub::{DeepLinkHub, DeepLinkSubscription};
pub use parse::shared_text_from_url;

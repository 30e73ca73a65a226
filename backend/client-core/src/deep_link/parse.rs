use crate::SHARED_TEXT_PARAM;

use log::debug;
use url::{Url, form_urlencoded};

/// Extract the URL-decoded `text` query parameter.
///
/// Never fails: malformed URLs, URLs without a query, and missing or empty
/// parameters all yield `None`. Strings that are not absolute URLs are still
/// searched for a `?query` part.
pub fn shared_text_from_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let query = match Url::parse(raw) {
        Ok(url) => url.query().map(str::to_owned),
        Err(e) => {
            debug!("Deep link is not an absolute URL ({e}), scanning for a query");
            raw.split_once('?')
                .map(|(_, rest)| rest.split('#').next().unwrap_or_default().to_owned())
        }
    };

    let Some(query) = query else {
        debug!("Deep link has no query");
        return None;
    };

    let text = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SHARED_TEXT_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty());

    if text.is_none() {
        debug!("Deep link has no '{SHARED_TEXT_PARAM}' parameter");
    }
    text
}

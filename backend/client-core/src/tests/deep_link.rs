// Unit tests for deep-link text extraction.

use crate::deep_link::shared_text_from_url;

/// **VALUE**: Verifies URL-decoding of the `text` parameter.
///
/// **WHY THIS MATTERS**: Shared text arrives percent-encoded. Showing `Hello%20world`
/// in the input box would force the user to clean it up by hand.
#[test]
fn given_encoded_text_param_when_parsing_then_decoded_text_returned() {
    assert_eq!(
        shared_text_from_url("korektor://app?text=Hello%20world").as_deref(),
        Some("Hello world")
    );
    assert_eq!(
        shared_text_from_url("https://example.com/app?lang=pl&text=Za%C5%BC%C3%B3%C5%82%C4%87+g%C4%99%C5%9Bl%C4%85").as_deref(),
        Some("Zażółć gęślą")
    );
}

/// **VALUE**: Verifies that relative or elided URLs still yield their query.
///
/// **BUG THIS CATCHES**: Would catch relying solely on `Url::parse`, which rejects
/// strings like `.../app?text=...` that some launchers hand over.
#[test]
fn given_relative_url_when_parsing_then_query_is_still_read() {
    assert_eq!(
        shared_text_from_url(".../app?text=Hello%20world").as_deref(),
        Some("Hello world")
    );
    assert_eq!(
        shared_text_from_url("/app?text=abc#section").as_deref(),
        Some("abc")
    );
}

/// **VALUE**: Verifies that every degenerate input yields `None` instead of failing.
///
/// **WHY THIS MATTERS**: Deep links come from other apps. Nothing they send may crash
/// the shell or surface an error to the user.
#[test]
fn given_missing_or_malformed_param_when_parsing_then_none() {
    for url in [
        "",
        "   ",
        "korektor://app",
        "korektor://app?lang=pl",
        "korektor://app?text=",
        "not a url at all",
        "korektor://app?text=%ZZ%",
        "?",
    ] {
        let result = shared_text_from_url(url);
        if url.contains("%ZZ") {
            // Invalid escapes are kept literally rather than rejected.
            assert_eq!(result.as_deref(), Some("%ZZ%"));
        } else {
            assert!(result.is_none(), "Expected None for {url:?}, got {result:?}");
        }
    }
}

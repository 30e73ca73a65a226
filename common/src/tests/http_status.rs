use crate::HttpStatusCode;

/// **VALUE**: Verifies status classification used to pick the rejection notice.
///
/// **BUG THIS CATCHES**: Would catch off-by-one range errors (e.g. 500 treated as a
/// client error) that would show the user the wrong hint.
#[test]
fn given_status_codes_when_classified_then_categories_match() {
    assert!(HttpStatusCode(400).is_client_error());
    assert!(HttpStatusCode(499).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());
    assert!(HttpStatusCode(500).is_server_error());
    assert!(HttpStatusCode(503).is_server_error());

    assert!(HttpStatusCode(401).is_auth_failure());
    assert!(HttpStatusCode(403).is_auth_failure());
    assert!(!HttpStatusCode(404).is_auth_failure());

    assert!(HttpStatusCode(429).is_rate_limited());
    assert!(!HttpStatusCode(503).is_rate_limited());
}

#[test]
fn given_status_code_when_displayed_then_prints_number() {
    assert_eq!(HttpStatusCode::from(418).to_string(), "418");
}

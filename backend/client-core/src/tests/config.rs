// Unit tests for env-driven correction settings.
// A HashMap stands in for the process environment so tests never mutate it.

use crate::config::{
    CONNECT_TIMEOUT_ENV, CorrectionSettings, ENDPOINT_URL_ENV, MAX_TOKENS_ENV, MODEL_ENV,
    REQUEST_TIMEOUT_ENV, TEMPERATURE_ENV,
};
use crate::error::ConfigError;
use crate::{CHAT_COMPLETIONS_URL, DEFAULT_MODEL};

use std::collections::HashMap;
use std::time::Duration;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

/// **VALUE**: Verifies the defaults used when nothing is configured.
///
/// **WHY THIS MATTERS**: Most users never set any variable. The defaults define the
/// request every correction sends: endpoint, model, low temperature, bounded output.
#[test]
fn given_empty_environment_when_loading_settings_then_defaults_apply() {
    // GIVEN: No variables
    // WHEN: Loading settings
    let settings = CorrectionSettings::from_lookup(lookup(&[])).expect("defaults are valid");

    // THEN: Built-in defaults are used
    assert_eq!(settings.endpoint.as_str(), CHAT_COMPLETIONS_URL);
    assert_eq!(settings.model, DEFAULT_MODEL);
    assert!(settings.temperature > 0.0 && settings.temperature < 0.5);
    assert_eq!(settings.max_tokens, 2000);
    assert_eq!(settings.connect_timeout, Duration::from_secs(10));
}

#[test]
fn given_overrides_when_loading_settings_then_values_replace_defaults() {
    let settings = CorrectionSettings::from_lookup(lookup(&[
        (ENDPOINT_URL_ENV, "http://127.0.0.1:8080/v1/chat/completions"),
        (MODEL_ENV, " gpt-4o "),
        (TEMPERATURE_ENV, "0.2"),
        (MAX_TOKENS_ENV, "512"),
        (CONNECT_TIMEOUT_ENV, "3"),
        (REQUEST_TIMEOUT_ENV, "15"),
    ]))
    .expect("overrides are valid");

    assert_eq!(settings.endpoint.port(), Some(8080));
    assert_eq!(settings.model, "gpt-4o");
    assert!((settings.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(settings.max_tokens, 512);
    assert_eq!(settings.connect_timeout, Duration::from_secs(3));
    assert_eq!(settings.request_timeout, Duration::from_secs(15));
}

/// **VALUE**: Verifies that a present-but-garbled value is an error, not silently ignored.
///
/// **BUG THIS CATCHES**: Would catch a `.ok()` fallback that quietly keeps the default when
/// the user typed `KOREKTOR_MAX_TOKENS=lots`, hiding the misconfiguration.
#[test]
fn given_unparseable_value_when_loading_settings_then_parse_error_names_key() {
    let result = CorrectionSettings::from_lookup(lookup(&[(MAX_TOKENS_ENV, "lots")]));

    match result {
        Err(ConfigError::ParseError { key, .. }) => assert_eq!(key, MAX_TOKENS_ENV),
        other => panic!("Expected ParseError, got {other:?}"),
    }
}

#[test]
fn given_blank_value_when_loading_settings_then_default_is_kept() {
    let settings = CorrectionSettings::from_lookup(lookup(&[(MODEL_ENV, "   ")]))
        .expect("blank values fall back to defaults");

    assert_eq!(settings.model, DEFAULT_MODEL);
}

/// **VALUE**: Verifies range validation of temperature and output length.
///
/// **WHY THIS MATTERS**: A zero or high temperature makes corrections wander away from
/// the input; zero max tokens makes every request fail at the endpoint.
#[test]
fn given_out_of_range_values_when_validating_then_validation_error() {
    for vars in [
        [(TEMPERATURE_ENV, "0")],
        [(TEMPERATURE_ENV, "1.5")],
        [(MAX_TOKENS_ENV, "0")],
        [(MAX_TOKENS_ENV, "100000")],
        [(CONNECT_TIMEOUT_ENV, "0")],
    ] {
        let result = CorrectionSettings::from_lookup(lookup(&vars));
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "Expected ValidationError for {vars:?}, got {result:?}"
        );
    }
}

#[test]
fn given_non_http_endpoint_when_validating_then_validation_error() {
    let result = CorrectionSettings::with_endpoint("ftp://example.com/completions");

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

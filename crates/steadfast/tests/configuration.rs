//! Loading retry options from documents and the environment

mod common;

use common::{Flaky, RecordingSleeper};
use std::time::Duration;
use steadfast::options::{DELAY_SECONDS, DELAY_SEQUENCE, MAX_RETRIES};
use steadfast::prelude::*;

#[test]
fn test_toml_options_configure_fixed_delay() {
    let options = RetryOptions::from_toml(
        r#"
        max_retries = 4
        delay_seconds = 3
        comment = "unknown keys are ignored"
        "#,
    )
    .unwrap();

    let sleeper = RecordingSleeper::new();
    let retrier = FixedDelayRetry::new()
        .with_sleeper(sleeper.clone())
        .configure(options)
        .unwrap();

    let mut flaky = Flaky::new(1, 5);
    assert_eq!(retrier.execute(|| flaky.call()), Ok(5));
    assert_eq!(sleeper.slept(), vec![Duration::from_secs(3)]);
}

#[test]
fn test_json_options_with_string_max_retries_are_rejected() {
    let options = RetryOptions::from_json(r#"{"max_retries": "foobar"}"#).unwrap();
    let err = SimpleRetry::new().configure(options).unwrap_err();
    assert_eq!(err.option(), Some(MAX_RETRIES));
}

#[test]
fn test_document_delay_list_is_not_a_lazy_sequence() {
    let options = RetryOptions::from_toml("max_retries = 3\ndelay_sequence = [1, 2, 3]").unwrap();
    let err = VariableDelayRetry::new().configure(options).unwrap_err();
    assert_eq!(err.option(), Some(DELAY_SEQUENCE));
    assert!(err.to_string().contains("lazy delay sequence"));
}

#[test]
fn test_document_merged_with_code_sequence() {
    let from_file = RetryOptions::from_json(r#"{"max_retries": 3}"#).unwrap();
    let options = from_file
        .merge(RetryOptions::new().delay_sequence(DelaySequence::from_secs(|| [2, 4, 8])));

    let sleeper = RecordingSleeper::new();
    let retrier = VariableDelayRetry::new()
        .with_sleeper(sleeper.clone())
        .configure(options)
        .unwrap();

    let mut flaky = Flaky::always_failing();
    assert!(retrier.execute(|| flaky.call()).is_err());
    assert_eq!(
        sleeper.slept(),
        vec![
            Duration::from_secs(2),
            Duration::from_secs(4),
            Duration::from_secs(8)
        ]
    );
}

#[test]
fn test_retrier_keeps_configured_options() {
    let retrier = FixedDelayRetry::new()
        .configure(RetryOptions::new().max_retries(2).delay_seconds(1).set("owner", "billing"))
        .unwrap();

    assert!(retrier.options().contains("owner"));
    assert!(retrier.options().contains(DELAY_SECONDS));
    assert_eq!(retrier.max_retries(), 2);
}

#[cfg(feature = "env")]
#[test]
fn test_env_options_configure_fixed_delay() {
    temp_env::with_vars(
        [
            ("BILLING_RETRY_MAX_RETRIES", Some("6")),
            ("BILLING_RETRY_DELAY_SECONDS", Some(" 2 ")),
        ],
        || {
            let retrier = FixedDelayRetry::new()
                .configure(RetryOptions::from_env("BILLING_RETRY"))
                .unwrap();
            assert_eq!(retrier.max_retries(), 6);
            assert_eq!(retrier.policy().delay(), Duration::from_secs(2));
        },
    );
}

#[cfg(feature = "env")]
#[test]
fn test_env_options_with_bad_values_are_rejected() {
    temp_env::with_vars(
        [
            ("ORDERS_RETRY_MAX_RETRIES", Some("ten")),
            ("ORDERS_RETRY_DELAY_SECONDS", Some("1")),
        ],
        || {
            let err = FixedDelayRetry::new()
                .configure(RetryOptions::from_env("ORDERS_RETRY"))
                .unwrap_err();
            assert_eq!(err.option(), Some(MAX_RETRIES));
        },
    );
}

#[cfg(feature = "env")]
#[test]
fn test_env_options_missing_delay_is_rejected() {
    temp_env::with_vars(
        [
            ("SEARCH_RETRY_MAX_RETRIES", Some("3")),
            ("SEARCH_RETRY_DELAY_SECONDS", None::<&str>),
        ],
        || {
            let err = FixedDelayRetry::new()
                .configure(RetryOptions::from_env("SEARCH_RETRY"))
                .unwrap_err();
            assert_eq!(err, Error::missing(DELAY_SECONDS));
        },
    );
}

//! Named options a retry strategy is configured with.
//!
//! [`RetryOptions`] is a loose bag of named values: strategies read the keys
//! they recognize and ignore the rest. Options can be set in code, or loaded
//! from a JSON/TOML document or from environment variables.

use crate::error::{Error, Result};
use crate::sequence::DelaySequence;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Maximum number of attempts (all strategies).
pub const MAX_RETRIES: &str = "max_retries";
/// Delay between attempts in seconds (fixed-delay strategy).
pub const DELAY_SECONDS: &str = "delay_seconds";
/// Short alias for [`DELAY_SECONDS`].
pub const DELAY: &str = "delay";
/// Lazy delay source (variable-delay strategy).
pub const DELAY_SEQUENCE: &str = "delay_sequence";
/// Alias for [`DELAY_SEQUENCE`].
pub const DELAY_GENERATOR: &str = "delay_generator";

/// A single named option.
#[derive(Debug, Clone)]
pub enum OptionValue {
    /// Plain data: numbers, strings, lists, tables.
    Value(Value),
    /// A lazy delay sequence.
    Sequence(DelaySequence),
}

impl OptionValue {
    /// The plain value, if this is not a sequence.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Sequence(_) => None,
        }
    }

    /// The delay sequence, if this is one.
    pub fn as_sequence(&self) -> Option<&DelaySequence> {
        match self {
            Self::Sequence(sequence) => Some(sequence),
            Self::Value(_) => None,
        }
    }
}

impl From<DelaySequence> for OptionValue {
    fn from(sequence: DelaySequence) -> Self {
        Self::Sequence(sequence)
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Named options passed to [`RetryStrategy::configure`](crate::retry::RetryStrategy::configure).
///
/// # Examples
///
/// ```rust
/// use steadfast::RetryOptions;
///
/// let options = RetryOptions::new().max_retries(5).delay_seconds(2);
/// assert!(options.contains("max_retries"));
///
/// let from_toml = RetryOptions::from_toml("max_retries = 5\ndelay_seconds = 2").unwrap();
/// assert_eq!(from_toml.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RetryOptions {
    values: BTreeMap<String, OptionValue>,
}

impl RetryOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a named option to any JSON-representable value.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values
            .insert(name.into(), OptionValue::Value(value.into()));
        self
    }

    /// Set a named option to a lazy delay sequence.
    pub fn set_sequence(mut self, name: impl Into<String>, sequence: DelaySequence) -> Self {
        self.values
            .insert(name.into(), OptionValue::Sequence(sequence));
        self
    }

    /// Set `max_retries`.
    pub fn max_retries(self, max_retries: i64) -> Self {
        self.set(MAX_RETRIES, max_retries)
    }

    /// Set `delay_seconds`.
    pub fn delay_seconds(self, delay_seconds: i64) -> Self {
        self.set(DELAY_SECONDS, delay_seconds)
    }

    /// Set `delay_sequence`.
    pub fn delay_sequence(self, sequence: DelaySequence) -> Self {
        self.set_sequence(DELAY_SEQUENCE, sequence)
    }

    /// Look up a named option.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Look up `name`, falling back to each alias in order.
    pub fn get_any(&self, name: &str, aliases: &[&str]) -> Option<&OptionValue> {
        self.get_any_entry(name, aliases).map(|(_, value)| value)
    }

    /// Like [`get_any`](Self::get_any), also returning the key that matched.
    pub fn get_any_entry(&self, name: &str, aliases: &[&str]) -> Option<(&str, &OptionValue)> {
        std::iter::once(name)
            .chain(aliases.iter().copied())
            .find_map(|key| self.values.get_key_value(key))
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Remove a named option, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.values.remove(name)
    }

    /// Whether `name` is set.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Names of every option that is set, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of options set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no options are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge this option set with another, with the other taking precedence.
    pub fn merge(mut self, other: RetryOptions) -> Self {
        self.values.extend(other.values);
        self
    }

    /// Build options from a JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            values: map
                .into_iter()
                .map(|(name, value)| (name, OptionValue::Value(value)))
                .collect(),
        }
    }

    /// Parse options from a JSON document whose root is an object.
    pub fn from_json(document: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(document).map_err(|e| Error::Parse {
            format: "json",
            message: e.to_string(),
        })?;

        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(Error::Parse {
                format: "json",
                message: format!(
                    "expected an object of options but got {}",
                    crate::guards::describe(&other)
                ),
            }),
        }
    }

    /// Parse options from a TOML document.
    pub fn from_toml(document: &str) -> Result<Self> {
        let map: Map<String, Value> = toml::from_str(document).map_err(|e| Error::Parse {
            format: "toml",
            message: e.to_string(),
        })?;
        Ok(Self::from_map(map))
    }

    /// Load options from environment variables.
    ///
    /// This will look for:
    /// - `{PREFIX}_MAX_RETRIES` for `max_retries`
    /// - `{PREFIX}_DELAY_SECONDS` for `delay_seconds`
    ///
    /// Values that parse as integers are stored as integers. Anything else is
    /// kept as a string, so validation reports it as the wrong type instead of
    /// it being silently dropped.
    #[cfg(feature = "env")]
    pub fn from_env(prefix: &str) -> Self {
        use std::env;

        let mut options = Self::new();
        for name in [MAX_RETRIES, DELAY_SECONDS] {
            let var = format!("{}_{}", prefix, name.to_ascii_uppercase());
            if let Ok(raw) = env::var(&var) {
                let raw = raw.trim();
                options = match raw.parse::<i64>() {
                    Ok(n) => options.set(name, n),
                    Err(_) => options.set(name, raw),
                };
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_builder_sets_named_options() {
        let options = RetryOptions::new()
            .max_retries(3)
            .delay_seconds(2)
            .set("unrelated", "ignored");

        assert_eq!(options.len(), 3);
        assert_eq!(
            options.get(MAX_RETRIES).and_then(OptionValue::as_value),
            Some(&json!(3))
        );
        assert_eq!(
            options.names().collect::<Vec<_>>(),
            vec!["delay_seconds", "max_retries", "unrelated"]
        );
    }

    #[test]
    fn test_sequence_option() {
        let options =
            RetryOptions::new().delay_sequence(DelaySequence::constant(Duration::from_secs(1)));
        let value = options.get(DELAY_SEQUENCE).unwrap();
        assert!(value.as_sequence().is_some());
        assert!(value.as_value().is_none());
    }

    #[test]
    fn test_get_any_prefers_canonical_name() {
        let options = RetryOptions::new().set(DELAY, 5).set(DELAY_SECONDS, 7);
        let value = options.get_any(DELAY_SECONDS, &[DELAY]).unwrap();
        assert_eq!(value.as_value(), Some(&json!(7)));

        let alias_only = RetryOptions::new().set(DELAY, 5);
        let value = alias_only.get_any(DELAY_SECONDS, &[DELAY]).unwrap();
        assert_eq!(value.as_value(), Some(&json!(5)));

        assert!(RetryOptions::new().get_any(DELAY_SECONDS, &[DELAY]).is_none());
    }

    #[test]
    fn test_get_any_entry_reports_matched_key() {
        let alias_only = RetryOptions::new().set(DELAY, 5);
        let (key, value) = alias_only.get_any_entry(DELAY_SECONDS, &[DELAY]).unwrap();
        assert_eq!(key, DELAY);
        assert_eq!(value.as_value(), Some(&json!(5)));

        let both = alias_only.set(DELAY_SECONDS, 7);
        let (key, _) = both.get_any_entry(DELAY_SECONDS, &[DELAY]).unwrap();
        assert_eq!(key, DELAY_SECONDS);
    }

    #[test]
    fn test_merge_other_takes_precedence() {
        let base = RetryOptions::new().max_retries(3).delay_seconds(1);
        let merged = base.merge(RetryOptions::new().max_retries(10));

        assert_eq!(
            merged.get(MAX_RETRIES).and_then(OptionValue::as_value),
            Some(&json!(10))
        );
        assert_eq!(
            merged.get(DELAY_SECONDS).and_then(OptionValue::as_value),
            Some(&json!(1))
        );
    }

    #[test]
    fn test_remove() {
        let mut options = RetryOptions::new().max_retries(3);
        assert!(options.remove(MAX_RETRIES).is_some());
        assert!(options.is_empty());
        assert!(options.remove(MAX_RETRIES).is_none());
    }

    #[test]
    fn test_from_json() {
        let options = RetryOptions::from_json(r#"{"max_retries": 4, "delay": "foobar"}"#).unwrap();
        assert_eq!(
            options.get(MAX_RETRIES).and_then(OptionValue::as_value),
            Some(&json!(4))
        );
        assert_eq!(
            options.get(DELAY).and_then(OptionValue::as_value),
            Some(&json!("foobar"))
        );
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = RetryOptions::from_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, Error::Parse { format: "json", .. }));

        let err = RetryOptions::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Parse { format: "json", .. }));
    }

    #[test]
    fn test_from_toml() {
        let options = RetryOptions::from_toml(
            r#"
            max_retries = 10
            delay_seconds = 2
            delay_sequence = [1, 2, 3]
            "#,
        )
        .unwrap();

        assert_eq!(options.len(), 3);
        assert_eq!(
            options.get(DELAY_SEQUENCE).and_then(OptionValue::as_value),
            Some(&json!([1, 2, 3]))
        );
    }

    #[test]
    fn test_from_toml_rejects_malformed_document() {
        let err = RetryOptions::from_toml("max_retries = ").unwrap_err();
        assert!(matches!(err, Error::Parse { format: "toml", .. }));
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("STEADFAST_TEST_MAX_RETRIES", Some("5")),
                ("STEADFAST_TEST_DELAY_SECONDS", Some("not-a-number")),
            ],
            || {
                let options = RetryOptions::from_env("STEADFAST_TEST");
                assert_eq!(
                    options.get(MAX_RETRIES).and_then(OptionValue::as_value),
                    Some(&json!(5))
                );
                assert_eq!(
                    options.get(DELAY_SECONDS).and_then(OptionValue::as_value),
                    Some(&json!("not-a-number"))
                );
            },
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env_missing_vars() {
        temp_env::with_vars_unset(
            ["STEADFAST_EMPTY_MAX_RETRIES", "STEADFAST_EMPTY_DELAY_SECONDS"],
            || {
                assert!(RetryOptions::from_env("STEADFAST_EMPTY").is_empty());
            },
        );
    }
}

//! Precondition checks applied to option values during configuration.
//!
//! Presence is explicit: a value is missing when it is `None` (or JSON
//! `null`), never because it is zero or empty. Zero-valued options reach the
//! bound checks and are rejected there.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fail with [`Error::InvalidArgument`] when `value` was not supplied.
pub fn assert_present<'a, T: ?Sized>(option: &str, value: Option<&'a T>) -> Result<&'a T> {
    value.ok_or_else(|| Error::missing(option))
}

/// Read `value` as a `T`, failing when it is absent or of another type.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use steadfast::guards::assert_type;
///
/// let n: i64 = assert_type("max_retries", Some(&json!(3))).unwrap();
/// assert_eq!(n, 3);
///
/// assert!(assert_type::<i64>("max_retries", Some(&json!("three"))).is_err());
/// assert!(assert_type::<i64>("max_retries", None).is_err());
/// ```
pub fn assert_type<T: DeserializeOwned>(option: &str, value: Option<&Value>) -> Result<T> {
    let value = assert_present(option, value)?;
    if value.is_null() {
        return Err(Error::missing(option));
    }

    serde_json::from_value(value.clone()).map_err(|_| {
        Error::invalid_argument(
            option,
            format!(
                "expected a value of type {} but got {}",
                std::any::type_name::<T>(),
                describe(value)
            ),
        )
    })
}

/// Fail with [`Error::InvalidArgument`] when `predicate` is absent or false.
///
/// `reason` describes the condition that must hold, e.g. `"must be at least 1"`.
pub fn assert_true(option: &str, predicate: Option<bool>, reason: &str) -> Result<()> {
    match predicate {
        None => Err(Error::invalid_argument(
            option,
            "no predicate was supplied to check",
        )),
        Some(false) => Err(Error::invalid_argument(option, reason)),
        Some(true) => Ok(()),
    }
}

/// Short human description of a JSON value for error messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("a list of {} items", items.len()),
        Value::Object(_) => "a table".to_string(),
    }
}

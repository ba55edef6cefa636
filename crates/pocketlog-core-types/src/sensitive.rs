//! Redacted log arguments
//!
//! `Sensitive<T>` marks a value that may be passed to a log call but must
//! never reach its output. Everything that turns a log argument into text
//! goes through `Display` or `Serialize`, and both write [`REDACTED`]: the
//! rendered message, the structured property, the overflow segment and any
//! JSON telemetry record.

use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder written in place of a sensitive value
pub const REDACTED: &str = "***REDACTED***";

/// A log argument whose contents are never rendered
///
/// ```
/// use pocketlog_core_types::sensitive::{Sensitive, REDACTED};
///
/// let token = Sensitive::new("bearer abc");
/// assert_eq!(token.to_string(), REDACTED);
/// assert_eq!(serde_json::to_string(&token).unwrap(), "\"***REDACTED***\"");
/// assert_eq!(token.expose(), &"bearer abc");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// The wrapped value; never pass the result to a logger
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    /// Transform the wrapped value without unwrapping it
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sensitive<U> {
        Sensitive(f(self.0))
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct LoginRecord {
        user: &'static str,
        password: Sensitive<String>,
    }

    #[test]
    fn test_text_renderings_are_redacted() {
        let key = Sensitive::new("api-key-12345");
        assert_eq!(format!("{}", key), REDACTED);
        assert_eq!(format!("{:?}", key), REDACTED);
        assert_eq!(format!("{:>20}", key), REDACTED);
    }

    #[test]
    fn test_serialized_records_are_redacted() {
        let record = LoginRecord {
            user: "ann",
            password: Sensitive::from("hunter2".to_string()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["user"], "ann");
        assert_eq!(json["password"], REDACTED);
        assert!(!json.to_string().contains("hunter2"));
    }

    #[test]
    fn test_map_keeps_value_wrapped() {
        let digits = Sensitive::new("4111 1111 1111 1111").map(|card| card.replace(' ', ""));
        assert_eq!(digits.to_string(), REDACTED);
        assert_eq!(digits.expose(), "4111111111111111");
        assert_eq!(digits.clone().into_inner().len(), 16);
    }
}

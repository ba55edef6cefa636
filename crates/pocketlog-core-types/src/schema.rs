//! Canonical schema constants for structured logging and telemetry
//!
//! These constants keep field names consistent between the tracing bridge,
//! the telemetry adapter and the internal diagnostics of the formatter.

// Field keys emitted by the tracing macros and the tracing bridge. Macros
// spell these as identifiers; readers of captured events use the constants.
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_TOKEN_COUNT: &str = "token_count";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_OPERATION_NAME: &str = "operation_name";
pub const FIELD_OPERATION_ID: &str = "operation_id";
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Structured property names produced by the formatter and adapters
pub const OVERFLOW_ARG_PREFIX: &str = "arg";
pub const PROPERTY_CATEGORY: &str = "Category";
pub const PROPERTY_REQUEST_URI: &str = "RequestUri";
pub const PROPERTY_RESULT_CODE: &str = "ResultCode";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_OP.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
        assert!(!OVERFLOW_ARG_PREFIX.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_field_keys_are_plain_identifiers() {
        for key in [FIELD_OP, FIELD_EVENT, FIELD_ERR_KIND, FIELD_ERR_CODE, FIELD_OPERATION_ID] {
            assert!(key.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{}", key);
        }
    }

    #[test]
    fn test_overflow_prefix_yields_positional_names() {
        assert_eq!(format!("{}{}", OVERFLOW_ARG_PREFIX, 3), "arg3");
    }
}

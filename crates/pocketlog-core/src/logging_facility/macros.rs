//! Canonical logging macros
//!
//! Used for the diagnostics of pocketlog itself (CLI commands, sinks), not
//! for application messages, which go through [`Logger`](crate::Logger).

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use pocketlog_core::log_op_start;
/// log_op_start!("render");
/// log_op_start!("render", template_len = 12);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use pocketlog_core::log_op_end;
/// log_op_end!("render", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use pocketlog_core::{log_op_error, PocketError};
/// let err = PocketError::MissingTemplate;
/// log_op_error!("publish", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let err: &$crate::PocketError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?err.kind(),
            err_code = err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let err: &$crate::PocketError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?err.kind(),
            err_code = err.code(),
            $($field)*
        );
    }};
}

#[cfg(test)]
mod tests {
    use crate::core_types::schema::{
        EVENT_END, EVENT_END_ERROR, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    };
    use crate::logging_facility::test_capture::TestCaptureLayer;
    use crate::PocketError;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_macros_emit_schema_fields() {
        let (layer, capture) = TestCaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            log_op_start!("load", path = "a.toml");
            log_op_end!("load", duration_ms = 4);
            log_op_error!("load", PocketError::MissingTemplate, duration_ms = 5);
        });

        capture.assert_event_exists("load", "start");
        let end = capture.find("load", EVENT_END).unwrap();
        assert_eq!(end.field(FIELD_DURATION_MS), Some("4"));

        let error = capture.find("load", EVENT_END_ERROR).unwrap();
        assert_eq!(error.field(FIELD_ERR_CODE), Some("ERR_MISSING_TEMPLATE"));
        assert_eq!(error.field(FIELD_ERR_KIND), Some("MissingTemplate"));
        assert_eq!(error.level, tracing::Level::ERROR);
    }
}

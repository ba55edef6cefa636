// Diagnostics emitted into tracing; this binary owns the global subscriber.

mod common;

use common::new_logger;
use pocketlog_core::logging_facility::{init_test_capture, subscribe_tracing};
use pocketlog_core::core_types::schema::{FIELD_CATEGORY, FIELD_ERR_CODE};
use pocketlog_core::{args, log_op_end, log_op_error, log_op_start, PocketError};

#[test]
fn test_macros_and_forwarded_events_are_captured() {
    let capture = init_test_capture();

    log_op_start!("render_cli", template_len = 5);
    log_op_end!("render_cli", duration_ms = 2);
    log_op_error!("publish", PocketError::MissingTemplate, duration_ms = 0);

    capture.assert_event_exists("render_cli", "start");
    capture.assert_event_exists("render_cli", "end");
    let error = capture.find("publish", "end_error").unwrap();
    assert_eq!(error.field(FIELD_ERR_CODE), Some("ERR_MISSING_TEMPLATE"));

    let log = new_logger("bridge");
    let _sub = subscribe_tracing(log.hub());
    log.warning("disk at {pct:P0}", args![0.93]);

    let forwarded = capture.count_events(|e| {
        e.field(FIELD_CATEGORY) == Some("bridge") && e.message.as_deref() == Some("disk at 93 %")
    });
    assert_eq!(forwarded, 1);

    // First use of a template is reported at trace level.
    assert!(capture.count_events(|e| e.op.as_deref() == Some("compile_template")) >= 1);
}

//! Structured logging facility
//!
//! Two things live here:
//! - the crate's own diagnostics: a single initialization point via
//!   `init(profile)`, the `log_op_start!` / `log_op_end!` / `log_op_error!`
//!   macros and a test capture layer for assertions
//! - [`TracingSink`], which forwards published [`LogEvent`](crate::LogEvent)s
//!   into `tracing` so they reach whatever subscriber `init` installed
//!
//! # Usage
//!
//! ```rust
//! use pocketlog_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;
pub mod tracing_sink;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
pub use tracing_sink::{subscribe_tracing, TracingSink};

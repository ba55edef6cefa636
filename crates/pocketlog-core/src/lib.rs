//! pocketlog core - message templates for structured logging
//!
//! This crate provides:
//! - Template parsing with `{name}` / `{name:spec}` placeholders
//! - A concurrency-safe registry of compiled templates
//! - Rendering of positional arguments and named properties into text plus
//!   ordered structured properties, with overflow handling
//! - Culture-aware single-value formatting for format specs
//! - Lazily evaluated log events, a synchronous event hub, loggers and
//!   operation loggers
//! - Telemetry export, per-test log collection and a bridge into `tracing`
//!
//! ```
//! use pocketlog_core::{args, Property, TemplateRegistry};
//!
//! let registry = TemplateRegistry::new();
//! let template = registry.get_or_create("{user} bought {count:00} items");
//! let result = template.render(&args!["ann", 3, "extra"], &[Property::new("cart", 7)]);
//!
//! assert_eq!(result.text(), "ann bought 03 items +[ extra, (cart, 7) ]");
//! assert_eq!(result.len(), 3);
//! ```

pub mod config;
pub mod culture;
pub mod errors;
pub mod event;
pub mod format_spec;
pub mod hub;
pub mod logger;
pub mod logging_facility;
pub mod registry;
pub mod result;
pub mod telemetry;
pub mod template;
pub mod test_log;
pub mod value;

pub use pocketlog_core_types as core_types;

// Re-export commonly used types
pub use config::LoggerConfig;
pub use culture::Culture;
pub use errors::{ErrorKind, PocketError, Result};
pub use event::{LogEvent, LogLevel, Operation};
pub use hub::{EventHub, Subscription};
pub use logger::{Logger, OperationLogger};
pub use registry::TemplateRegistry;
pub use result::{FormatResult, Property};
pub use template::{Template, Token};
pub use test_log::TestLog;
pub use value::{Loggable, Value};

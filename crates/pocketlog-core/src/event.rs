//! Log events handed to subscribers
//!
//! An event never carries a rendered message. It carries an evaluator that
//! renders on demand, so formatting is only paid for by subscribers that read
//! the message, and every call to [`LogEvent::evaluate`] renders afresh.

use crate::culture::Culture;
use crate::errors::{PocketError, Result};
use crate::format_spec;
use crate::result::{FormatResult, Property};
use crate::template::Template;
use crate::value::Value;
use chrono::{DateTime, Utc};
use pocketlog_core_types::OperationId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Severity of a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LogLevel {
    /// Structured telemetry, not a diagnostic message
    Telemetry = 0,
    Trace = 1,
    Debug = 2,
    Information = 3,
    Warning = 4,
    Error = 5,
    Critical = 6,
}

impl LogLevel {
    /// Short label used in rendered lines
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Telemetry => "TEL",
            LogLevel::Trace => "TRC",
            LogLevel::Debug => "DBG",
            LogLevel::Information => "INF",
            LogLevel::Warning => "WRN",
            LogLevel::Error => "ERR",
            LogLevel::Critical => "CRT",
        }
    }
}

/// Where an event sits in the lifetime of a logical operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operation {
    pub id: Option<OperationId>,
    pub parent_id: Option<OperationId>,
    pub is_start: bool,
    pub is_end: bool,
    pub is_successful: Option<bool>,
    pub duration: Option<Duration>,
}

/// Deferred message rendering
pub type Evaluator = Arc<dyn Fn() -> FormatResult + Send + Sync>;

/// Error attached to an event
pub type EventError = Arc<dyn std::error::Error + Send + Sync>;

/// A log event as delivered to subscribers
#[derive(Clone)]
pub struct LogEvent {
    pub level: LogLevel,
    pub timestamp_utc: DateTime<Utc>,
    pub exception: Option<EventError>,
    pub operation_name: Option<String>,
    pub category: String,
    pub operation: Operation,
    evaluate: Evaluator,
}

impl LogEvent {
    pub fn builder() -> LogEventBuilder {
        LogEventBuilder::default()
    }

    /// Render the message and structured properties.
    ///
    /// Not memoized: each call renders again with the calling thread's culture.
    pub fn evaluate(&self) -> FormatResult {
        (self.evaluate)()
    }

    /// One-line human rendering used by text sinks
    pub fn to_log_string(&self) -> String {
        let invariant = Culture::invariant();
        let time = format_spec::format_timestamp(&self.timestamp_utc, "HH:mm:ss.fff", &invariant)
            .unwrap_or_default();
        let mut line = format!("{} {} ", time, self.level.label());

        if !self.category.is_empty() {
            line.push_str(&format!("[{}] ", self.category));
        }
        if let Some(name) = &self.operation_name {
            line.push_str(&format!("[{}] ", name));
        }

        if self.operation.is_start {
            line.push_str("▶ ");
        } else if self.operation.is_end {
            line.push_str("⏹ -> ");
            match self.operation.is_successful {
                Some(true) => line.push_str("✔ "),
                Some(false) => line.push_str("✖ "),
                None => {}
            }
            if let Some(duration) = self.operation.duration {
                line.push_str(&format!("({}ms) ", duration.as_millis()));
            }
        }

        line.push_str(self.evaluate().text());

        if let Some(err) = &self.exception {
            line.push_str(&format!("\n{}", err));
        }
        line
    }
}

impl fmt::Debug for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEvent")
            .field("level", &self.level)
            .field("timestamp_utc", &self.timestamp_utc)
            .field("category", &self.category)
            .field("operation_name", &self.operation_name)
            .field("operation", &self.operation)
            .field("exception", &self.exception.as_ref().map(|e| e.to_string()))
            .finish_non_exhaustive()
    }
}

/// Builder for [`LogEvent`]
#[derive(Default)]
pub struct LogEventBuilder {
    level: Option<LogLevel>,
    timestamp_utc: Option<DateTime<Utc>>,
    template: Option<Arc<Template>>,
    args: Vec<Value>,
    named: Vec<Property>,
    exception: Option<EventError>,
    operation_name: Option<String>,
    category: String,
    operation: Operation,
}

impl LogEventBuilder {
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn timestamp(mut self, timestamp_utc: DateTime<Utc>) -> Self {
        self.timestamp_utc = Some(timestamp_utc);
        self
    }

    pub fn template(mut self, template: Arc<Template>) -> Self {
        self.template = Some(template);
        self
    }

    pub fn args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.push(Property::new(name, value));
        self
    }

    pub fn properties(mut self, named: Vec<Property>) -> Self {
        self.named.extend(named);
        self
    }

    pub fn exception(mut self, err: EventError) -> Self {
        self.exception = Some(err);
        self
    }

    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    /// Finish the event.
    ///
    /// # Errors
    ///
    /// `MissingTemplate` if no template was supplied.
    pub fn build(self) -> Result<LogEvent> {
        let template = self.template.ok_or(PocketError::MissingTemplate)?;
        let args = self.args;
        let named = self.named;

        Ok(LogEvent {
            level: self.level.unwrap_or(LogLevel::Information),
            timestamp_utc: self.timestamp_utc.unwrap_or_else(Utc::now),
            exception: self.exception,
            operation_name: self.operation_name,
            category: self.category,
            operation: self.operation,
            evaluate: Arc::new(move || template.render(&args, &named)),
        })
    }
}

//! Telemetry export
//!
//! Translates log events into telemetry records. Each event becomes exactly
//! one record:
//!
//! | event                          | record       |
//! |--------------------------------|--------------|
//! | level is `Telemetry`           | `Event`      |
//! | end of an operation            | `Dependency` |
//! | carries an exception           | `Exception`  |
//! | anything else                  | `Trace`      |
//!
//! Every record gets a `Category` property and the operation context of the
//! event.

use crate::errors::{PocketError, Result};
use crate::event::{LogEvent, LogLevel};
use crate::hub::{EventHub, Subscription};
use crate::result::Property;
use crate::value::Value;
use chrono::{DateTime, Utc};
use pocketlog_core_types::schema::{PROPERTY_CATEGORY, PROPERTY_REQUEST_URI, PROPERTY_RESULT_CODE};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeverityLevel {
    Verbose,
    Information,
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for SeverityLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace | LogLevel::Debug => SeverityLevel::Verbose,
            LogLevel::Information => SeverityLevel::Information,
            LogLevel::Warning => SeverityLevel::Warning,
            LogLevel::Error => SeverityLevel::Error,
            LogLevel::Critical => SeverityLevel::Critical,
            LogLevel::Telemetry => SeverityLevel::Information,
        }
    }
}

/// Operation correlation attached to every record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TelemetryContext {
    pub operation_name: Option<String>,
    pub operation_id: Option<String>,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TelemetryRecord {
    Event {
        name: Option<String>,
        properties: BTreeMap<String, String>,
        metrics: BTreeMap<String, f64>,
        context: TelemetryContext,
    },
    Dependency {
        id: Option<String>,
        name: Option<String>,
        data: Option<String>,
        result_code: Option<String>,
        duration: Duration,
        success: Option<bool>,
        timestamp: DateTime<Utc>,
        properties: BTreeMap<String, String>,
        context: TelemetryContext,
    },
    Exception {
        message: String,
        exception: String,
        severity: SeverityLevel,
        properties: BTreeMap<String, String>,
        context: TelemetryContext,
    },
    Trace {
        message: String,
        severity: SeverityLevel,
        properties: BTreeMap<String, String>,
        context: TelemetryContext,
    },
}

impl TelemetryRecord {
    pub fn properties(&self) -> &BTreeMap<String, String> {
        match self {
            TelemetryRecord::Event { properties, .. }
            | TelemetryRecord::Dependency { properties, .. }
            | TelemetryRecord::Exception { properties, .. }
            | TelemetryRecord::Trace { properties, .. } => properties,
        }
    }

    pub fn context(&self) -> &TelemetryContext {
        match self {
            TelemetryRecord::Event { context, .. }
            | TelemetryRecord::Dependency { context, .. }
            | TelemetryRecord::Exception { context, .. }
            | TelemetryRecord::Trace { context, .. } => context,
        }
    }
}

/// Receiver of telemetry records
pub trait TelemetrySink: Send + Sync {
    fn track(&self, record: TelemetryRecord);
}

/// Route every event published on `hub` to `sink`.
#[must_use = "dropping the subscription stops export"]
pub fn subscribe_telemetry(hub: &EventHub, sink: Arc<dyn TelemetrySink>) -> Subscription {
    hub.subscribe(move |event| sink.track(to_record(event)))
}

/// Translate one event.
pub fn to_record(event: &LogEvent) -> TelemetryRecord {
    let result = event.evaluate();
    let context = TelemetryContext {
        operation_name: event.operation_name.clone(),
        operation_id: event.operation.id.as_ref().map(|id| id.to_string()),
        parent_id: event.operation.parent_id.as_ref().map(|id| id.to_string()),
    };

    if event.level == LogLevel::Telemetry {
        let mut properties = BTreeMap::new();
        let mut metrics = BTreeMap::new();
        for property in result.properties() {
            match &property.value {
                Value::Metric { name, value } => {
                    metrics.insert(name.to_string(), *value);
                }
                other => {
                    properties.insert(property.name.clone(), other.to_log_string());
                }
            }
        }
        properties.insert(PROPERTY_CATEGORY.to_string(), event.category.clone());
        return TelemetryRecord::Event {
            name: event.operation_name.clone(),
            properties,
            metrics,
            context,
        };
    }

    let mut properties = non_metric_properties(result.properties());
    properties.insert(PROPERTY_CATEGORY.to_string(), event.category.clone());

    if event.operation.is_end {
        return TelemetryRecord::Dependency {
            id: event.operation.id.as_ref().map(|id| id.to_string()),
            name: event.operation_name.clone(),
            data: result.find(PROPERTY_REQUEST_URI).map(Value::to_log_string),
            result_code: result.find(PROPERTY_RESULT_CODE).map(Value::to_log_string),
            duration: event.operation.duration.unwrap_or_default(),
            success: event.operation.is_successful,
            timestamp: event.timestamp_utc,
            properties,
            context,
        };
    }

    let (message, _) = result.into_parts();
    match &event.exception {
        Some(err) => TelemetryRecord::Exception {
            message,
            exception: err.to_string(),
            severity: event.level.into(),
            properties,
            context,
        },
        None => TelemetryRecord::Trace {
            message,
            severity: event.level.into(),
            properties,
            context,
        },
    }
}

fn non_metric_properties(properties: &[Property]) -> BTreeMap<String, String> {
    properties
        .iter()
        .filter(|p| !matches!(p.value, Value::Metric { .. }))
        .map(|p| (p.name.clone(), p.value.to_log_string()))
        .collect()
}

/// Writes each record as one JSON line
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Write one record.
    ///
    /// # Errors
    ///
    /// `Io` if serialization or the write fails.
    pub fn write_record(&self, record: &TelemetryRecord) -> Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| PocketError::io("telemetry", e.into()))?;
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        writeln!(writer, "{}", line).map_err(|e| PocketError::io("telemetry", e))
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> TelemetrySink for JsonLinesSink<W> {
    fn track(&self, record: TelemetryRecord) {
        if let Err(err) = self.write_record(&record) {
            tracing::warn!(
                component = module_path!(),
                op = "track",
                err_code = err.code(),
                "telemetry write failed: {}",
                err
            );
        }
    }
}

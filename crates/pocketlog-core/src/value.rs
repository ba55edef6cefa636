//! Values bound to template placeholders
//!
//! [`Value`] is the closed set of things a log call can carry. Application
//! types plug in through [`Loggable`], which exposes the two capabilities the
//! renderer asks for: a log-string representation and optional culture-aware
//! formatting for a spec.

use crate::culture::Culture;
use crate::format_spec;
use chrono::{DateTime, Utc};
use pocketlog_core_types::Sensitive;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Rendering capabilities of an application-defined log value
pub trait Loggable: Send + Sync {
    /// Default textual representation in log messages
    fn to_log_string(&self) -> String;

    /// Render with a format spec, or `None` if the spec is not supported.
    ///
    /// Returning `None` makes the renderer fall back to
    /// [`Loggable::to_log_string`].
    fn format_with(&self, _spec: &str, _culture: &Culture) -> Option<String> {
        None
    }
}

impl<T: Send + Sync> Loggable for Sensitive<T> {
    fn to_log_string(&self) -> String {
        self.to_string()
    }
}

/// A value bound to a placeholder or carried as a named property
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(Arc<str>),
    Timestamp(DateTime<Utc>),
    Duration(Duration),
    List(Vec<Value>),
    /// A named measurement; telemetry exporters report these as metrics
    Metric { name: Arc<str>, value: f64 },
    Custom(Arc<dyn Loggable>),
}

impl Value {
    /// Wrap an application type
    pub fn custom(value: impl Loggable + 'static) -> Self {
        Value::Custom(Arc::new(value))
    }

    /// Build a metric value
    pub fn metric(name: impl Into<Arc<str>>, value: f64) -> Self {
        Value::Metric {
            name: name.into(),
            value,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The default log-string representation.
    ///
    /// `Null` renders as `null`, lists as `[ a, b ]` and metrics as the pair
    /// `(name, value)`.
    pub fn to_log_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::UInt(u) => u.to_string(),
            Value::Float(f) => float_log_string(*f),
            Value::Str(s) => s.to_string(),
            Value::Timestamp(ts) => ts.to_rfc3339(),
            Value::Duration(d) => format_spec::format_duration(*d, "c").unwrap_or_default(),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(Value::to_log_string).collect();
                format!("[ {} ]", rendered.join(", "))
            }
            Value::Metric { name, value } => format!("({}, {})", name, float_log_string(*value)),
            Value::Custom(custom) => custom.to_log_string(),
        }
    }

    /// Culture-aware formatting, if this value supports `spec`
    pub fn format_with(&self, spec: &str, culture: &Culture) -> Option<String> {
        match self {
            Value::Int(i) => format_spec::format_integer(i128::from(*i), spec, culture),
            Value::UInt(u) => format_spec::format_integer(i128::from(*u), spec, culture),
            Value::Float(f) => format_spec::format_float(*f, spec, culture),
            Value::Timestamp(ts) => format_spec::format_timestamp(ts, spec, culture),
            Value::Duration(d) => format_spec::format_duration(*d, spec),
            Value::Metric { value, .. } => format_spec::format_float(*value, spec, culture),
            Value::Custom(custom) => custom.format_with(spec, culture),
            Value::Null | Value::Bool(_) | Value::Str(_) | Value::List(_) => None,
        }
    }

    /// Render for a placeholder: the format spec when supported, else the log string.
    pub fn render(&self, spec: Option<&str>, culture: &Culture) -> String {
        spec.filter(|s| !s.is_empty())
            .and_then(|s| self.format_with(s, culture))
            .unwrap_or_else(|| self.to_log_string())
    }

    /// Lossless JSON view for exporters and the CLI
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::UInt(u) => serde_json::Value::from(*u),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(float_log_string(*f))),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Metric { name, value } => serde_json::json!({ "name": &**name, "value": value }),
            other => serde_json::Value::String(other.to_log_string()),
        }
    }
}

fn float_log_string(value: f64) -> String {
    format_spec::non_finite(value)
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Custom(c) => write!(f, "Custom({})", c.to_log_string()),
            other => write!(f, "{}", other.to_log_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_log_string())
    }
}

/// Structural equality; custom values compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Int(a), Value::UInt(b)) | (Value::UInt(b), Value::Int(a)) => {
                u64::try_from(*a).map(|a| a == *b).unwrap_or(false)
            }
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (
                Value::Metric { name: n1, value: v1 },
                Value::Metric { name: n2, value: v2 },
            ) => n1 == n2 && v1 == v2,
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(<$cast>::from(v))
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
    DateTime<Utc> => Timestamp as DateTime<Utc>,
    Duration => Duration as Duration,
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(Arc::from(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Send + Sync + 'static> From<Sensitive<T>> for Value {
    fn from(v: Sensitive<T>) -> Self {
        Value::custom(v)
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions
///
/// ```
/// use pocketlog_core::{args, Value};
///
/// let values = args![1, "two", 3.0];
/// assert_eq!(values[1], Value::from("two"));
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Value>::new() };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}

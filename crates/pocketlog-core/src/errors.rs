use thiserror::Error;

/// Result type alias using PocketError
pub type Result<T> = std::result::Result<T, PocketError>;

/// Canonical error kind taxonomy
///
/// Formatting itself never fails; these kinds cover the programming errors
/// and boundary failures around it. Each kind maps to a stable code that is
/// attached to structured log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A log event was built without a template
    MissingTemplate,
    /// A named property could not be parsed from `name=value` form
    InvalidProperty,
    /// Configuration could not be parsed
    InvalidConfig,
    /// Filesystem failure in a file-backed sink
    Io,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingTemplate => "ERR_MISSING_TEMPLATE",
            ErrorKind::InvalidProperty => "ERR_INVALID_PROPERTY",
            ErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ErrorKind::Io => "ERR_IO",
        }
    }
}

/// Errors raised around the formatter
#[derive(Error, Debug)]
pub enum PocketError {
    /// A log event needs a template; an absent one is a caller bug
    #[error("Message template is required")]
    MissingTemplate,

    /// Named property not in `name=value` form
    #[error("Invalid named property '{input}': expected name=value")]
    InvalidProperty { input: String },

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Underlying I/O failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PocketError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            PocketError::MissingTemplate => ErrorKind::MissingTemplate,
            PocketError::InvalidProperty { .. } => ErrorKind::InvalidProperty,
            PocketError::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            PocketError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        PocketError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for PocketError {
    fn from(err: toml::de::Error) -> Self {
        PocketError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(PocketError::MissingTemplate.code(), "ERR_MISSING_TEMPLATE");
        assert_eq!(
            PocketError::InvalidProperty {
                input: "x".to_string()
            }
            .code(),
            "ERR_INVALID_PROPERTY"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = PocketError::io(
            "/tmp/x.log",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("/tmp/x.log"));
    }
}

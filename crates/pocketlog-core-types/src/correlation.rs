//! Correlation types for operation tracking
//!
//! An operation (a logical unit of work with a start and an end) is identified
//! by an [`OperationId`]. Nested operations carry the id of their parent in an
//! [`OperationContext`] so that telemetry exporters can rebuild the hierarchy.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a logical operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(String);

impl OperationId {
    /// Generate a new random OperationId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Derive the id of a child operation.
    ///
    /// Child ids are prefixed with the parent id so that the relationship is
    /// visible in flat log output, e.g. `0190...-a1b2.1`.
    pub fn child(&self, ordinal: u32) -> Self {
        Self(format!("{}.{}", self.0, ordinal))
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through operation boundaries for correlation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    pub operation_id: OperationId,
    pub parent_id: Option<OperationId>,
}

impl OperationContext {
    /// Create a root context with a fresh OperationId
    pub fn new() -> Self {
        Self {
            operation_id: OperationId::new(),
            parent_id: None,
        }
    }

    /// Create a context with an existing OperationId
    pub fn with_operation_id(operation_id: OperationId) -> Self {
        Self {
            operation_id,
            parent_id: None,
        }
    }

    /// Create the context of a child operation
    pub fn child(&self, ordinal: u32) -> Self {
        Self {
            operation_id: self.operation_id.child(ordinal),
            parent_id: Some(self.operation_id.clone()),
        }
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}

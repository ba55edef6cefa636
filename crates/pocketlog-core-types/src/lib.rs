//! Core types shared across the pocketlog crates
//!
//! - **Correlation types**: OperationId, OperationContext
//! - **Sensitive data**: Sensitive<T> marker that never renders its contents
//! - **Schema constants**: canonical field keys, event names and property names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{OperationContext, OperationId};
pub use sensitive::Sensitive;

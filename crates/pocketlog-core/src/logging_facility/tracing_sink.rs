//! Forward published log events into `tracing`

use crate::event::{LogEvent, LogLevel};
use crate::hub::{EventHub, Subscription};

/// Re-emits [`LogEvent`]s as tracing events at the matching level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn forward(&self, event: &LogEvent) {
        let result = event.evaluate();
        let message = result.text();
        let category = event.category.as_str();
        let operation_name = event.operation_name.as_deref().unwrap_or_default();
        let operation_id = event
            .operation
            .id
            .as_ref()
            .map(|id| id.as_str())
            .unwrap_or_default();

        match event.level {
            LogLevel::Trace => {
                tracing::trace!(category, operation_name, operation_id, "{}", message)
            }
            LogLevel::Debug => {
                tracing::debug!(category, operation_name, operation_id, "{}", message)
            }
            LogLevel::Information | LogLevel::Telemetry => {
                tracing::info!(category, operation_name, operation_id, "{}", message)
            }
            LogLevel::Warning => {
                tracing::warn!(category, operation_name, operation_id, "{}", message)
            }
            LogLevel::Error | LogLevel::Critical => match &event.exception {
                Some(err) => tracing::error!(
                    category,
                    operation_name,
                    operation_id,
                    error = %err,
                    "{}",
                    message
                ),
                None => tracing::error!(category, operation_name, operation_id, "{}", message),
            },
        }
    }
}

/// Forward every event published on `hub` to tracing.
#[must_use = "dropping the subscription stops forwarding"]
pub fn subscribe_tracing(hub: &EventHub) -> Subscription {
    let sink = TracingSink;
    hub.subscribe(move |event| sink.forward(event))
}

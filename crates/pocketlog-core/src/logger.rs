//! Loggers that publish lazily rendered events
//!
//! A [`Logger`] compiles its templates through a shared
//! [`TemplateRegistry`] and publishes to an [`EventHub`]. Nothing is rendered
//! at the call site; subscribers call [`LogEvent::evaluate`] when they need
//! the message.

use crate::event::{EventError, LogEvent, LogLevel, Operation};
use crate::hub::EventHub;
use crate::registry::TemplateRegistry;
use crate::result::Property;
use crate::template::Template;
use crate::value::Value;
use pocketlog_core_types::OperationContext;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Category-scoped event publisher
#[derive(Clone)]
pub struct Logger {
    category: String,
    registry: Arc<TemplateRegistry>,
    hub: EventHub,
}

impl Logger {
    pub fn new(
        category: impl Into<String>,
        registry: Arc<TemplateRegistry>,
        hub: EventHub,
    ) -> Self {
        Self {
            category: category.into(),
            registry,
            hub,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn registry(&self) -> &Arc<TemplateRegistry> {
        &self.registry
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    /// A logger for a different category sharing registry and hub
    pub fn for_category(&self, category: impl Into<String>) -> Self {
        Self::new(category, Arc::clone(&self.registry), self.hub.clone())
    }

    pub fn log(&self, level: LogLevel, template: &str, args: Vec<Value>) {
        self.publish(level, template, args, Vec::new(), None, None, Operation::default());
    }

    pub fn log_with(
        &self,
        level: LogLevel,
        template: &str,
        args: Vec<Value>,
        named: Vec<Property>,
    ) {
        self.publish(level, template, args, named, None, None, Operation::default());
    }

    pub fn trace(&self, template: &str, args: Vec<Value>) {
        self.log(LogLevel::Trace, template, args);
    }

    pub fn debug(&self, template: &str, args: Vec<Value>) {
        self.log(LogLevel::Debug, template, args);
    }

    pub fn info(&self, template: &str, args: Vec<Value>) {
        self.log(LogLevel::Information, template, args);
    }

    pub fn warning(&self, template: &str, args: Vec<Value>) {
        self.log(LogLevel::Warning, template, args);
    }

    pub fn error(&self, err: EventError, template: &str, args: Vec<Value>) {
        self.publish(
            LogLevel::Error,
            template,
            args,
            Vec::new(),
            Some(err),
            None,
            Operation::default(),
        );
    }

    pub fn critical(&self, err: EventError, template: &str, args: Vec<Value>) {
        self.publish(
            LogLevel::Critical,
            template,
            args,
            Vec::new(),
            Some(err),
            None,
            Operation::default(),
        );
    }

    /// Publish a named telemetry event; `properties` become its structured
    /// data (use [`Value::metric`] for measurements). Property names are taken
    /// verbatim, whatever characters they contain.
    pub fn telemetry(&self, name: &str, properties: Vec<Property>) {
        if !self.hub.has_subscribers() {
            return;
        }
        let names: Vec<&str> = properties.iter().map(|p| p.name.as_str()).collect();
        let template = Arc::new(Template::from_names(&names));
        let args = properties.into_iter().map(|p| p.value).collect();
        self.publish_compiled(
            LogLevel::Telemetry,
            template,
            args,
            Vec::new(),
            None,
            Some(name.to_string()),
            Operation::default(),
        );
    }

    /// Start a logical operation; the start event is published immediately.
    pub fn begin_operation(&self, name: &str) -> OperationLogger {
        OperationLogger::start(self.clone(), name.to_string(), OperationContext::new(), true)
    }

    /// Start an operation that only logs its end
    pub fn confirm_on_exit(&self, name: &str) -> OperationLogger {
        OperationLogger::start(self.clone(), name.to_string(), OperationContext::new(), false)
    }

    #[allow(clippy::too_many_arguments)]
    fn publish(
        &self,
        level: LogLevel,
        template: &str,
        args: Vec<Value>,
        named: Vec<Property>,
        exception: Option<EventError>,
        operation_name: Option<String>,
        operation: Operation,
    ) {
        if !self.hub.has_subscribers() {
            return;
        }
        let compiled = self.registry.get_or_create(template);
        self.publish_compiled(level, compiled, args, named, exception, operation_name, operation);
    }

    #[allow(clippy::too_many_arguments)]
    fn publish_compiled(
        &self,
        level: LogLevel,
        template: Arc<Template>,
        args: Vec<Value>,
        named: Vec<Property>,
        exception: Option<EventError>,
        operation_name: Option<String>,
        operation: Operation,
    ) {
        let mut builder = LogEvent::builder()
            .level(level)
            .category(self.category.clone())
            .template(template)
            .args(args)
            .properties(named)
            .operation(operation);
        if let Some(err) = exception {
            builder = builder.exception(err);
        }
        if let Some(name) = operation_name {
            builder = builder.operation_name(name);
        }

        match builder.build() {
            Ok(event) => self.hub.publish(&event),
            Err(err) => tracing::warn!(
                component = module_path!(),
                op = "publish",
                err_code = err.code(),
                "dropped log event"
            ),
        }
    }
}

/// Logs the start, inner events and end of one logical operation
///
/// If neither [`succeed`](Self::succeed) nor [`fail`](Self::fail) is called,
/// dropping the logger publishes an end event with unknown outcome.
pub struct OperationLogger {
    logger: Logger,
    name: String,
    context: OperationContext,
    started: Instant,
    children: AtomicU32,
    completed: bool,
}

impl OperationLogger {
    fn start(logger: Logger, name: String, context: OperationContext, log_on_start: bool) -> Self {
        let op = Self {
            logger,
            name,
            context,
            started: Instant::now(),
            children: AtomicU32::new(0),
            completed: false,
        };
        if log_on_start {
            op.emit(
                LogLevel::Information,
                "",
                Vec::new(),
                None,
                Operation {
                    is_start: true,
                    ..op.operation()
                },
            );
        }
        op
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &OperationContext {
        &self.context
    }

    pub fn info(&self, template: &str, args: Vec<Value>) {
        self.emit(LogLevel::Information, template, args, None, self.operation());
    }

    pub fn warning(&self, template: &str, args: Vec<Value>) {
        self.emit(LogLevel::Warning, template, args, None, self.operation());
    }

    pub fn error(&self, err: EventError, template: &str, args: Vec<Value>) {
        self.emit(LogLevel::Error, template, args, Some(err), self.operation());
    }

    /// Start a nested operation whose id derives from this one
    pub fn child(&self, name: &str) -> OperationLogger {
        let ordinal = self.children.fetch_add(1, Ordering::Relaxed) + 1;
        OperationLogger::start(
            self.logger.clone(),
            name.to_string(),
            self.context.child(ordinal),
            true,
        )
    }

    /// End the operation successfully
    pub fn succeed(mut self, template: &str, args: Vec<Value>) {
        self.finish(Some(true), LogLevel::Information, template, args, None);
    }

    /// End the operation with a failure
    pub fn fail(mut self, err: EventError, template: &str, args: Vec<Value>) {
        self.finish(Some(false), LogLevel::Error, template, args, Some(err));
    }

    fn finish(
        &mut self,
        outcome: Option<bool>,
        level: LogLevel,
        template: &str,
        args: Vec<Value>,
        exception: Option<EventError>,
    ) {
        self.completed = true;
        let operation = Operation {
            is_end: true,
            is_successful: outcome,
            duration: Some(self.started.elapsed()),
            ..self.operation()
        };
        self.emit(level, template, args, exception, operation);
    }

    fn operation(&self) -> Operation {
        Operation {
            id: Some(self.context.operation_id.clone()),
            parent_id: self.context.parent_id.clone(),
            ..Operation::default()
        }
    }

    fn emit(
        &self,
        level: LogLevel,
        template: &str,
        args: Vec<Value>,
        exception: Option<EventError>,
        operation: Operation,
    ) {
        self.logger.publish(
            level,
            template,
            args,
            Vec::new(),
            exception,
            Some(self.name.clone()),
            operation,
        );
    }
}

impl Drop for OperationLogger {
    fn drop(&mut self) {
        if !self.completed {
            self.finish(None, LogLevel::Information, "", Vec::new(), None);
        }
    }
}

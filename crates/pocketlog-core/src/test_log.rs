//! Per-test log collection
//!
//! A [`TestLog`] subscribes to an [`EventHub`] for the duration of one test,
//! keeps every published event as a rendered line, and can append the same
//! lines to a file or forward them to a test runner's output. It also opens an
//! operation named after the test, so the log begins with a start event and
//! ends with an end event when the `TestLog` is dropped.

use crate::config::TestLogConfig;
use crate::errors::{PocketError, Result};
use crate::hub::{EventHub, Subscription};
use crate::logger::{Logger, OperationLogger};
use crate::template::Template;
use crate::value::Value;
use chrono::{Local, TimeZone, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const DEFAULT_FILE_NAME: &str = "{test}-{started:yyyy-MM-dd-hh-mm-ss}.log";

pub struct TestLog {
    // Dropped first so the end event still reaches the subscriptions below.
    operation: OperationLogger,
    subscriptions: Vec<Subscription>,
    hub: EventHub,
    lines: Arc<Mutex<Vec<String>>>,
    test_name: String,
    log_file: Option<PathBuf>,
}

impl TestLog {
    /// Start collecting events published through `logger`'s hub.
    ///
    /// # Errors
    ///
    /// `Io` if file output is requested and the file cannot be opened.
    pub fn new(test_name: &str, logger: &Logger, config: &TestLogConfig) -> Result<Self> {
        let hub = logger.hub();
        let lines = Arc::new(Mutex::new(Vec::new()));
        let mut subscriptions = Vec::new();

        let log_file = if config.write_to_file {
            let path = config
                .file
                .clone()
                .unwrap_or_else(|| PathBuf::from(default_file_name(test_name)));
            subscriptions.push(subscribe_file(hub, &path)?);
            Some(path)
        } else {
            None
        };

        let sink = Arc::clone(&lines);
        subscriptions.push(hub.subscribe(move |event| {
            let line = event.to_log_string();
            if let Ok(mut lines) = sink.lock() {
                lines.push(line);
            }
        }));

        let operation = logger.for_category(test_name).begin_operation(test_name);

        Ok(Self {
            operation,
            subscriptions,
            hub: hub.clone(),
            lines,
            test_name: test_name.to_string(),
            log_file,
        })
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// The operation spanning this test
    pub fn log(&self) -> &OperationLogger {
        &self.operation
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Lines collected so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Append a raw line
    pub fn write(&self, text: impl Into<String>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(text.into());
        }
    }

    /// Also forward each rendered line to `output`, e.g. a test runner's writer
    pub fn log_to<F>(&mut self, output: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let subscription = self
            .hub
            .subscribe(move |event| output(&event.to_log_string()));
        self.subscriptions.push(subscription);
    }
}

fn default_file_name(test_name: &str) -> String {
    // Local wall-clock time, carried in a UTC value so the pattern prints it as is.
    let started = Utc.from_utc_datetime(&Local::now().naive_local());
    let template = Template::parse(DEFAULT_FILE_NAME);
    template
        .render(&[Value::from(test_name), Value::Timestamp(started)], &[])
        .to_string()
}

fn subscribe_file(hub: &EventHub, path: &Path) -> Result<Subscription> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| PocketError::io(path.display().to_string(), e))?;
    let file = Mutex::new(file);
    let shown = path.display().to_string();

    Ok(hub.subscribe(move |event| {
        let line = event.to_log_string();
        let written = match file.lock() {
            Ok(mut f) => writeln!(f, "{}", line),
            Err(poisoned) => writeln!(poisoned.into_inner(), "{}", line),
        };
        if let Err(err) = written {
            tracing::warn!(
                component = module_path!(),
                op = "write_test_log",
                path = %shown,
                "failed to append log line: {}",
                err
            );
        }
    }))
}

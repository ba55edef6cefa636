#![allow(dead_code)]

use pocketlog_core::{EventHub, LogEvent, Logger, Subscription, TemplateRegistry};
use std::sync::{Arc, Mutex};

pub fn new_logger(category: &str) -> Logger {
    Logger::new(category, Arc::new(TemplateRegistry::new()), EventHub::new())
}

/// Collect every event published on `hub`
pub fn collect(hub: &EventHub) -> (Arc<Mutex<Vec<LogEvent>>>, Subscription) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let sub = hub.subscribe(move |e| sink.lock().unwrap().push(e.clone()));
    (events, sub)
}

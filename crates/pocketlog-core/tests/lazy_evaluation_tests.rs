// Deferred rendering through the event hub

mod common;

use common::{collect, new_logger};
use pocketlog_core::{args, Culture, Loggable, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts how often it is rendered
struct Probe(Arc<AtomicUsize>);

impl Loggable for Probe {
    fn to_log_string(&self) -> String {
        self.0.fetch_add(1, Ordering::SeqCst);
        "probe".to_string()
    }
}

#[test]
fn test_nothing_is_rendered_until_evaluated() {
    let log = new_logger("lazy");
    let renders = Arc::new(AtomicUsize::new(0));
    let (events, _sub) = collect(log.hub());

    log.info("value {p}", vec![Value::custom(Probe(Arc::clone(&renders)))]);
    assert_eq!(renders.load(Ordering::SeqCst), 0);

    let events = events.lock().unwrap();
    assert_eq!(events[0].evaluate().text(), "value probe");
    assert_eq!(renders.load(Ordering::SeqCst), 1);
}

#[test]
fn test_each_subscriber_evaluation_renders_again() {
    let log = new_logger("lazy");
    let renders = Arc::new(AtomicUsize::new(0));

    let subs: Vec<_> = (0..3)
        .map(|_| log.hub().subscribe(|e| {
            let _ = e.evaluate();
        }))
        .collect();

    log.info("{p}", vec![Value::custom(Probe(Arc::clone(&renders)))]);
    assert_eq!(renders.load(Ordering::SeqCst), 3);
    drop(subs);
}

#[test]
fn test_without_subscribers_nothing_is_rendered() {
    let log = new_logger("lazy");
    let renders = Arc::new(AtomicUsize::new(0));
    log.info("{p}", vec![Value::custom(Probe(Arc::clone(&renders)))]);
    assert_eq!(renders.load(Ordering::SeqCst), 0);
}

#[test]
fn test_evaluation_uses_subscriber_culture() {
    let log = new_logger("lazy");
    let (events, _sub) = collect(log.hub());
    log.info("total {t:N2}", args![9876.5]);

    let events = events.lock().unwrap();
    let fr = Culture::by_name("fr-FR").unwrap();
    assert_eq!(events[0].evaluate().text(), "total 9,876.50");
    assert_eq!(fr.scope(|| events[0].evaluate().text().to_string()), "total 9\u{202f}876,50");
}

//! Synchronous publish/subscribe for log events
//!
//! Subscribers run on the publishing thread, in subscription order. A
//! [`Subscription`] guard removes its handler when dropped.

use crate::event::LogEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

type Handler = Arc<dyn Fn(&LogEvent) + Send + Sync>;

#[derive(Default)]
struct HubInner {
    next_id: AtomicU64,
    subscribers: RwLock<Vec<(u64, Handler)>>,
}

/// Distributes events to subscribers
///
/// Cheap to clone; clones share the same subscriber list.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Arc<HubInner>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; it stays registered until the guard is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&LogEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let mut subscribers = match self.inner.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.push((id, Arc::new(handler)));
        Subscription {
            id,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every current subscriber.
    ///
    /// Handlers are invoked outside the lock, so a handler may subscribe or
    /// unsubscribe without deadlocking.
    pub fn publish(&self, event: &LogEvent) {
        let handlers: Vec<Handler> = match self.inner.subscribers.read() {
            Ok(guard) => guard.iter().map(|(_, h)| Arc::clone(h)).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(|(_, h)| Arc::clone(h)).collect(),
        };
        for handler in handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        match self.inner.subscribers.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn has_subscribers(&self) -> bool {
        self.subscriber_count() > 0
    }
}

/// Unsubscribes its handler on drop
pub struct Subscription {
    id: u64,
    hub: Weak<HubInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            let mut subscribers = match hub.subscribers.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Template;
    use std::sync::atomic::AtomicUsize;

    fn event() -> LogEvent {
        LogEvent::builder()
            .template(Arc::new(Template::parse("tick")))
            .build()
            .unwrap()
    }

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let hub = EventHub::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c1 = Arc::clone(&count);
        let _s1 = hub.subscribe(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        let c2 = Arc::clone(&count);
        let _s2 = hub.subscribe(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        });

        hub.publish(&event());
        assert_eq!(count.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let hub = EventHub::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let sub = hub.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(hub.subscriber_count(), 1);

        drop(sub);
        hub.publish(&event());
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!hub.has_subscribers());
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = EventHub::new();
        let sub = hub.subscribe(|_| {});
        drop(hub);
        drop(sub);
    }

    #[test]
    fn test_each_subscriber_evaluates_independently() {
        let hub = EventHub::new();
        let evaluations = Arc::new(AtomicUsize::new(0));

        let subs: Vec<Subscription> = (0..3)
            .map(|_| {
                let evaluations = Arc::clone(&evaluations);
                hub.subscribe(move |e| {
                    let _ = e.evaluate();
                    evaluations.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        hub.publish(&event());
        assert_eq!(evaluations.load(Ordering::SeqCst), 3);
        drop(subs);
    }
}

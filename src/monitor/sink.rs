//! Fan-out of committed events to registered listeners

use super::event::ChangeEvent;

/// Consumer of monitor events.
///
/// Called on the monitor task itself; a slow listener delays the next poll.
pub trait EventListener: Send {
    fn on_event(&mut self, event: &ChangeEvent);

    /// Called once after all events of a commit were delivered
    fn on_commit(&mut self) {}
}

impl<F> EventListener for F
where
    F: FnMut(&ChangeEvent) + Send,
{
    fn on_event(&mut self, event: &ChangeEvent) {
        self(event)
    }
}

/// Ordered list of listeners
#[derive(Default)]
pub struct EventSink {
    listeners: Vec<Box<dyn EventListener>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver a batch of events. An empty batch is not a commit at all.
    /// Returns whether anything was delivered.
    pub fn commit(&mut self, events: &[ChangeEvent]) -> bool {
        if events.is_empty() {
            return false;
        }

        for event in events {
            for listener in self.listeners.iter_mut() {
                listener.on_event(event);
            }
        }
        for listener in self.listeners.iter_mut() {
            listener.on_commit();
        }

        true
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::models::ContestPhase;

    struct Tagged {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl EventListener for Tagged {
        fn on_event(&mut self, event: &ChangeEvent) {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.tag, event.kind()));
        }

        fn on_commit(&mut self) {
            self.log.lock().unwrap().push(format!("{}:commit", self.tag));
        }
    }

    #[test]
    fn test_registration_order_fan_out() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut sink = EventSink::new();
        sink.register(Box::new(Tagged { tag: "first", log: log.clone() }));
        sink.register(Box::new(Tagged { tag: "second", log: log.clone() }));

        let delivered = sink.commit(&[
            ChangeEvent::PhaseChanged(ContestPhase::Coding),
            ChangeEvent::RankChanged(3),
        ]);

        assert!(delivered);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "first:phase",
                "second:phase",
                "first:rank",
                "second:rank",
                "first:commit",
                "second:commit",
            ]
        );
    }

    #[test]
    fn test_empty_batch_is_not_committed() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut sink = EventSink::new();
        sink.register(Box::new(Tagged { tag: "only", log: log.clone() }));

        assert!(!sink.commit(&[]));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_closure_listener() {
        let seen = Arc::new(Mutex::new(0));
        let counter = seen.clone();
        let mut sink = EventSink::new();
        sink.register(Box::new(move |_: &ChangeEvent| {
            *counter.lock().unwrap() += 1;
        }));

        sink.commit(&[ChangeEvent::RankChanged(1), ChangeEvent::RankChanged(2)]);
        assert_eq!(*seen.lock().unwrap(), 2);
        assert_eq!(sink.len(), 1);
    }
}

//! Theme change notifications
//!
//! Every explicit toggle broadcasts a `themeChanged` event carrying
//! `{ "theme": "light" | "dark" }`. Delivery is synchronous; listeners that
//! subscribe later do not see earlier events.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::theme::Theme;

/// DOM event name used on the window.
pub const THEME_CHANGED: &str = "themeChanged";

/// Events published by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail", rename_all = "camelCase")]
pub enum ThemeEvent {
    ThemeChanged { theme: Theme },
}

/// Payload attached to the DOM `CustomEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChangeDetail {
    pub theme: Theme,
}

impl ThemeEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ThemeEvent::ThemeChanged { .. } => THEME_CHANGED,
        }
    }

    pub fn detail(&self) -> ThemeChangeDetail {
        match *self {
            ThemeEvent::ThemeChanged { theme } => ThemeChangeDetail { theme },
        }
    }
}

/// Where the controller broadcasts events.
pub trait EventSink {
    fn emit(&self, event: &ThemeEvent) -> Result<()>;
}

type Listener = Rc<dyn Fn(&ThemeEvent)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Same-page pub/sub for theme events.
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all events
    pub fn subscribe(&self, listener: impl Fn(&ThemeEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        listeners.len() != before
    }

    /// Publish an event to all current subscribers
    pub fn publish(&self, event: &ThemeEvent) {
        // Snapshot so listeners may (un)subscribe while being notified.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: &ThemeEvent) -> Result<()> {
        self.publish(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pubsub() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe(move |event| sink.borrow_mut().push(*event));

        bus.publish(&ThemeEvent::ThemeChanged { theme: Theme::Dark });

        assert_eq!(*seen.borrow(), vec![ThemeEvent::ThemeChanged { theme: Theme::Dark }]);
    }

    #[test]
    fn test_multiple_subscribers() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let count = count.clone();
            bus.subscribe(move |_| count.set(count.get() + 1));
        }

        bus.publish(&ThemeEvent::ThemeChanged { theme: Theme::Light });

        assert_eq!(count.get(), 3);
        assert_eq!(bus.subscriber_count(), 3);
    }

    #[test]
    fn late_subscriber_sees_no_replay() {
        let bus = EventBus::new();
        bus.publish(&ThemeEvent::ThemeChanged { theme: Theme::Dark });

        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        bus.subscribe(move |_| counter.set(counter.get() + 1));

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let id = bus.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&ThemeEvent::ThemeChanged { theme: Theme::Dark });

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn detail_serializes_as_theme_object() {
        let event = ThemeEvent::ThemeChanged { theme: Theme::Dark };
        assert_eq!(event.name(), "themeChanged");
        assert_eq!(
            serde_json::to_value(event.detail()).unwrap(),
            serde_json::json!({ "theme": "dark" })
        );
        assert_eq!(
            serde_json::to_value(event).unwrap(),
            serde_json::json!({ "type": "themeChanged", "detail": { "theme": "dark" } })
        );
    }
}

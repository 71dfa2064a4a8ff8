//! Page harness wiring a controller to in-memory backends.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use vector_theme::document::MemoryDocument;
use vector_theme::storage::MemoryStore;
use vector_theme::system::ManualSystemPreference;
use vector_theme::{EventBus, Theme, ThemeConfig, ThemeController, ThemeEvent};

pub const KEY: &str = "ngeran-theme";

pub struct Page {
    pub store: Rc<MemoryStore>,
    pub system: Rc<ManualSystemPreference>,
    pub document: Rc<MemoryDocument>,
    pub bus: Rc<EventBus>,
    pub events: Rc<RefCell<Vec<ThemeEvent>>>,
    pub controller: Rc<ThemeController>,
}

impl Page {
    /// Page with navigation, an empty store and the given OS preference.
    pub fn new(prefers_dark: bool) -> Self {
        Self::build(MemoryStore::new(), prefers_dark, MemoryDocument::with_navigation())
    }

    pub fn with_stored(value: &str, prefers_dark: bool) -> Self {
        Self::build(
            MemoryStore::with_entry(KEY, value),
            prefers_dark,
            MemoryDocument::with_navigation(),
        )
    }

    pub fn build(store: MemoryStore, prefers_dark: bool, document: MemoryDocument) -> Self {
        let store = Rc::new(store);
        let system = Rc::new(ManualSystemPreference::new(prefers_dark));
        let document = Rc::new(document);
        let bus = Rc::new(EventBus::new());

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        bus.subscribe(move |event| sink.borrow_mut().push(*event));

        let controller = ThemeController::builder(ThemeConfig::default())
            .store(store.clone())
            .system(system.clone())
            .document(document.clone())
            .events(bus.clone())
            .build();

        Self {
            store,
            system,
            document,
            bus,
            events,
            controller,
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.store.value(KEY)
    }

    pub fn changed_themes(&self) -> Vec<Theme> {
        self.events
            .borrow()
            .iter()
            .map(|event| match event {
                ThemeEvent::ThemeChanged { theme } => *theme,
            })
            .collect()
    }

    /// Asserts the root marker and body palette for `theme` and nothing of
    /// the other theme.
    pub fn assert_styled(&self, theme: Theme) {
        let other = theme.toggled();
        let config = ThemeConfig::default();

        assert!(self.document.root_has(theme.as_str()), "root lacks {}", theme);
        assert!(!self.document.root_has(other.as_str()), "root still has {}", other);
        for class in theme.body_classes(&config) {
            assert!(self.document.body_has(class), "body lacks {}", class);
        }
        for class in other.body_classes(&config) {
            assert!(!self.document.body_has(class), "body still has {}", class);
        }
    }
}

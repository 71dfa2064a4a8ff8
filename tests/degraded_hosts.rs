//! Hosts missing storage, the color-scheme signal, or navigation markup.
//! Nothing may panic or error; the controller falls back to light and
//! skips what it cannot do.

use std::rc::Rc;

use vector_theme::document::MemoryDocument;
use vector_theme::storage::{MemoryStore, UnavailableStore};
use vector_theme::system::{ManualSystemPreference, NoSystemPreference};
use vector_theme::{EventBus, Theme, ThemeConfig, ThemeController, ThemeName};

#[test]
fn bare_host_defaults_to_light() {
    let document = Rc::new(MemoryDocument::new());
    let controller = ThemeController::builder(ThemeConfig::default())
        .store(Rc::new(UnavailableStore))
        .system(Rc::new(NoSystemPreference))
        .document(document.clone())
        .build();

    controller.initialize();

    assert_eq!(controller.current_theme(), ThemeName::Known(Theme::Light));
    assert_eq!(document.root_classes(), vec!["light"]);
    assert!(document.control().is_none());
}

#[test]
fn toggle_without_storage_still_applies_and_broadcasts() {
    let document = Rc::new(MemoryDocument::with_navigation());
    let bus = Rc::new(EventBus::new());
    let count = Rc::new(std::cell::Cell::new(0));
    let counter = count.clone();
    bus.subscribe(move |_| counter.set(counter.get() + 1));

    let controller = ThemeController::builder(ThemeConfig::default())
        .store(Rc::new(UnavailableStore))
        .document(document.clone())
        .events(bus.clone())
        .build();
    controller.initialize();

    assert!(document.click_toggle());

    assert!(document.root_has("dark"));
    assert_eq!(count.get(), 1);
    // Nothing was persisted, so the read accessor falls back to resolution.
    assert_eq!(controller.current_theme(), ThemeName::Known(Theme::Light));
}

#[test]
fn repeated_clicks_without_storage_keep_alternating() {
    let document = Rc::new(MemoryDocument::with_navigation());
    let bus = Rc::new(EventBus::new());
    let controller = ThemeController::builder(ThemeConfig::default())
        .store(Rc::new(UnavailableStore))
        .system(Rc::new(ManualSystemPreference::new(true)))
        .document(document.clone())
        .events(bus)
        .build();
    controller.initialize();
    assert!(document.root_has("dark"));

    assert!(document.click_toggle());
    assert_eq!(document.root_classes(), vec!["light"]);

    assert!(document.click_toggle());
    assert_eq!(document.root_classes(), vec!["dark"]);

    assert_eq!(controller.toggle_theme(), Theme::Light);
    assert_eq!(controller.applied_theme(), Some(Theme::Light));
}

#[test]
fn system_signal_without_storage_is_still_followed() {
    let document = Rc::new(MemoryDocument::new());
    let system = Rc::new(ManualSystemPreference::new(false));
    let controller = ThemeController::builder(ThemeConfig::default())
        .store(Rc::new(UnavailableStore))
        .system(system.clone())
        .document(document.clone())
        .build();
    controller.initialize();

    system.set_prefers_dark(true);

    assert!(document.root_has("dark"));
}

#[test]
fn unknown_system_signal_resolves_light_even_with_observer() {
    let system = Rc::new(ManualSystemPreference::default());
    let controller = ThemeController::builder(ThemeConfig::default())
        .store(Rc::new(MemoryStore::new()))
        .system(system.clone())
        .build();

    controller.initialize();

    assert_eq!(controller.applied_theme(), Some(Theme::Light));
    assert_eq!(system.handler_count(), 1);
}

#[test]
fn default_builder_runs_headless() {
    let controller = ThemeController::builder(ThemeConfig::default()).build();
    controller.initialize();

    assert_eq!(controller.toggle_theme(), Theme::Dark);
    assert_eq!(controller.current_theme().as_str(), "dark");
}

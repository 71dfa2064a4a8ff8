//! Theme resolution, application and persistence.
//!
//! Resolution order: explicit stored preference, then the system
//! color-scheme signal, then light. Only [`ThemeController::toggle_theme`]
//! ever writes the store; system changes are honored only while no explicit
//! preference exists.
//!
//! Every operation is best-effort. Backend failures are logged at debug
//! level and replaced by the documented default, never returned.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::ThemeConfig;
use crate::document::{ActivationHandler, DocumentSink, MemoryDocument, NavMount};
use crate::events::{EventBus, EventSink, SubscriptionId, ThemeEvent};
use crate::icons::{IconFace, ToggleControl};
use crate::storage::{MemoryStore, PreferenceStore};
use crate::system::{NoSystemPreference, SystemPreference};
use crate::theme::{Theme, ThemeName};

pub struct ThemeController {
    config: ThemeConfig,
    store: Rc<dyn PreferenceStore>,
    system: Rc<dyn SystemPreference>,
    document: Rc<dyn DocumentSink>,
    events: Rc<dyn EventSink>,
    watchers: EventBus,
    applied: Cell<Option<Theme>>,
    initialized: Cell<bool>,
}

/// Builder for [`ThemeController`]. Unset backends default to the
/// in-memory ones with no system signal.
pub struct ThemeControllerBuilder {
    config: ThemeConfig,
    store: Option<Rc<dyn PreferenceStore>>,
    system: Option<Rc<dyn SystemPreference>>,
    document: Option<Rc<dyn DocumentSink>>,
    events: Option<Rc<dyn EventSink>>,
}

impl ThemeControllerBuilder {
    pub fn store(mut self, store: Rc<dyn PreferenceStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn system(mut self, system: Rc<dyn SystemPreference>) -> Self {
        self.system = Some(system);
        self
    }

    pub fn document(mut self, document: Rc<dyn DocumentSink>) -> Self {
        self.document = Some(document);
        self
    }

    pub fn events(mut self, events: Rc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Rc<ThemeController> {
        Rc::new(ThemeController {
            config: self.config,
            store: self.store.unwrap_or_else(|| Rc::new(MemoryStore::new())),
            system: self.system.unwrap_or_else(|| Rc::new(NoSystemPreference)),
            document: self.document.unwrap_or_else(|| Rc::new(MemoryDocument::new())),
            events: self.events.unwrap_or_else(|| Rc::new(EventBus::new())),
            watchers: EventBus::new(),
            applied: Cell::new(None),
            initialized: Cell::new(false),
        })
    }
}

impl ThemeController {
    pub fn builder(config: ThemeConfig) -> ThemeControllerBuilder {
        ThemeControllerBuilder {
            config,
            store: None,
            system: None,
            document: None,
            events: None,
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Explicit preference, if one was ever recorded. Empty strings and
    /// unreadable storage count as "none".
    pub fn stored_preference(&self) -> Option<ThemeName> {
        match self.store.get(&self.config.storage_key) {
            Ok(Some(value)) if !value.is_empty() => {
                let name = ThemeName::from_stored(value);
                if !name.is_recognized() {
                    tracing::debug!(
                        "Stored theme {:?} is neither light nor dark, styling as light",
                        name.as_str()
                    );
                }
                Some(name)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Theme preference unreadable, treating as unset: {}", e);
                None
            }
        }
    }

    fn system_theme(&self) -> Theme {
        match self.system.prefers_dark() {
            Some(prefers_dark) => Theme::from_prefers_dark(prefers_dark),
            None => {
                tracing::debug!("No system color-scheme signal, defaulting to light");
                Theme::Light
            }
        }
    }

    /// Stored preference (unvalidated) if present, else the system signal
    /// mapped to a theme, else light.
    pub fn resolve_initial_theme(&self) -> ThemeName {
        self.stored_preference()
            .unwrap_or_else(|| self.system_theme().into())
    }

    /// Public read accessor. Has no side effects.
    pub fn current_theme(&self) -> ThemeName {
        self.resolve_initial_theme()
    }

    /// Last theme written to the document, `None` before the first apply.
    pub fn applied_theme(&self) -> Option<Theme> {
        self.applied.get()
    }

    /// Set the root marker and body palette for `theme`, then sync the
    /// toggle control. Idempotent.
    pub fn apply_theme(&self, theme: Theme) {
        tracing::trace!("Applying theme {}", theme);
        let other = theme.toggled();

        if let Err(e) = self
            .document
            .update_root_classes(&[theme.css_class()], &[other.css_class()])
        {
            tracing::debug!("Failed to update root classes: {}", e);
        }

        let add: Vec<&str> = theme.body_classes(&self.config).iter().map(String::as_str).collect();
        let remove: Vec<&str> = other.body_classes(&self.config).iter().map(String::as_str).collect();
        if let Err(e) = self.document.update_body_classes(&add, &remove) {
            tracing::debug!("Failed to update body classes: {}", e);
        }

        self.applied.set(Some(theme));
        self.sync_toggle_control(theme);
        self.watchers.publish(&ThemeEvent::ThemeChanged { theme });
    }

    /// Call `listener` with every theme written to the document, whatever
    /// caused it (toggle, system change, direct apply).
    pub fn watch(&self, listener: impl Fn(Theme) + 'static) -> SubscriptionId {
        self.watchers.subscribe(move |event| match *event {
            ThemeEvent::ThemeChanged { theme } => listener(theme),
        })
    }

    pub fn unwatch(&self, id: SubscriptionId) -> bool {
        self.watchers.unsubscribe(id)
    }

    /// Show the face for the action available from `theme`. No-op when the
    /// page has no toggle control.
    pub fn sync_toggle_control(&self, theme: Theme) {
        let face = IconFace::for_theme(theme);
        match self.document.render_toggle_face(&self.config.toggle_id, &face) {
            Ok(true) => {}
            Ok(false) => tracing::trace!("No toggle control #{} to sync", self.config.toggle_id),
            Err(e) => tracing::debug!("Failed to render toggle control: {}", e),
        }
    }

    /// Flip the current theme, persist it, apply it and broadcast
    /// `themeChanged`. Returns the new theme.
    ///
    /// Without a stored preference the theme on screen is flipped, so
    /// repeated toggles alternate even when the store cannot be written.
    pub fn toggle_theme(&self) -> Theme {
        let current = match self.stored_preference() {
            Some(stored) => stored.theme(),
            None => self.applied_theme().unwrap_or_else(|| self.system_theme()),
        };
        let next = current.toggled();

        if let Err(e) = self.store.set(&self.config.storage_key, next.as_str()) {
            tracing::debug!("Failed to persist theme preference: {}", e);
        }

        self.apply_theme(next);

        if let Err(e) = self.events.emit(&ThemeEvent::ThemeChanged { theme: next }) {
            tracing::debug!("Failed to broadcast theme change: {}", e);
        }

        next
    }

    /// Re-resolve after a system color-scheme change, unless the user has
    /// recorded an explicit preference. Never writes the store.
    pub fn handle_system_change(&self, prefers_dark: bool) {
        if let Some(stored) = self.stored_preference() {
            tracing::trace!("Ignoring system change, explicit preference {} wins", stored);
            return;
        }
        self.apply_theme(Theme::from_prefers_dark(prefers_dark));
    }

    /// One-time page setup: apply the initial theme, mount the toggle
    /// control when the navigation allows it, and follow system changes.
    /// Later calls do nothing.
    pub fn initialize(self: &Rc<Self>) {
        if self.initialized.replace(true) {
            tracing::debug!("Theme controller already initialized");
            return;
        }

        let initial = self.resolve_initial_theme();
        self.apply_theme(initial.theme());

        let weak = Rc::downgrade(self);
        let on_activate: ActivationHandler = Rc::new(move || {
            if let Some(controller) = weak.upgrade() {
                controller.toggle_theme();
            }
        });
        let control = ToggleControl::from_config(&self.config);
        let mount = NavMount {
            container: &self.config.nav_selector,
            menu: &self.config.menu_selector,
        };
        match self.document.mount_toggle(&control, mount, on_activate) {
            // The control did not exist during the first apply.
            Ok(true) => self.sync_toggle_control(initial.theme()),
            Ok(false) => tracing::debug!(
                "Navigation {} / {} not found, toggle control omitted",
                mount.container,
                mount.menu
            ),
            Err(e) => tracing::debug!("Failed to mount toggle control: {}", e),
        }

        let weak = Rc::downgrade(self);
        let subscribed = self.system.on_change(Box::new(move |prefers_dark: bool| {
            if let Some(controller) = weak.upgrade() {
                controller.handle_system_change(prefers_dark);
            }
        }));
        if !subscribed {
            tracing::debug!("System color-scheme changes are not observable");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }
}

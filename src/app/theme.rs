//! Theme context for Dioxus hosts.
//!
//! The context follows a [`ThemeController`]: whatever applies a theme (the
//! component's own toggle, the injected navigation control, a system
//! color-scheme change, `window.toggleTheme()`) updates the signal. On wasm
//! that is the page's controller; without one (SSR, native) the context
//! only tracks the signal.

use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::ThemeConfig;
use crate::controller::ThemeController;
use crate::theme::Theme;

/// Global theme state shared via context
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub current: Signal<Theme>,
    controller: Signal<Option<Rc<ThemeController>>>,
}

impl ThemeContext {
    /// Get current theme
    pub fn get(&self) -> Theme {
        (self.current)()
    }

    fn controller(&self) -> Option<Rc<ThemeController>> {
        Option::clone(&self.controller.peek())
    }

    /// Flip the theme, persisting and applying it through the controller
    /// when there is one.
    pub fn toggle(&self) -> Theme {
        let next = match self.controller() {
            Some(controller) => controller.toggle_theme(),
            None => self.get().toggled(),
        };

        let mut current = self.current;
        current.set(next);
        next
    }

    /// Button classes from the controller's configuration.
    pub fn button_class(&self) -> String {
        match self.controller() {
            Some(controller) => controller.config().button_class.clone(),
            None => ThemeConfig::default().button_class,
        }
    }
}

/// Initialize theme context provider - call once at app root
pub fn use_theme_provider() -> ThemeContext {
    #[cfg(target_arch = "wasm32")]
    let controller = crate::web::page_controller();
    #[cfg(not(target_arch = "wasm32"))]
    let controller = None;

    use_theme_provider_with(controller)
}

/// Provider bound to `controller`. Only the first render's argument is used.
pub fn use_theme_provider_with(controller: Option<Rc<ThemeController>>) -> ThemeContext {
    // Initialization is idempotent; the page entry may have done it already.
    use_hook(|| {
        if let Some(controller) = &controller {
            controller.initialize();
        }
    });

    let current = use_signal(|| {
        controller
            .as_ref()
            .and_then(|controller| controller.applied_theme())
            .unwrap_or_default()
    });

    let watch = use_hook(|| {
        controller.as_ref().map(|controller| {
            let id = controller.watch(move |theme| {
                let mut current = current;
                current.set(theme);
            });
            (controller.clone(), id)
        })
    });
    use_drop(move || {
        if let Some((controller, id)) = &watch {
            controller.unwatch(*id);
        }
    });

    let controller = use_signal(|| controller);
    use_context_provider(|| ThemeContext { current, controller })
}

/// Get theme context - use in any component
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::system::ManualSystemPreference;

    #[derive(Clone)]
    struct Host {
        controller: Option<Rc<ThemeController>>,
        context: Rc<RefCell<Option<ThemeContext>>>,
    }

    fn host(props: Host) -> Element {
        let theme = use_theme_provider_with(props.controller.clone());
        *props.context.borrow_mut() = Some(theme);
        rsx! {}
    }

    fn mount(controller: Option<Rc<ThemeController>>) -> (VirtualDom, ThemeContext) {
        let context = Rc::new(RefCell::new(None));
        let mut dom = VirtualDom::new_with_props(
            host,
            Host {
                controller,
                context: context.clone(),
            },
        );
        dom.rebuild_in_place();
        let theme = (*context.borrow()).expect("provider rendered");
        (dom, theme)
    }

    #[test]
    fn provider_starts_from_the_applied_theme() {
        let controller = ThemeController::builder(ThemeConfig::default())
            .system(Rc::new(ManualSystemPreference::new(true)))
            .build();

        let (dom, theme) = mount(Some(controller.clone()));

        assert!(controller.is_initialized());
        assert_eq!(dom.in_runtime(|| *theme.current.peek()), Theme::Dark);
    }

    #[test]
    fn provider_follows_changes_made_outside_the_component() {
        let system = Rc::new(ManualSystemPreference::new(false));
        let controller = ThemeController::builder(ThemeConfig::default())
            .system(system.clone())
            .build();
        let (dom, theme) = mount(Some(controller.clone()));
        assert_eq!(dom.in_runtime(|| *theme.current.peek()), Theme::Light);

        dom.in_runtime(|| system.set_prefers_dark(true));
        assert_eq!(dom.in_runtime(|| *theme.current.peek()), Theme::Dark);

        dom.in_runtime(|| controller.toggle_theme());
        assert_eq!(dom.in_runtime(|| *theme.current.peek()), Theme::Light);
    }

    #[test]
    fn toggle_goes_through_the_controller() {
        let store = Rc::new(MemoryStore::new());
        let controller = ThemeController::builder(ThemeConfig::default())
            .store(store.clone())
            .build();
        let (dom, theme) = mount(Some(controller.clone()));

        assert_eq!(dom.in_runtime(|| theme.toggle()), Theme::Dark);

        assert_eq!(store.value("ngeran-theme").as_deref(), Some("dark"));
        assert_eq!(controller.applied_theme(), Some(Theme::Dark));
        assert_eq!(dom.in_runtime(|| *theme.current.peek()), Theme::Dark);
    }

    #[test]
    fn toggle_without_controller_only_flips_the_signal() {
        let (dom, theme) = mount(None);

        assert_eq!(dom.in_runtime(|| theme.toggle()), Theme::Dark);
        assert_eq!(dom.in_runtime(|| theme.toggle()), Theme::Light);
    }

    #[test]
    fn button_class_comes_from_the_controller_config() {
        let config = ThemeConfig {
            button_class: "p-1 rounded".to_string(),
            ..ThemeConfig::default()
        };
        let controller = ThemeController::builder(config).build();

        let (dom, themed) = mount(Some(controller));
        let (bare_dom, bare) = mount(None);

        assert_eq!(dom.in_runtime(|| themed.button_class()), "p-1 rounded");
        assert_eq!(
            bare_dom.in_runtime(|| bare.button_class()),
            ThemeConfig::default().button_class
        );
    }
}

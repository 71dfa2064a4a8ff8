//! Browser entry point.
//!
//! Loaded as an ES module on every page. On start it installs the window
//! globals (`toggleTheme`, `getCurrentTheme`) and initializes the page's
//! controller as soon as the DOM is ready.

mod backends;

pub use backends::{open_store, BrowserDocument, LocalStorage, MediaQueryPreference, WindowEvents};

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::{ThemeConfig, CONFIG_ELEMENT_ID};
use crate::controller::ThemeController;

thread_local! {
    /// The page's controller, built on first use.
    static CONTROLLER: RefCell<Option<Rc<ThemeController>>> = const { RefCell::new(None) };
    /// Configuration handed over by `configureTheme` before first use.
    static PENDING_CONFIG: RefCell<Option<ThemeConfig>> = const { RefCell::new(None) };
}

/// Configuration from `configureTheme`, else the page's JSON block, else defaults.
fn page_config(document: &Document) -> ThemeConfig {
    if let Some(config) = PENDING_CONFIG.with(|pending| pending.borrow_mut().take()) {
        return config;
    }

    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return ThemeConfig::default();
    };

    match ThemeConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            ThemeConfig::default()
        }
    }
}

fn build_controller(window: &Window, document: &Document) -> Rc<ThemeController> {
    let config = page_config(document);
    let system = Rc::new(MediaQueryPreference::new(window, &config.dark_query));
    ThemeController::builder(config)
        .store(open_store(window))
        .system(system)
        .document(Rc::new(BrowserDocument::new(document.clone())))
        .events(Rc::new(WindowEvents::new(window.clone())))
        .build()
}

/// The page's controller. `None` only outside a browser document.
pub fn page_controller() -> Option<Rc<ThemeController>> {
    if let Some(controller) = CONTROLLER.with(|slot| slot.borrow().clone()) {
        return Some(controller);
    }

    let window = web_sys::window()?;
    let document = window.document()?;
    let controller = build_controller(&window, &document);
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller.clone()));
    Some(controller)
}

fn initialize_page() {
    if let Some(controller) = page_controller() {
        controller.initialize();
    }
}

/// Override configuration. Only effective before the controller is first
/// used; returns `false` (and changes nothing) otherwise or when `options`
/// does not describe a valid configuration.
#[wasm_bindgen(js_name = configureTheme)]
pub fn configure_theme(options: JsValue) -> bool {
    if CONTROLLER.with(|slot| slot.borrow().is_some()) {
        tracing::warn!("configureTheme called after the theme controller started");
        return false;
    }

    let config = match serde_wasm_bindgen::from_value::<ThemeConfig>(options) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid theme options: {}", e);
            return false;
        }
    };
    if let Err(e) = config.validate() {
        tracing::warn!("{}", e);
        return false;
    }

    PENDING_CONFIG.with(|pending| *pending.borrow_mut() = Some(config));
    true
}

/// Flip the theme and return the new value.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> String {
    page_controller()
        .map(|controller| controller.toggle_theme().as_str().to_string())
        .unwrap_or_default()
}

/// Stored preference if present, else the resolved theme.
#[wasm_bindgen(js_name = getCurrentTheme)]
pub fn get_current_theme() -> String {
    page_controller()
        .map(|controller| controller.current_theme().as_str().to_string())
        .unwrap_or_default()
}

/// Mirror the exports onto `window` so inline handlers and other scripts
/// can call them without importing the module.
fn expose_globals(window: &Window) {
    let toggle = Closure::<dyn Fn() -> String>::new(toggle_theme);
    let current = Closure::<dyn Fn() -> String>::new(get_current_theme);

    for (name, function) in [("toggleTheme", &toggle), ("getCurrentTheme", &current)] {
        if let Err(e) = js_sys::Reflect::set(window, &JsValue::from_str(name), function.as_ref()) {
            tracing::debug!("Cannot expose window.{}: {:?}", name, e);
        }
    }

    // Page-lifetime functions
    toggle.forget();
    current.forget();
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    expose_globals(&window);

    if document.ready_state() == "loading" {
        let on_ready = Closure::once(initialize_page);
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        {
            tracing::debug!("Cannot wait for DOMContentLoaded: {:?}", e);
            initialize_page();
            return;
        }
        on_ready.forget();
    } else {
        initialize_page();
    }
}

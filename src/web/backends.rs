//! Browser implementations of the controller's seams (web-sys).

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CustomEvent, CustomEventInit, Document, DomTokenList, Element, MediaQueryList,
    MediaQueryListEvent, Storage, Window,
};

use crate::document::{ActivationHandler, DocumentSink, NavMount};
use crate::error::{Result, ThemeError};
use crate::events::{EventSink, ThemeEvent};
use crate::icons::{IconFace, ToggleControl, SVG_FRAME, SVG_NAMESPACE};
use crate::storage::PreferenceStore;
use crate::system::{ChangeHandler, SystemPreference};

fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn dom_err(value: JsValue) -> ThemeError {
    ThemeError::Dom(js_error(&value))
}

// ============ Storage ============

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open(window: &Window) -> Result<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(ThemeError::StorageUnavailable),
            // Thrown when storage is blocked (e.g. third-party frames)
            Err(e) => Err(ThemeError::Storage(js_error(&e))),
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| ThemeError::Storage(js_error(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| ThemeError::Storage(js_error(&e)))
    }
}

// ============ prefers-color-scheme ============

pub struct MediaQueryPreference {
    query: Option<MediaQueryList>,
    listeners: RefCell<Vec<Closure<dyn FnMut(MediaQueryListEvent)>>>,
}

impl MediaQueryPreference {
    pub fn new(window: &Window, query: &str) -> Self {
        let query = match window.match_media(query) {
            Ok(list) => list,
            Err(e) => {
                tracing::debug!("matchMedia unavailable: {}", js_error(&e));
                None
            }
        };
        Self {
            query,
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl SystemPreference for MediaQueryPreference {
    fn prefers_dark(&self) -> Option<bool> {
        self.query.as_ref().map(MediaQueryList::matches)
    }

    fn on_change(&self, handler: ChangeHandler) -> bool {
        let Some(query) = &self.query else {
            return false;
        };
        let listener = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |event: MediaQueryListEvent| handler(event.matches()),
        );
        match query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref()) {
            Ok(()) => {
                // Page-lifetime listener; keep the closure alive with us.
                self.listeners.borrow_mut().push(listener);
                true
            }
            Err(e) => {
                tracing::debug!("Cannot observe color-scheme changes: {}", js_error(&e));
                false
            }
        }
    }
}

// ============ Document ============

pub struct BrowserDocument {
    document: Document,
    listeners: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl BrowserDocument {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            listeners: RefCell::new(Vec::new()),
        }
    }

    fn svg_element(&self, tag: &str) -> Result<Element> {
        self.document
            .create_element_ns(Some(SVG_NAMESPACE), tag)
            .map_err(dom_err)
    }
}

fn update_token_list(list: &DomTokenList, add: &[&str], remove: &[&str]) -> Result<()> {
    for class in add {
        list.add_1(class).map_err(dom_err)?;
    }
    for class in remove {
        list.remove_1(class).map_err(dom_err)?;
    }
    Ok(())
}

fn add_classes<S: AsRef<str>>(element: &Element, classes: &[S]) -> Result<()> {
    let list = element.class_list();
    for class in classes {
        list.add_1(class.as_ref()).map_err(dom_err)?;
    }
    Ok(())
}

impl DocumentSink for BrowserDocument {
    fn update_root_classes(&self, add: &[&str], remove: &[&str]) -> Result<()> {
        let root = self
            .document
            .document_element()
            .ok_or_else(|| ThemeError::Dom("document has no root element".to_string()))?;
        update_token_list(&root.class_list(), add, remove)
    }

    fn update_body_classes(&self, add: &[&str], remove: &[&str]) -> Result<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| ThemeError::Dom("document has no body".to_string()))?;
        update_token_list(&body.class_list(), add, remove)
    }

    fn render_toggle_face(&self, id: &str, face: &IconFace) -> Result<bool> {
        let Some(button) = self.document.get_element_by_id(id) else {
            return Ok(false);
        };
        let Some(icon) = button.query_selector("svg").map_err(dom_err)? else {
            return Ok(false);
        };

        icon.set_text_content(None);
        for shape in face.glyph.shapes() {
            let element = self.svg_element(shape.tag())?;
            for (name, value) in shape.attributes() {
                element.set_attribute(name, &value).map_err(dom_err)?;
            }
            icon.append_child(&element).map_err(dom_err)?;
        }

        button.set_attribute("aria-label", face.label).map_err(dom_err)?;
        button.set_attribute("title", face.label).map_err(dom_err)?;
        Ok(true)
    }

    fn mount_toggle(
        &self,
        control: &ToggleControl,
        mount: NavMount<'_>,
        on_activate: ActivationHandler,
    ) -> Result<bool> {
        let Some(container) = self.document.query_selector(mount.container).map_err(dom_err)? else {
            return Ok(false);
        };
        if container.query_selector(mount.menu).map_err(dom_err)?.is_none() {
            return Ok(false);
        }

        let button = self.document.create_element("button").map_err(dom_err)?;
        button.set_id(&control.id);
        add_classes(&button, &control.button_classes)?;
        button
            .set_attribute("aria-label", &control.label)
            .map_err(dom_err)?;

        let icon = self.svg_element("svg")?;
        for (name, value) in SVG_FRAME {
            icon.set_attribute(name, value).map_err(dom_err)?;
        }
        button.append_child(&icon).map_err(dom_err)?;

        let listener = Closure::<dyn FnMut()>::new(move || on_activate());
        button
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        self.listeners.borrow_mut().push(listener);

        let wrapper = self.document.create_element("div").map_err(dom_err)?;
        add_classes(&wrapper, &control.wrapper_classes)?;
        wrapper.append_child(&button).map_err(dom_err)?;
        container.append_child(&wrapper).map_err(dom_err)?;
        Ok(true)
    }
}

// ============ Events ============

/// Dispatches theme events as `CustomEvent`s on the window.
pub struct WindowEvents {
    window: Window,
}

impl WindowEvents {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl EventSink for WindowEvents {
    fn emit(&self, event: &ThemeEvent) -> Result<()> {
        let detail = serde_wasm_bindgen::to_value(&event.detail())
            .map_err(|e| ThemeError::Dom(e.to_string()))?;
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let custom = CustomEvent::new_with_event_init_dict(event.name(), &init).map_err(dom_err)?;
        self.window.dispatch_event(&custom).map_err(dom_err)?;
        Ok(())
    }
}

/// Storage backend for `window`, or the unavailable stand-in.
pub fn open_store(window: &Window) -> Rc<dyn PreferenceStore> {
    match LocalStorage::open(window) {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            tracing::debug!("Theme preference will not persist: {}", e);
            Rc::new(crate::storage::UnavailableStore)
        }
    }
}

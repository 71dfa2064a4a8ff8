//! Document mutation seam.
//!
//! The controller never touches a DOM directly; it talks to a
//! [`DocumentSink`]. The browser implementation lives in `web`, the
//! in-memory one below backs native hosts and tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::icons::{IconFace, ToggleControl};

/// Called when the user activates the toggle control.
pub type ActivationHandler = Rc<dyn Fn()>;

/// Where the toggle control goes: the wrapper is appended to `container`,
/// but only when `menu` matches inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavMount<'a> {
    pub container: &'a str,
    pub menu: &'a str,
}

pub trait DocumentSink {
    /// Add `add`, then remove `remove`, on the root element's class list.
    fn update_root_classes(&self, add: &[&str], remove: &[&str]) -> Result<()>;

    /// Same as [`DocumentSink::update_root_classes`] for the body element.
    fn update_body_classes(&self, add: &[&str], remove: &[&str]) -> Result<()>;

    /// Rebuild the icon and label of the control with element id `id`.
    /// `Ok(false)` when there is no such control.
    fn render_toggle_face(&self, id: &str, face: &IconFace) -> Result<bool>;

    /// Insert `control` at `mount` and wire `on_activate` to its click.
    /// `Ok(false)` when the navigation structure is missing.
    fn mount_toggle(
        &self,
        control: &ToggleControl,
        mount: NavMount<'_>,
        on_activate: ActivationHandler,
    ) -> Result<bool>;
}

/// Observable state of a toggle control in a [`MemoryDocument`].
#[derive(Clone, Debug, PartialEq)]
pub struct ControlState {
    pub id: String,
    pub face: Option<IconFace>,
    pub aria_label: String,
    pub title: Option<String>,
    /// Whether the control was inserted by `mount_toggle` (vs. present in
    /// the page markup)
    pub mounted: bool,
}

#[derive(Default)]
struct Inner {
    root: Vec<String>,
    body: Vec<String>,
    has_nav: bool,
    has_menu: bool,
    control: Option<ControlState>,
    handler: Option<ActivationHandler>,
}

/// In-memory document with a root, a body, and an optional navigation bar.
#[derive(Default)]
pub struct MemoryDocument {
    inner: RefCell<Inner>,
}

impl MemoryDocument {
    /// Page without navigation markup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with the navigation container and its desktop menu.
    pub fn with_navigation() -> Self {
        let doc = Self::new();
        {
            let mut inner = doc.inner.borrow_mut();
            inner.has_nav = true;
            inner.has_menu = true;
        }
        doc
    }

    /// Page whose navigation container lacks the desktop menu.
    pub fn with_navigation_container_only() -> Self {
        let doc = Self::new();
        doc.inner.borrow_mut().has_nav = true;
        doc
    }

    /// Page that ships its own control markup with element id `id`.
    pub fn with_static_control(id: &str) -> Self {
        let doc = Self::new();
        doc.inner.borrow_mut().control = Some(ControlState {
            id: id.to_string(),
            face: None,
            aria_label: String::new(),
            title: None,
            mounted: false,
        });
        doc
    }

    pub fn root_classes(&self) -> Vec<String> {
        self.inner.borrow().root.clone()
    }

    pub fn body_classes(&self) -> Vec<String> {
        self.inner.borrow().body.clone()
    }

    pub fn root_has(&self, class: &str) -> bool {
        self.inner.borrow().root.iter().any(|c| c == class)
    }

    pub fn body_has(&self, class: &str) -> bool {
        self.inner.borrow().body.iter().any(|c| c == class)
    }

    pub fn control(&self) -> Option<ControlState> {
        self.inner.borrow().control.clone()
    }

    /// Simulate a click on the toggle control. Returns `false` when no
    /// handler is wired.
    pub fn click_toggle(&self) -> bool {
        // Release the borrow before calling out: the handler mutates us.
        let handler = self.inner.borrow().handler.clone();
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

fn update_class_list(list: &mut Vec<String>, add: &[&str], remove: &[&str]) {
    for class in add {
        if !list.iter().any(|c| c == class) {
            list.push((*class).to_string());
        }
    }
    list.retain(|c| !remove.contains(&c.as_str()));
}

impl DocumentSink for MemoryDocument {
    fn update_root_classes(&self, add: &[&str], remove: &[&str]) -> Result<()> {
        update_class_list(&mut self.inner.borrow_mut().root, add, remove);
        Ok(())
    }

    fn update_body_classes(&self, add: &[&str], remove: &[&str]) -> Result<()> {
        update_class_list(&mut self.inner.borrow_mut().body, add, remove);
        Ok(())
    }

    fn render_toggle_face(&self, id: &str, face: &IconFace) -> Result<bool> {
        let mut inner = self.inner.borrow_mut();
        match inner.control.as_mut() {
            Some(control) if control.id == id => {
                control.face = Some(*face);
                control.aria_label = face.label.to_string();
                control.title = Some(face.label.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn mount_toggle(
        &self,
        control: &ToggleControl,
        _mount: NavMount<'_>,
        on_activate: ActivationHandler,
    ) -> Result<bool> {
        let mut inner = self.inner.borrow_mut();
        if !(inner.has_nav && inner.has_menu) {
            return Ok(false);
        }
        inner.control = Some(ControlState {
            id: control.id.clone(),
            face: None,
            aria_label: control.label.clone(),
            title: None,
            mounted: true,
        });
        inner.handler = Some(on_activate);
        Ok(true)
    }
}

//! Environment-level color-scheme signal.
//!
//! The signal is owned by the host (OS / user agent). The controller only
//! queries it and observes changes through [`SystemPreference::on_change`].

use std::cell::{Cell, RefCell};

pub type ChangeHandler = Box<dyn Fn(bool)>;

pub trait SystemPreference {
    /// `Some(true)` when the host prefers a dark color scheme, `None` when
    /// the host cannot tell.
    fn prefers_dark(&self) -> Option<bool>;

    /// Register a handler called with the new value on every change.
    /// Returns `false` when the host offers no change notifications, in
    /// which case the handler is dropped.
    fn on_change(&self, handler: ChangeHandler) -> bool;
}

/// Host without any color-scheme support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSystemPreference;

impl SystemPreference for NoSystemPreference {
    fn prefers_dark(&self) -> Option<bool> {
        None
    }

    fn on_change(&self, _handler: ChangeHandler) -> bool {
        false
    }
}

/// Signal driven by hand, for native hosts and tests.
#[derive(Default)]
pub struct ManualSystemPreference {
    prefers_dark: Cell<Option<bool>>,
    handlers: RefCell<Vec<ChangeHandler>>,
}

impl ManualSystemPreference {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            prefers_dark: Cell::new(Some(prefers_dark)),
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Change the signal and notify every handler synchronously.
    ///
    /// Handlers must not register further handlers while being notified.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.prefers_dark.set(Some(prefers_dark));
        for handler in self.handlers.borrow().iter() {
            handler(prefers_dark);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl SystemPreference for ManualSystemPreference {
    fn prefers_dark(&self) -> Option<bool> {
        self.prefers_dark.get()
    }

    fn on_change(&self, handler: ChangeHandler) -> bool {
        self.handlers.borrow_mut().push(handler);
        true
    }
}

//! vector-theme - light/dark mode for the vector site theme
//!
//! A WebAssembly module loaded on every page that:
//! - Resolves the theme from the stored preference or `prefers-color-scheme`
//! - Marks the document root (`light` / `dark`) and swaps the body palette
//! - Mounts a toggle button into the navigation and keeps its glyph in sync
//! - Persists explicit toggles and broadcasts `themeChanged`
//!
//! The controller is built from injected backends (storage, system signal,
//! document, events) so the same code runs against the browser on wasm and
//! against in-memory fakes everywhere else.

pub mod app;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod events;
pub mod icons;
pub mod storage;
pub mod system;
pub mod theme;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::ThemeConfig;
pub use controller::{ThemeController, ThemeControllerBuilder};
pub use error::{Result, ThemeError};
pub use events::{EventBus, ThemeEvent};
pub use theme::{Theme, ThemeName};

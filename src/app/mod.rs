//! Dioxus integration.
//!
//! For apps built with Dioxus rather than the static site: call
//! [`use_theme_provider`] once at the root and place a [`ThemeToggle`]
//! wherever the control belongs.

pub mod components;
pub mod theme;

pub use components::{ThemeIcon, ThemeToggle};
pub use theme::{use_theme, use_theme_provider, use_theme_provider_with, ThemeContext};
